//! Lesson import from files and other text sources.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use lesson_core::model::Lesson;

use crate::error::ImportError;

/// Where lesson text comes from.
#[async_trait]
pub trait LessonSource: Send + Sync {
    /// Read the full lesson document as text.
    async fn read_text(&self) -> io::Result<String>;

    /// Short label for logs.
    fn describe(&self) -> String;
}

/// A lesson file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LessonSource for FileSource {
    async fn read_text(&self) -> io::Result<String> {
        tokio::fs::read_to_string(&self.path).await
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Lesson text already held in memory, e.g. pasted or bundled.
#[derive(Debug, Clone)]
pub struct TextSource {
    name: String,
    text: String,
}

impl TextSource {
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

#[async_trait]
impl LessonSource for TextSource {
    async fn read_text(&self) -> io::Result<String> {
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

/// Read and validate a lesson without touching any session.
///
/// # Errors
///
/// Returns `ImportError::FileRead` if the source cannot be read, or
/// `ImportError::InvalidLessonFormat` if the text is not a usable lesson.
pub async fn read_lesson(source: &dyn LessonSource) -> Result<Lesson, ImportError> {
    let text = source.read_text().await.map_err(|err| {
        tracing::warn!(source = %source.describe(), error = %err, "lesson read failed");
        ImportError::FileRead(err)
    })?;
    let lesson = Lesson::from_json_str(&text).map_err(|err| {
        tracing::warn!(source = %source.describe(), error = %err, "lesson rejected");
        ImportError::InvalidLessonFormat(err)
    })?;
    tracing::debug!(source = %source.describe(), lesson = %lesson.id(), "lesson read");
    Ok(lesson)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::model::LessonError;

    #[tokio::test]
    async fn reads_text_source() {
        let source = TextSource::new("inline", r#"{ "id": "l1", "title": "T", "slides": [] }"#);
        let lesson = read_lesson(&source).await.unwrap();
        assert_eq!(lesson.id().as_str(), "l1");
        assert_eq!(lesson.slide_count(), 0);
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let source = FileSource::new("/definitely/not/here/lesson.json");
        let err = read_lesson(&source).await.unwrap_err();
        assert!(matches!(err, ImportError::FileRead(_)));
    }

    #[tokio::test]
    async fn shape_errors_are_format_errors() {
        let source = TextSource::new("inline", r#"{ "id": "l1", "slides": {} }"#);
        let err = read_lesson(&source).await.unwrap_err();
        assert!(matches!(
            err,
            ImportError::InvalidLessonFormat(LessonError::SlidesNotArray)
        ));
    }
}
