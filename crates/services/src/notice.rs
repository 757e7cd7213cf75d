//! Short user-facing messages about import results.

use std::fmt;

use crate::error::ImportError;
use crate::session::ImportReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A toast-style notification for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub detail: String,
}

impl Notice {
    #[must_use]
    pub fn loaded(report: &ImportReport) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: "Lesson loaded successfully".to_string(),
            detail: format!("Loaded: {}", report.title),
        }
    }

    #[must_use]
    pub fn import_failed(error: &ImportError) -> Self {
        let detail = match error {
            ImportError::InvalidLessonFormat(_) => "The selected file is not a valid lesson",
            ImportError::FileRead(_) => "Error reading the file",
        };
        Self {
            level: NoticeLevel::Error,
            title: "Import failed".to_string(),
            detail: detail.to_string(),
        }
    }

    /// Notice for either outcome of an import.
    #[must_use]
    pub fn from_result(result: &Result<ImportReport, ImportError>) -> Self {
        match result {
            Ok(report) => Self::loaded(report),
            Err(err) => Self::import_failed(err),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::model::LessonError;

    #[test]
    fn failure_texts() {
        let invalid = Notice::import_failed(&ImportError::InvalidLessonFormat(LessonError::MissingId));
        assert_eq!(invalid.level, NoticeLevel::Error);
        assert_eq!(invalid.detail, "The selected file is not a valid lesson");

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let read = Notice::import_failed(&ImportError::FileRead(io));
        assert_eq!(read.to_string(), "Import failed: Error reading the file");
    }
}
