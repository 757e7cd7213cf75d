use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("Image dimensions cannot be zero.")]
    InvalidImageDimensions,
}

/// Shown in place of an image whose source was left empty by the author.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

//
// ─── IMAGE SOURCE ──────────────────────────────────────────────────────────────
//

/// Where an image component points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Absolute URL (`http`, `https`, `data`, ...).
    Url(Url),
    /// Relative or absolute file path, resolved by the presentation layer.
    FilePath(PathBuf),
    /// No source given; render [`PLACEHOLDER_IMAGE`].
    Placeholder,
}

impl ImageSource {
    /// Classify an authored `src` string. Never fails: anything that is not
    /// an absolute URL is treated as a path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() {
            return Self::Placeholder;
        }
        match Url::parse(s) {
            Ok(url) => Self::Url(url),
            Err(_) => Self::FilePath(PathBuf::from(s)),
        }
    }

    #[must_use]
    pub fn as_url(&self) -> Option<&Url> {
        match self {
            Self::Url(u) => Some(u),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::FilePath(p) => Some(p.as_path()),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    /// The string a renderer should load.
    #[must_use]
    pub fn display_src(&self) -> String {
        match self {
            Self::Url(u) => u.to_string(),
            Self::FilePath(p) => p.display().to_string(),
            Self::Placeholder => PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

//
// ─── IMAGE GEOMETRY ────────────────────────────────────────────────────────────
//

/// Natural pixel size of a loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageMeta {
    pub width: u32,
    pub height: u32,
}

impl ImageMeta {
    /// # Errors
    ///
    /// Returns `MediaError::InvalidImageDimensions` if either side is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, MediaError> {
        if width == 0 || height == 0 {
            return Err(MediaError::InvalidImageDimensions);
        }
        Ok(Self { width, height })
    }

    /// Size of the image when stretched to `container_width`, keeping aspect.
    #[must_use]
    pub fn scaled_to_width(&self, container_width: f64) -> DisplaySize {
        let width = container_width.max(0.0);
        let height = width / f64::from(self.width) * f64::from(self.height);
        DisplaySize { width, height }
    }
}

/// Rendered size of an image in layout pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplaySize {
    pub width: f64,
    pub height: f64,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_is_placeholder() {
        let src = ImageSource::parse("   ");
        assert!(src.is_placeholder());
        assert_eq!(src.display_src(), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn absolute_url_is_parsed() {
        let src = ImageSource::parse("https://example.com/cat.png");
        assert_eq!(src.as_url().unwrap().host_str(), Some("example.com"));
    }

    #[test]
    fn relative_path_is_kept() {
        let src = ImageSource::parse("images/cat.png");
        assert_eq!(src.as_path(), Some(Path::new("images/cat.png")));
        assert_eq!(src.display_src(), "images/cat.png");
    }

    #[test]
    fn meta_rejects_zero_dimensions() {
        assert_eq!(
            ImageMeta::new(0, 10).unwrap_err(),
            MediaError::InvalidImageDimensions
        );
    }

    #[test]
    fn scaling_keeps_aspect_ratio() {
        let meta = ImageMeta::new(800, 600).unwrap();
        let size = meta.scaled_to_width(400.0);
        assert!((size.width - 400.0).abs() < f64::EPSILON);
        assert!((size.height - 300.0).abs() < f64::EPSILON);
    }
}
