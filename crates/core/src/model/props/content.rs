use serde::{Deserialize, Serialize};

use super::{FromProps, lenient_seq, non_blank};
use crate::model::media::ImageSource;

/// Horizontal text alignment. Unrecognized values fall back to `Left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Center,
    Right,
    Justify,
    #[default]
    #[serde(other)]
    Left,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ParagraphProps {
    /// Rich text, passed through verbatim.
    pub content: String,
    pub align: Align,
}

impl FromProps for ParagraphProps {
    const KIND: &'static str = "paragraph";
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeadingProps {
    pub content: String,
    level: i64,
    pub align: Align,
}

impl Default for HeadingProps {
    fn default() -> Self {
        Self {
            content: String::new(),
            level: 2,
            align: Align::Left,
        }
    }
}

impl HeadingProps {
    /// Heading level clamped into `1..=6`.
    #[must_use]
    pub fn level(&self) -> u8 {
        // Clamped, so the narrowing cannot lose information.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let level = self.level.clamp(1, 6) as u8;
        level
    }
}

impl FromProps for HeadingProps {
    const KIND: &'static str = "heading";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    Ordered,
    #[default]
    #[serde(other)]
    Unordered,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct BulletListProps {
    #[serde(deserialize_with = "lenient_seq")]
    pub items: Vec<String>,
    #[serde(rename = "type")]
    pub style: ListStyle,
}

impl FromProps for BulletListProps {
    const KIND: &'static str = "bulletList";
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImageProps {
    pub src: String,
    pub alt: String,
    pub caption: String,
    pub width: String,
}

impl Default for ImageProps {
    fn default() -> Self {
        Self {
            src: String::new(),
            alt: String::new(),
            caption: String::new(),
            width: "100%".to_string(),
        }
    }
}

impl ImageProps {
    #[must_use]
    pub fn source(&self) -> ImageSource {
        ImageSource::parse(&self.src)
    }

    #[must_use]
    pub fn caption(&self) -> Option<&str> {
        non_blank(&self.caption)
    }
}

impl FromProps for ImageProps {
    const KIND: &'static str = "image";
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct ScoreBoardProps {
    pub title: String,
    pub show_total: bool,
    pub show_percentage: bool,
    pub animation: bool,
}

impl Default for ScoreBoardProps {
    fn default() -> Self {
        Self {
            title: "Your Score".to_string(),
            show_total: true,
            show_percentage: true,
            animation: true,
        }
    }
}

impl FromProps for ScoreBoardProps {
    const KIND: &'static str = "scoreBoard";
}
