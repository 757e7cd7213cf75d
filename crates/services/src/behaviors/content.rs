//! Static content. These components hold no state beyond their props.

use lesson_core::model::props::{
    Align, BulletListProps, HeadingProps, ImageProps, ListStyle, ParagraphProps,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextView {
    pub content: String,
    pub align: Align,
}

impl From<&ParagraphProps> for TextView {
    fn from(props: &ParagraphProps) -> Self {
        Self {
            content: props.content.clone(),
            align: props.align,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingView {
    pub content: String,
    pub level: u8,
    pub align: Align,
}

impl From<&HeadingProps> for HeadingView {
    fn from(props: &HeadingProps) -> Self {
        Self {
            content: props.content.clone(),
            level: props.level(),
            align: props.align,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub items: Vec<String>,
    pub ordered: bool,
}

impl From<&BulletListProps> for ListView {
    fn from(props: &BulletListProps) -> Self {
        Self {
            items: props.items.clone(),
            ordered: props.style == ListStyle::Ordered,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageView {
    /// What to load; the placeholder when no source was given.
    pub src: String,
    pub alt: String,
    pub caption: Option<String>,
    pub width: String,
}

impl From<&ImageProps> for ImageView {
    fn from(props: &ImageProps) -> Self {
        Self {
            src: props.source().display_src(),
            alt: props.alt.clone(),
            caption: props.caption().map(str::to_string),
            width: props.width.clone(),
        }
    }
}
