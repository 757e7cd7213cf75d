/// Placeholder shown for component types the registry does not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackView {
    pub title: String,
    pub message: String,
}

impl FallbackView {
    #[must_use]
    pub fn for_tag(tag: &str) -> Self {
        let name = if tag.trim().is_empty() { "Unknown" } else { tag };
        Self {
            title: format!("{name} Component"),
            message: "This component type is not available in the viewer".to_string(),
        }
    }
}
