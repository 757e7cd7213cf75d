use lesson_core::model::props::{Hotspot, HotspotProps};
use lesson_core::model::{DisplaySize, HotspotId, ImageMeta, ImageSource};

use super::IntentOutcome;

#[derive(Debug, Clone, PartialEq)]
pub enum HotspotIntent {
    /// Open a marker and remember that it was found.
    Reveal(HotspotId),
    /// Close the open marker.
    Dismiss,
    /// Forget every discovery.
    Reset,
    /// The image finished loading at its natural size.
    ImageLoaded {
        natural_width: u32,
        natural_height: u32,
        container_width: f64,
    },
}

/// Image with discoverable markers. Never scores.
#[derive(Debug, Clone)]
pub struct HotspotState {
    title: String,
    image: ImageSource,
    hotspots: Vec<Hotspot>,
    discovered: Vec<HotspotId>,
    active: Option<HotspotId>,
    display: Option<DisplaySize>,
}

impl HotspotState {
    #[must_use]
    pub fn new(props: &HotspotProps) -> Self {
        Self {
            title: props.title.clone(),
            image: props.image_source(),
            hotspots: props.normalized_hotspots(),
            discovered: Vec::new(),
            active: None,
            display: None,
        }
    }

    /// Markers opened at least once, in discovery order.
    #[must_use]
    pub fn discovered(&self) -> &[HotspotId] {
        &self.discovered
    }

    pub fn handle(&mut self, intent: HotspotIntent) -> IntentOutcome {
        match intent {
            HotspotIntent::Reveal(id) => {
                if !self.hotspots.iter().any(|h| h.id == id) {
                    return IntentOutcome::Ignored;
                }
                if !self.discovered.contains(&id) {
                    self.discovered.push(id.clone());
                }
                self.active = Some(id);
                IntentOutcome::Updated
            }
            HotspotIntent::Dismiss => {
                if self.active.take().is_none() {
                    return IntentOutcome::Ignored;
                }
                IntentOutcome::Updated
            }
            HotspotIntent::Reset => {
                self.discovered.clear();
                self.active = None;
                IntentOutcome::Updated
            }
            HotspotIntent::ImageLoaded {
                natural_width,
                natural_height,
                container_width,
            } => match ImageMeta::new(natural_width, natural_height) {
                Ok(meta) => {
                    self.display = Some(meta.scaled_to_width(container_width));
                    IntentOutcome::Updated
                }
                Err(err) => {
                    tracing::warn!(error = %err, "ignoring image load report");
                    IntentOutcome::Ignored
                }
            },
        }
    }

    #[must_use]
    pub fn view(&self) -> HotspotView {
        let active = self
            .active
            .as_ref()
            .and_then(|id| self.hotspots.iter().find(|h| &h.id == id));

        HotspotView {
            title: self.title.clone(),
            image_src: self.image.display_src(),
            display: self.display,
            markers: self
                .hotspots
                .iter()
                .enumerate()
                .map(|(i, h)| HotspotMarker {
                    number: i + 1,
                    id: h.id.clone(),
                    label: h.label.clone(),
                    x: h.x(),
                    y: h.y(),
                    discovered: self.discovered.contains(&h.id),
                })
                .collect(),
            active: active.map(|h| (h.label.clone(), h.content.clone())),
            progress_label: format!(
                "Discovered: {} of {} hotspots",
                self.discovered.len(),
                self.hotspots.len()
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HotspotMarker {
    /// 1-based label drawn on the marker.
    pub number: usize,
    pub id: HotspotId,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub discovered: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HotspotView {
    pub title: String,
    pub image_src: String,
    /// Known once the image has loaded.
    pub display: Option<DisplaySize>,
    pub markers: Vec<HotspotMarker>,
    /// Label and content of the open marker.
    pub active: Option<(String, String)>,
    pub progress_label: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::model::PLACEHOLDER_IMAGE;
    use lesson_core::model::props::FromProps;
    use serde_json::json;

    fn state() -> HotspotState {
        let props = HotspotProps::from_props(
            json!({
                "image": "",
                "hotspots": [
                    { "id": "h1", "x": 0.2, "y": 0.3, "label": "Engine", "content": "Makes it go" },
                    { "id": "h2", "x": 0.8, "y": 0.6, "label": "Wheel", "content": "Round" }
                ]
            })
            .as_object()
            .unwrap(),
        );
        HotspotState::new(&props)
    }

    #[test]
    fn reveal_records_each_marker_once() {
        let mut state = state();
        state.handle(HotspotIntent::Reveal(HotspotId::new("h1")));
        state.handle(HotspotIntent::Dismiss);
        state.handle(HotspotIntent::Reveal(HotspotId::new("h1")));
        assert_eq!(state.discovered(), &[HotspotId::new("h1")]);
        assert_eq!(state.view().progress_label, "Discovered: 1 of 2 hotspots");
        assert_eq!(
            state.view().active,
            Some(("Engine".to_string(), "Makes it go".to_string()))
        );
    }

    #[test]
    fn reset_forgets_discoveries() {
        let mut state = state();
        state.handle(HotspotIntent::Reveal(HotspotId::new("h2")));
        state.handle(HotspotIntent::Reset);
        let view = state.view();
        assert!(view.active.is_none());
        assert_eq!(view.progress_label, "Discovered: 0 of 2 hotspots");
        assert_eq!(view.markers[1].number, 2);
    }

    #[test]
    fn unknown_marker_is_ignored() {
        let mut state = state();
        assert_eq!(
            state.handle(HotspotIntent::Reveal(HotspotId::new("nope"))),
            IntentOutcome::Ignored
        );
        assert!(state.discovered().is_empty());
    }

    #[test]
    fn image_load_scales_to_container() {
        let mut state = state();
        state.handle(HotspotIntent::ImageLoaded {
            natural_width: 800,
            natural_height: 600,
            container_width: 400.0,
        });
        let display = state.view().display.unwrap();
        assert!((display.height - 300.0).abs() < f64::EPSILON);
        assert_eq!(state.view().image_src, PLACEHOLDER_IMAGE);

        assert_eq!(
            state.handle(HotspotIntent::ImageLoaded {
                natural_width: 0,
                natural_height: 600,
                container_width: 400.0,
            }),
            IntentOutcome::Ignored
        );
    }
}
