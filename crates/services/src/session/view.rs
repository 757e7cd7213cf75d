use chrono::{DateTime, Utc};
use serde::Serialize;

use lesson_core::model::{ComponentId, LessonId, SlideId};

use crate::behaviors::ComponentView;
use crate::registry::BehaviorKind;

/// Result of installing a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub lesson_id: LessonId,
    pub title: String,
    pub slide_count: usize,
    pub obtainable: u32,
    pub loaded_at: DateTime<Utc>,
}

/// Score header values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScoreSummary {
    pub earned: u32,
    pub obtainable: u32,
    pub percentage: u32,
}

impl ScoreSummary {
    /// "Score: e / t"
    #[must_use]
    pub fn label(&self) -> String {
        format!("Score: {} / {}", self.earned, self.obtainable)
    }
}

/// One row of the slide picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideSummary {
    pub index: usize,
    pub id: SlideId,
    pub title: String,
    pub is_current: bool,
}

/// One component of the current slide, ready to present.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSnapshot {
    pub id: ComponentId,
    pub kind: BehaviorKind,
    pub view: ComponentView,
}

/// Everything the presentation layer needs for the current slide.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideView {
    pub index: usize,
    pub count: usize,
    pub title: String,
    pub components: Vec<ComponentSnapshot>,
    pub has_previous: bool,
    pub has_next: bool,
    pub progress: f64,
    pub score: ScoreSummary,
}

impl SlideView {
    /// "Slide N of M"
    #[must_use]
    pub fn counter_label(&self) -> String {
        format!("Slide {} of {}", self.index + 1, self.count)
    }
}
