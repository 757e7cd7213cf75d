use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;

use crate::model::ids::{ComponentId, LessonId, SlideId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Structural validation failures for an imported lesson document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson is not valid JSON: {0}")]
    Json(String),

    #[error("lesson must be a JSON object")]
    NotAnObject,

    #[error("lesson id is missing or empty")]
    MissingId,

    #[error("lesson slides must be an array")]
    SlidesNotArray,

    #[error("slide {index} must be an object")]
    MalformedSlide { index: usize },

    #[error("component {index} on slide {slide} must be an object")]
    MalformedComponent { slide: SlideId, index: usize },

    #[error("component id {component} appears more than once on slide {slide}")]
    DuplicateComponentId {
        slide: SlideId,
        component: ComponentId,
    },
}

//
// ─── COMPONENT ─────────────────────────────────────────────────────────────────
//

/// A typed, property-bearing unit of content or interactivity.
///
/// `props` is opaque at this level; the behavior resolved from `kind`
/// decides how to read it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    pub id: ComponentId,
    #[serde(rename = "type")]
    pub kind: String,
    pub props: Map<String, Value>,
}

impl Component {
    #[must_use]
    pub fn new(id: impl Into<ComponentId>, kind: impl Into<String>, props: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            props,
        }
    }

    /// Declared `points` property, if present and a non-negative integer.
    #[must_use]
    pub fn declared_points(&self) -> Option<u32> {
        self.props
            .get("points")
            .and_then(Value::as_u64)
            .map(|p| u32::try_from(p).unwrap_or(u32::MAX))
    }

    fn from_value(slide: &SlideId, index: usize, value: Value) -> Result<Self, LessonError> {
        let Value::Object(mut raw) = value else {
            return Err(LessonError::MalformedComponent {
                slide: slide.clone(),
                index,
            });
        };

        let id = raw
            .remove("id")
            .and_then(identifier)
            .unwrap_or_else(|| format!("component-{}", index + 1));
        let kind = match raw.remove("type") {
            Some(Value::String(kind)) => kind,
            _ => String::new(),
        };
        let props = match raw.remove("props") {
            Some(Value::Object(props)) => props,
            Some(Value::Null) | None => Map::new(),
            Some(_) => {
                tracing::warn!(slide = %slide, component = %id, "component props is not an object; using empty props");
                Map::new()
            }
        };

        Ok(Self {
            id: ComponentId::new(id),
            kind,
            props,
        })
    }
}

//
// ─── SLIDE ─────────────────────────────────────────────────────────────────────
//

/// Ordered list of components shown together as one navigation unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slide {
    pub id: SlideId,
    pub title: String,
    pub components: Vec<Component>,
}

impl Slide {
    /// Creates a slide, rejecting duplicate component ids.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::DuplicateComponentId` if two components share an id.
    pub fn new(
        id: impl Into<SlideId>,
        title: impl Into<String>,
        components: Vec<Component>,
    ) -> Result<Self, LessonError> {
        let slide = Self {
            id: id.into(),
            title: title.into(),
            components,
        };
        slide.ensure_unique_components()?;
        Ok(slide)
    }

    #[must_use]
    pub fn component(&self, id: &ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| &c.id == id)
    }

    fn from_value(index: usize, value: Value) -> Result<Self, LessonError> {
        let Value::Object(mut raw) = value else {
            return Err(LessonError::MalformedSlide { index });
        };

        let id = SlideId::new(
            raw.remove("id")
                .and_then(identifier)
                .unwrap_or_else(|| format!("slide-{}", index + 1)),
        );
        let title = text(raw.remove("title"));
        let components = match raw.remove("components") {
            Some(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| Component::from_value(&id, i, item))
                .collect::<Result<Vec<_>, _>>()?,
            _ => Vec::new(),
        };

        Self::new(id, title, components)
    }

    fn ensure_unique_components(&self) -> Result<(), LessonError> {
        let mut seen = HashSet::with_capacity(self.components.len());
        for component in &self.components {
            if !seen.insert(&component.id) {
                return Err(LessonError::DuplicateComponentId {
                    slide: self.id.clone(),
                    component: component.id.clone(),
                });
            }
        }
        Ok(())
    }
}

//
// ─── LESSON ────────────────────────────────────────────────────────────────────
//

/// Top-level lesson document: metadata plus ordered slides.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lesson {
    id: LessonId,
    title: String,
    description: String,
    author: String,
    level: String,
    duration: u32,
    slides: Vec<Slide>,
}

/// Descriptive metadata shown next to the slides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonInfo {
    pub title: String,
    pub description: String,
    pub author: String,
    pub level: String,
    pub duration_minutes: u32,
}

impl Lesson {
    /// Creates a lesson with empty metadata.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::MissingId` if `id` is blank.
    pub fn new(
        id: impl Into<LessonId>,
        title: impl Into<String>,
        slides: Vec<Slide>,
    ) -> Result<Self, LessonError> {
        let id = id.into();
        if id.as_str().trim().is_empty() {
            return Err(LessonError::MissingId);
        }
        Ok(Self {
            id,
            title: title.into(),
            description: String::new(),
            author: String::new(),
            level: String::new(),
            duration: 0,
            slides,
        })
    }

    /// Attach descriptive metadata.
    #[must_use]
    pub fn with_info(mut self, info: LessonInfo) -> Self {
        self.title = info.title;
        self.description = info.description;
        self.author = info.author;
        self.level = info.level;
        self.duration = info.duration_minutes;
        self
    }

    /// Parse and validate a lesson from raw JSON text.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::Json` for unparseable text, or any structural
    /// error reported by [`Lesson::from_value`].
    pub fn from_json_str(raw: &str) -> Result<Self, LessonError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| LessonError::Json(e.to_string()))?;
        Self::from_value(value)
    }

    /// Validate and normalize an already-deserialized value.
    ///
    /// Only the shape needed by the runtime is checked: a non-empty `id`,
    /// `slides` as an array of objects, and unique component ids per slide.
    /// Component props are passed through untouched.
    ///
    /// # Errors
    ///
    /// Returns the first `LessonError` encountered.
    pub fn from_value(value: Value) -> Result<Self, LessonError> {
        let Value::Object(mut raw) = value else {
            return Err(LessonError::NotAnObject);
        };

        let id = raw
            .remove("id")
            .and_then(identifier)
            .ok_or(LessonError::MissingId)?;
        let Some(Value::Array(raw_slides)) = raw.remove("slides") else {
            return Err(LessonError::SlidesNotArray);
        };

        let slides = raw_slides
            .into_iter()
            .enumerate()
            .map(|(index, slide)| Slide::from_value(index, slide))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: LessonId::new(id),
            title: text(raw.remove("title")),
            description: text(raw.remove("description")),
            author: text(raw.remove("author")),
            level: text(raw.remove("level")),
            duration: minutes(raw.remove("duration")),
            slides,
        })
    }

    #[must_use]
    pub fn id(&self) -> &LessonId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    #[must_use]
    pub fn level(&self) -> &str {
        &self.level
    }

    /// Expected duration in minutes.
    #[must_use]
    pub fn duration(&self) -> u32 {
        self.duration
    }

    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    #[must_use]
    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// A lesson without slides loads, but there is nothing to navigate.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.slides.is_empty()
    }

    /// Iterates every component of every slide in navigation order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.slides.iter().flat_map(|s| s.components.iter())
    }

    #[must_use]
    pub fn info(&self) -> LessonInfo {
        LessonInfo {
            title: self.title.clone(),
            description: self.description.clone(),
            author: self.author.clone(),
            level: self.level.clone(),
            duration_minutes: self.duration,
        }
    }
}

//
// ─── FIELD HELPERS ─────────────────────────────────────────────────────────────
//

/// Accepts non-blank strings and non-zero numbers as identifiers.
fn identifier(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn text(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

// Clamped into range first, so the cast cannot truncate.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn minutes(value: Option<Value>) -> u32 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match raw {
        Some(m) if m.is_finite() && m > 0.0 => m.round().min(f64::from(u32::MAX)) as u32,
        _ => 0,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "id": "lesson-1",
            "title": "Variables",
            "description": "Learn about variables",
            "author": "A. Teacher",
            "level": "Beginner",
            "duration": 30,
            "slides": [
                {
                    "id": "s1",
                    "title": "Intro",
                    "components": [
                        { "id": "c1", "type": "heading", "props": { "content": "Hello" } },
                        { "id": "c2", "type": "quiz", "props": { "points": 5 } }
                    ]
                },
                { "id": "s2", "title": "Outro", "components": [] }
            ]
        })
    }

    #[test]
    fn parses_full_lesson() {
        let lesson = Lesson::from_value(sample()).unwrap();
        assert_eq!(lesson.id().as_str(), "lesson-1");
        assert_eq!(lesson.title(), "Variables");
        assert_eq!(lesson.author(), "A. Teacher");
        assert_eq!(lesson.duration(), 30);
        assert_eq!(lesson.slide_count(), 2);
        assert_eq!(lesson.slides()[0].components[1].kind, "quiz");
        assert_eq!(lesson.slides()[0].components[1].declared_points(), Some(5));
    }

    #[test]
    fn props_pass_through_unmodified() {
        let lesson = Lesson::from_value(sample()).unwrap();
        let heading = &lesson.slides()[0].components[0];
        assert_eq!(heading.props.get("content"), Some(&json!("Hello")));
    }

    #[test]
    fn rejects_non_object() {
        let err = Lesson::from_value(json!([1, 2, 3])).unwrap_err();
        assert_eq!(err, LessonError::NotAnObject);
    }

    #[test]
    fn rejects_missing_or_blank_id() {
        let err = Lesson::from_value(json!({ "slides": [] })).unwrap_err();
        assert_eq!(err, LessonError::MissingId);

        let err = Lesson::from_value(json!({ "id": "  ", "slides": [] })).unwrap_err();
        assert_eq!(err, LessonError::MissingId);
    }

    #[test]
    fn rejects_slides_that_are_not_an_array() {
        let err = Lesson::from_value(json!({ "id": "x", "slides": {} })).unwrap_err();
        assert_eq!(err, LessonError::SlidesNotArray);

        let err = Lesson::from_value(json!({ "id": "x" })).unwrap_err();
        assert_eq!(err, LessonError::SlidesNotArray);
    }

    #[test]
    fn accepts_empty_slides_but_marks_unusable() {
        let lesson = Lesson::from_value(json!({ "id": "x", "slides": [] })).unwrap();
        assert!(!lesson.is_usable());
    }

    #[test]
    fn numeric_id_is_normalized() {
        let lesson = Lesson::from_value(json!({ "id": 42, "slides": [] })).unwrap();
        assert_eq!(lesson.id().as_str(), "42");
    }

    #[test]
    fn rejects_duplicate_component_ids() {
        let err = Lesson::from_value(json!({
            "id": "x",
            "slides": [{ "id": "s1", "components": [
                { "id": "c", "type": "paragraph" },
                { "id": "c", "type": "heading" }
            ]}]
        }))
        .unwrap_err();
        assert!(matches!(err, LessonError::DuplicateComponentId { .. }));
    }

    #[test]
    fn tolerates_missing_type_and_bad_props() {
        let lesson = Lesson::from_value(json!({
            "id": "x",
            "slides": [{ "components": [{ "props": "oops" }] }]
        }))
        .unwrap();
        let slide = &lesson.slides()[0];
        assert_eq!(slide.id.as_str(), "slide-1");
        assert_eq!(slide.components[0].id.as_str(), "component-1");
        assert_eq!(slide.components[0].kind, "");
        assert!(slide.components[0].props.is_empty());
    }

    #[test]
    fn reports_invalid_json() {
        let err = Lesson::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, LessonError::Json(_)));
    }

    #[test]
    fn duration_is_lenient() {
        let lesson =
            Lesson::from_value(json!({ "id": "x", "duration": "15", "slides": [] })).unwrap();
        assert_eq!(lesson.duration(), 15);
        let lesson =
            Lesson::from_value(json!({ "id": "x", "duration": -3, "slides": [] })).unwrap();
        assert_eq!(lesson.duration(), 0);
    }
}
