//! Type-tag dispatch for lesson components.

use std::collections::HashMap;
use std::fmt;

use lesson_core::model::props::QuizProps;
use lesson_core::model::{Component, Lesson};

/// Behavior implementations known to the viewer.
///
/// `Fallback` is the mandatory default arm for tags the registry does not
/// recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviorKind {
    Paragraph,
    Heading,
    BulletList,
    Image,
    Quiz,
    MatchingPairs,
    DragDrop,
    Flashcards,
    Hotspot,
    FillInTheBlank,
    CodeEditor,
    ScoreBoard,
    Fallback,
}

/// Grouping used by the lesson builder palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Content,
    Interactive,
    Gamified,
}

impl BehaviorKind {
    pub const ALL: [BehaviorKind; 13] = [
        BehaviorKind::Paragraph,
        BehaviorKind::Heading,
        BehaviorKind::BulletList,
        BehaviorKind::Image,
        BehaviorKind::Quiz,
        BehaviorKind::MatchingPairs,
        BehaviorKind::DragDrop,
        BehaviorKind::Flashcards,
        BehaviorKind::Hotspot,
        BehaviorKind::FillInTheBlank,
        BehaviorKind::CodeEditor,
        BehaviorKind::ScoreBoard,
        BehaviorKind::Fallback,
    ];

    /// Canonical type tag as written in lesson files.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            BehaviorKind::Paragraph => "paragraph",
            BehaviorKind::Heading => "heading",
            BehaviorKind::BulletList => "bulletList",
            BehaviorKind::Image => "image",
            BehaviorKind::Quiz => "quiz",
            BehaviorKind::MatchingPairs => "matchingPairs",
            BehaviorKind::DragDrop => "dragDrop",
            BehaviorKind::Flashcards => "flashcards",
            BehaviorKind::Hotspot => "hotspot",
            BehaviorKind::FillInTheBlank => "fillInTheBlank",
            BehaviorKind::CodeEditor => "codeEditor",
            BehaviorKind::ScoreBoard => "scoreBoard",
            BehaviorKind::Fallback => "fallback",
        }
    }

    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            BehaviorKind::Paragraph
            | BehaviorKind::Heading
            | BehaviorKind::BulletList
            | BehaviorKind::Image
            | BehaviorKind::Fallback => Category::Content,
            BehaviorKind::Quiz
            | BehaviorKind::MatchingPairs
            | BehaviorKind::DragDrop
            | BehaviorKind::Flashcards
            | BehaviorKind::Hotspot
            | BehaviorKind::FillInTheBlank
            | BehaviorKind::CodeEditor => Category::Interactive,
            BehaviorKind::ScoreBoard => Category::Gamified,
        }
    }

    /// Whether components of this kind contribute to the obtainable total.
    #[must_use]
    pub const fn is_scoring(self) -> bool {
        matches!(
            self,
            BehaviorKind::Quiz
                | BehaviorKind::MatchingPairs
                | BehaviorKind::DragDrop
                | BehaviorKind::FillInTheBlank
                | BehaviorKind::CodeEditor
        )
    }

    /// Points this component can contribute, read from its declared props.
    ///
    /// Only components that declare `points` count. A quiz contributes
    /// `points` per question.
    #[must_use]
    pub fn obtainable_points(self, component: &Component) -> u32 {
        if !self.is_scoring() {
            return 0;
        }
        let Some(points) = component.declared_points() else {
            return 0;
        };
        match self {
            BehaviorKind::Quiz => {
                let questions = QuizProps::declared_question_count(&component.props);
                points.saturating_mul(u32::try_from(questions).unwrap_or(u32::MAX))
            }
            _ => points,
        }
    }
}

impl fmt::Display for BehaviorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Maps component type tags to behaviors. `resolve` never fails.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    tags: HashMap<String, BehaviorKind>,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentRegistry {
    /// Registry with every built-in tag and the legacy aliases.
    #[must_use]
    pub fn new() -> Self {
        let mut tags: HashMap<String, BehaviorKind> = BehaviorKind::ALL
            .into_iter()
            .filter(|kind| *kind != BehaviorKind::Fallback)
            .map(|kind| (kind.tag().to_string(), kind))
            .collect();

        // Older lessons used a dedicated slide title component.
        tags.insert("slideTitle".to_string(), BehaviorKind::Heading);

        Self { tags }
    }

    /// Register an extra tag for an existing behavior.
    #[must_use]
    pub fn with_alias(mut self, tag: impl Into<String>, kind: BehaviorKind) -> Self {
        self.tags.insert(tag.into(), kind);
        self
    }

    /// Resolve a type tag, falling back for anything unrecognized.
    #[must_use]
    pub fn resolve(&self, tag: &str) -> BehaviorKind {
        if let Some(kind) = self.tags.get(tag) {
            return *kind;
        }
        tracing::debug!(tag, "unknown component type; using fallback");
        BehaviorKind::Fallback
    }

    #[must_use]
    pub fn is_known(&self, tag: &str) -> bool {
        self.tags.contains_key(tag)
    }

    /// Sum of declared point contributions across the whole lesson.
    #[must_use]
    pub fn obtainable_points(&self, lesson: &Lesson) -> u32 {
        lesson
            .components()
            .map(|c| self.resolve(&c.kind).obtainable_points(c))
            .fold(0_u32, u32::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn component(kind: &str, props: Value) -> Component {
        Component::new("c", kind, props.as_object().cloned().unwrap_or_default())
    }

    #[rstest]
    #[case("paragraph", BehaviorKind::Paragraph)]
    #[case("heading", BehaviorKind::Heading)]
    #[case("bulletList", BehaviorKind::BulletList)]
    #[case("image", BehaviorKind::Image)]
    #[case("quiz", BehaviorKind::Quiz)]
    #[case("matchingPairs", BehaviorKind::MatchingPairs)]
    #[case("dragDrop", BehaviorKind::DragDrop)]
    #[case("flashcards", BehaviorKind::Flashcards)]
    #[case("hotspot", BehaviorKind::Hotspot)]
    #[case("fillInTheBlank", BehaviorKind::FillInTheBlank)]
    #[case("codeEditor", BehaviorKind::CodeEditor)]
    #[case("scoreBoard", BehaviorKind::ScoreBoard)]
    #[case("slideTitle", BehaviorKind::Heading)]
    fn resolves_known_tags(#[case] tag: &str, #[case] expected: BehaviorKind) {
        let registry = ComponentRegistry::new();
        assert_eq!(registry.resolve(tag), expected);
        assert!(registry.is_known(tag));
    }

    #[rstest]
    #[case("")]
    #[case("video")]
    #[case("Quiz")]
    #[case("fallback")]
    #[case("🧩")]
    fn unknown_tags_fall_back(#[case] tag: &str) {
        let registry = ComponentRegistry::new();
        assert_eq!(registry.resolve(tag), BehaviorKind::Fallback);
    }

    #[test]
    fn aliases_can_be_added() {
        let registry = ComponentRegistry::new().with_alias("numberedList", BehaviorKind::BulletList);
        assert_eq!(registry.resolve("numberedList"), BehaviorKind::BulletList);
    }

    #[test]
    fn categories() {
        assert_eq!(BehaviorKind::Quiz.category(), Category::Interactive);
        assert_eq!(BehaviorKind::ScoreBoard.category(), Category::Gamified);
        assert_eq!(BehaviorKind::Image.category(), Category::Content);
    }

    #[test]
    fn quiz_points_scale_with_question_count() {
        let quiz = component(
            "quiz",
            json!({ "points": 10, "questions": [{ "id": "a" }, { "id": "b" }] }),
        );
        assert_eq!(BehaviorKind::Quiz.obtainable_points(&quiz), 20);
    }

    #[rstest]
    #[case::null_explanation(json!({ "id": "q3", "question": "C?", "explanation": null }))]
    #[case::numeric_option_id(json!({ "id": "q3", "question": "C?", "options": [{ "id": 3, "text": "x" }] }))]
    #[case::wrong_shape(json!("not a question"))]
    fn quiz_total_counts_every_authored_question(#[case] third: Value) {
        let quiz = component(
            "quiz",
            json!({
                "points": 10,
                "questions": [
                    { "id": "q1", "question": "A?" },
                    { "id": "q2", "question": "B?" },
                    third
                ]
            }),
        );
        assert_eq!(BehaviorKind::Quiz.obtainable_points(&quiz), 30);
    }

    #[test]
    fn undeclared_points_do_not_count() {
        let quiz = component("quiz", json!({ "questions": [{ "id": "a" }] }));
        assert_eq!(BehaviorKind::Quiz.obtainable_points(&quiz), 0);

        let pairs = component("matchingPairs", json!({ "points": 15 }));
        assert_eq!(BehaviorKind::MatchingPairs.obtainable_points(&pairs), 15);

        let cards = component("flashcards", json!({ "points": 15 }));
        assert_eq!(BehaviorKind::Flashcards.obtainable_points(&cards), 0);
    }
}
