//! Runtime state for every mounted component.
//!
//! A component is mounted when its slide becomes current and dropped when
//! the learner leaves the slide. Interactive behaviors own their local
//! state and report earned points through the borrowed [`ScoreContext`].

mod code_editor;
mod content;
mod drag_drop;
mod fallback;
mod fill_blank;
mod flashcards;
mod hotspot;
mod matching;
mod quiz;
mod score_board;

use rand::Rng;

use lesson_core::ScoreContext;
use lesson_core::model::props::{
    BulletListProps, CodeEditorProps, DragDropProps, FillInTheBlankProps, FlashcardsProps,
    FromProps, HeadingProps, HotspotProps, ImageProps, MatchingPairsProps, ParagraphProps,
    QuizProps, ScoreBoardProps,
};
use lesson_core::model::{Component, ComponentId};

use crate::error::IntentError;
use crate::registry::BehaviorKind;

pub use code_editor::{CodeEditorIntent, CodeEditorState, CodeEditorView};
pub use content::{HeadingView, ImageView, ListView, TextView};
pub use drag_drop::{DragDropIntent, DragDropState, DragDropView, DragItemView, DropZoneView};
pub use fallback::FallbackView;
pub use fill_blank::{BlankView, FillBlankIntent, FillBlankState, FillBlankView};
pub use flashcards::{FlashcardsIntent, FlashcardsState, FlashcardsView};
pub use hotspot::{HotspotIntent, HotspotMarker, HotspotState, HotspotView};
pub use matching::{MatchingEntry, MatchingIntent, MatchingState, MatchingView};
pub use quiz::{AnswerMark, QuestionPhase, QuizIntent, QuizOptionView, QuizState, QuizView};
pub use score_board::{ScoreBoardState, ScoreBoardView};

//
// ─── INTENTS ───────────────────────────────────────────────────────────────────
//

/// Learner input addressed to one mounted component.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentIntent {
    Quiz(QuizIntent),
    Flashcards(FlashcardsIntent),
    Hotspot(HotspotIntent),
    Matching(MatchingIntent),
    DragDrop(DragDropIntent),
    FillBlank(FillBlankIntent),
    CodeEditor(CodeEditorIntent),
    /// One animation frame of a score board.
    Tick,
}

impl ComponentIntent {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Quiz(_) => "quiz",
            Self::Flashcards(_) => "flashcards",
            Self::Hotspot(_) => "hotspot",
            Self::Matching(_) => "matching",
            Self::DragDrop(_) => "drag-and-drop",
            Self::FillBlank(_) => "fill-in-the-blank",
            Self::CodeEditor(_) => "code editor",
            Self::Tick => "tick",
        }
    }
}

/// What handling an intent did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentOutcome {
    /// Not applicable in the current state.
    Ignored,
    Updated,
    /// An answer was graded. `awarded` is what reached the aggregator.
    Graded { correct: bool, awarded: u32 },
}

//
// ─── MOUNTED COMPONENT ─────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub enum Behavior {
    Paragraph(ParagraphProps),
    Heading(HeadingProps),
    BulletList(BulletListProps),
    Image(ImageProps),
    Quiz(QuizState),
    Matching(MatchingState),
    DragDrop(DragDropState),
    Flashcards(FlashcardsState),
    Hotspot(HotspotState),
    FillBlank(FillBlankState),
    CodeEditor(CodeEditorState),
    ScoreBoard(ScoreBoardState),
    Fallback(String),
}

/// A component instance on the current slide.
#[derive(Debug, Clone)]
pub struct MountedComponent {
    id: ComponentId,
    kind: BehaviorKind,
    behavior: Behavior,
}

impl MountedComponent {
    /// Build fresh state for `component` using the resolved behavior.
    pub fn mount<R: Rng + ?Sized>(
        kind: BehaviorKind,
        component: &Component,
        score: &dyn ScoreContext,
        rng: &mut R,
    ) -> Self {
        let props = &component.props;
        let behavior = match kind {
            BehaviorKind::Paragraph => Behavior::Paragraph(ParagraphProps::from_props(props)),
            BehaviorKind::Heading => Behavior::Heading(HeadingProps::from_props(props)),
            BehaviorKind::BulletList => Behavior::BulletList(BulletListProps::from_props(props)),
            BehaviorKind::Image => Behavior::Image(ImageProps::from_props(props)),
            BehaviorKind::Quiz => Behavior::Quiz(QuizState::new(&QuizProps::from_props(props), rng)),
            BehaviorKind::MatchingPairs => Behavior::Matching(MatchingState::new(
                &MatchingPairsProps::from_props(props),
                rng,
            )),
            BehaviorKind::DragDrop => {
                Behavior::DragDrop(DragDropState::new(&DragDropProps::from_props(props)))
            }
            BehaviorKind::Flashcards => {
                Behavior::Flashcards(FlashcardsState::new(&FlashcardsProps::from_props(props)))
            }
            BehaviorKind::Hotspot => {
                Behavior::Hotspot(HotspotState::new(&HotspotProps::from_props(props)))
            }
            BehaviorKind::FillInTheBlank => Behavior::FillBlank(FillBlankState::new(
                &FillInTheBlankProps::from_props(props),
            )),
            BehaviorKind::CodeEditor => {
                Behavior::CodeEditor(CodeEditorState::new(&CodeEditorProps::from_props(props)))
            }
            BehaviorKind::ScoreBoard => Behavior::ScoreBoard(ScoreBoardState::new(
                &ScoreBoardProps::from_props(props),
                score,
            )),
            BehaviorKind::Fallback => Behavior::Fallback(component.kind.clone()),
        };

        Self {
            id: component.id.clone(),
            kind,
            behavior,
        }
    }

    #[must_use]
    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> BehaviorKind {
        self.kind
    }

    #[must_use]
    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    /// Route an intent to the component's state machine.
    ///
    /// # Errors
    ///
    /// Returns `IntentError::Unsupported` when the intent is meant for a
    /// different kind of component. Fallback components ignore everything.
    pub fn handle(
        &mut self,
        intent: ComponentIntent,
        score: &mut dyn ScoreContext,
    ) -> Result<IntentOutcome, IntentError> {
        let outcome = match (&mut self.behavior, intent) {
            (Behavior::Quiz(state), ComponentIntent::Quiz(i)) => state.handle(i, score),
            (Behavior::Matching(state), ComponentIntent::Matching(i)) => state.handle(i, score),
            (Behavior::DragDrop(state), ComponentIntent::DragDrop(i)) => state.handle(i, score),
            (Behavior::FillBlank(state), ComponentIntent::FillBlank(i)) => state.handle(i, score),
            (Behavior::CodeEditor(state), ComponentIntent::CodeEditor(i)) => {
                state.handle(i, score)
            }
            (Behavior::Flashcards(state), ComponentIntent::Flashcards(i)) => state.handle(i),
            (Behavior::Hotspot(state), ComponentIntent::Hotspot(i)) => state.handle(i),
            (Behavior::ScoreBoard(state), ComponentIntent::Tick) => state.tick(score),
            (Behavior::Fallback(_), _) => IntentOutcome::Ignored,
            (_, intent) => {
                return Err(IntentError::Unsupported {
                    kind: self.kind,
                    intent: intent.name(),
                });
            }
        };
        tracing::trace!(component = %self.id, ?outcome, "intent handled");
        Ok(outcome)
    }

    #[must_use]
    pub fn view(&self, score: &dyn ScoreContext) -> ComponentView {
        match &self.behavior {
            Behavior::Paragraph(p) => ComponentView::Paragraph(p.into()),
            Behavior::Heading(p) => ComponentView::Heading(p.into()),
            Behavior::BulletList(p) => ComponentView::List(p.into()),
            Behavior::Image(p) => ComponentView::Image(p.into()),
            Behavior::Quiz(s) => ComponentView::Quiz(s.view()),
            Behavior::Matching(s) => ComponentView::Matching(s.view()),
            Behavior::DragDrop(s) => ComponentView::DragDrop(s.view()),
            Behavior::Flashcards(s) => ComponentView::Flashcards(s.view()),
            Behavior::Hotspot(s) => ComponentView::Hotspot(s.view()),
            Behavior::FillBlank(s) => ComponentView::FillBlank(s.view()),
            Behavior::CodeEditor(s) => ComponentView::CodeEditor(s.view()),
            Behavior::ScoreBoard(s) => ComponentView::ScoreBoard(s.view(score)),
            Behavior::Fallback(tag) => ComponentView::Fallback(FallbackView::for_tag(tag)),
        }
    }
}

/// Presentation snapshot of one component.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentView {
    Paragraph(TextView),
    Heading(HeadingView),
    List(ListView),
    Image(ImageView),
    Quiz(QuizView),
    Matching(MatchingView),
    DragDrop(DragDropView),
    Flashcards(FlashcardsView),
    Hotspot(HotspotView),
    FillBlank(FillBlankView),
    CodeEditor(CodeEditorView),
    ScoreBoard(ScoreBoardView),
    Fallback(FallbackView),
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::ScoreAggregator;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    fn mount(kind: BehaviorKind, tag: &str, props: serde_json::Value) -> MountedComponent {
        let component = Component::new("c1", tag, props.as_object().cloned().unwrap_or_default());
        MountedComponent::mount(
            kind,
            &component,
            &ScoreAggregator::default(),
            &mut StdRng::seed_from_u64(0),
        )
    }

    #[test]
    fn mismatched_intent_is_rejected() {
        let mut heading = mount(BehaviorKind::Heading, "heading", json!({ "content": "Hi" }));
        let mut score = ScoreAggregator::default();
        let err = heading
            .handle(ComponentIntent::Quiz(QuizIntent::Submit), &mut score)
            .unwrap_err();
        assert_eq!(
            err,
            IntentError::Unsupported {
                kind: BehaviorKind::Heading,
                intent: "quiz"
            }
        );
    }

    #[test]
    fn fallback_keeps_declared_tag() {
        let mut video = mount(BehaviorKind::Fallback, "video", json!({}));
        assert_eq!(
            video.handle(ComponentIntent::Tick, &mut ScoreAggregator::default()),
            Ok(IntentOutcome::Ignored)
        );
        assert_eq!(
            video.view(&ScoreAggregator::default()),
            ComponentView::Fallback(FallbackView::for_tag("video"))
        );
    }

    #[test]
    fn quiz_routes_through_score_context() {
        let mut quiz = mount(
            BehaviorKind::Quiz,
            "quiz",
            json!({
                "points": 10,
                "questions": [{ "id": "q", "options": [{ "id": "a", "isCorrect": true }] }]
            }),
        );
        let mut score = ScoreAggregator::new(10);
        quiz.handle(
            ComponentIntent::Quiz(QuizIntent::Select("a".into())),
            &mut score,
        )
        .unwrap();
        let outcome = quiz
            .handle(ComponentIntent::Quiz(QuizIntent::Submit), &mut score)
            .unwrap();
        assert_eq!(
            outcome,
            IntentOutcome::Graded {
                correct: true,
                awarded: 10
            }
        );
        assert_eq!(score.current_earned(), 10);
    }
}
