use rand::Rng;
use rand::seq::SliceRandom;

use lesson_core::ScoreContext;
use lesson_core::model::props::{QuizOption, QuizProps, QuizQuestion};
use lesson_core::model::{OptionId, QuestionId};

use super::IntentOutcome;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Per-question progress.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QuestionPhase {
    #[default]
    Unanswered,
    Selected(OptionId),
    Submitted { selected: OptionId, correct: bool },
}

impl QuestionPhase {
    #[must_use]
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted { .. })
    }

    #[must_use]
    pub fn selected(&self) -> Option<&OptionId> {
        match self {
            Self::Unanswered => None,
            Self::Selected(id) | Self::Submitted { selected: id, .. } => Some(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizIntent {
    /// Choose an option on the current question.
    Select(OptionId),
    /// Grade the current question.
    Submit,
    Next,
    Previous,
    Reset,
}

/// Multi-question quiz.
///
/// State is kept per question position. Navigating between questions never
/// touches it; only `reset` does.
#[derive(Debug, Clone)]
pub struct QuizState {
    questions: Vec<QuizQuestion>,
    /// Option indices in display order, drawn once at mount.
    display_order: Vec<Vec<usize>>,
    phases: Vec<QuestionPhase>,
    current: usize,
    score: u32,
    points: u32,
    show_explanation: bool,
}

impl QuizState {
    #[must_use]
    pub fn new<R: Rng + ?Sized>(props: &QuizProps, rng: &mut R) -> Self {
        let questions = props.normalized_questions();
        let display_order = questions
            .iter()
            .map(|q| {
                let mut order: Vec<usize> = (0..q.options.len()).collect();
                if props.shuffle_options {
                    order.shuffle(&mut *rng);
                }
                order
            })
            .collect();
        let count = questions.len();

        Self {
            questions,
            display_order,
            phases: vec![QuestionPhase::Unanswered; count],
            current: 0,
            score: 0,
            points: props.points,
            show_explanation: props.show_explanation,
        }
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn phase(&self, index: usize) -> Option<&QuestionPhase> {
        self.phases.get(index)
    }

    /// Phase of the question with the given id.
    #[must_use]
    pub fn phase_of(&self, id: &QuestionId) -> Option<&QuestionPhase> {
        let index = self.questions.iter().position(|q| &q.id == id)?;
        self.phases.get(index)
    }

    /// Local score of the current attempt.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Points available locally: `points` per question.
    #[must_use]
    pub fn total_points(&self) -> u32 {
        let count = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        self.points.saturating_mul(count)
    }

    /// Options of a question in display order.
    #[must_use]
    pub fn displayed_options(&self, index: usize) -> Vec<&QuizOption> {
        let (Some(question), Some(order)) = (self.questions.get(index), self.display_order.get(index))
        else {
            return Vec::new();
        };
        order.iter().filter_map(|i| question.options.get(*i)).collect()
    }

    #[must_use]
    pub fn show_explanation(&self) -> bool {
        self.show_explanation
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    pub fn handle(&mut self, intent: QuizIntent, score: &mut dyn ScoreContext) -> IntentOutcome {
        match intent {
            QuizIntent::Select(option) => self.select(option),
            QuizIntent::Submit => self.submit(score),
            QuizIntent::Next => self.next(),
            QuizIntent::Previous => self.previous(),
            QuizIntent::Reset => self.reset(),
        }
    }

    /// Select an option on the current question.
    ///
    /// Ignored once the question is submitted, or if the option does not
    /// belong to the question.
    pub fn select(&mut self, option: OptionId) -> IntentOutcome {
        let Some(question) = self.questions.get(self.current) else {
            return IntentOutcome::Ignored;
        };
        if question.option(&option).is_none() {
            return IntentOutcome::Ignored;
        }
        let phase = &mut self.phases[self.current];
        if phase.is_submitted() {
            return IntentOutcome::Ignored;
        }
        *phase = QuestionPhase::Selected(option);
        IntentOutcome::Updated
    }

    /// Grade the current question.
    ///
    /// A correct answer adds `points` to the local score and to the
    /// aggregator. Only a `Selected` question can be graded, so a question
    /// awards again only after `reset` clears it.
    pub fn submit(&mut self, score: &mut dyn ScoreContext) -> IntentOutcome {
        let index = self.current;
        let Some(question) = self.questions.get(index) else {
            return IntentOutcome::Ignored;
        };
        let QuestionPhase::Selected(selected) = &self.phases[index] else {
            return IntentOutcome::Ignored;
        };

        let correct = question.option(selected).is_some_and(|o| o.is_correct);
        let selected = selected.clone();
        self.phases[index] = QuestionPhase::Submitted {
            selected,
            correct,
        };

        let awarded = if correct { self.points } else { 0 };
        if correct {
            self.score = self.score.saturating_add(awarded);
            score.add_points(awarded);
        }
        tracing::debug!(question = %question.id, correct, awarded, "quiz question submitted");

        IntentOutcome::Graded { correct, awarded }
    }

    pub fn next(&mut self) -> IntentOutcome {
        if self.current + 1 >= self.questions.len() {
            return IntentOutcome::Ignored;
        }
        self.current += 1;
        IntentOutcome::Updated
    }

    pub fn previous(&mut self) -> IntentOutcome {
        if self.current == 0 {
            return IntentOutcome::Ignored;
        }
        self.current -= 1;
        IntentOutcome::Updated
    }

    /// Clear every answer and the local score. Points already added to the
    /// aggregator are not retracted.
    pub fn reset(&mut self) -> IntentOutcome {
        self.phases.fill(QuestionPhase::Unanswered);
        self.score = 0;
        self.current = 0;
        IntentOutcome::Updated
    }

    //
    // ─── VIEW ──────────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn view(&self) -> QuizView {
        let Some(question) = self.current_question() else {
            return QuizView::default();
        };
        let phase = &self.phases[self.current];
        let submitted = phase.is_submitted();
        let selected = phase.selected();

        let options = self
            .displayed_options(self.current)
            .into_iter()
            .map(|option| {
                let is_selected = selected == Some(&option.id);
                let mark = match (submitted, is_selected, option.is_correct) {
                    (true, _, true) => Some(AnswerMark::Correct),
                    (true, true, false) => Some(AnswerMark::Incorrect),
                    _ => None,
                };
                QuizOptionView {
                    id: option.id.clone(),
                    text: option.text.clone(),
                    selected: is_selected,
                    mark,
                }
            })
            .collect();

        let explanation = if submitted && self.show_explanation {
            question.explanation().map(str::to_string)
        } else {
            None
        };

        QuizView {
            question: question.question.clone(),
            counter_label: format!(
                "Question {} of {}",
                self.current + 1,
                self.questions.len()
            ),
            options,
            submitted,
            can_submit: !submitted && selected.is_some(),
            can_reset: submitted,
            has_previous: self.current > 0,
            has_next: self.current + 1 < self.questions.len(),
            explanation,
            score_label: format!("Score: {}/{}", self.score, self.total_points()),
        }
    }
}

//
// ─── VIEW TYPES ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerMark {
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOptionView {
    pub id: OptionId,
    pub text: String,
    pub selected: bool,
    pub mark: Option<AnswerMark>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct QuizView {
    pub question: String,
    pub counter_label: String,
    pub options: Vec<QuizOptionView>,
    pub submitted: bool,
    pub can_submit: bool,
    pub can_reset: bool,
    pub has_previous: bool,
    pub has_next: bool,
    pub explanation: Option<String>,
    pub score_label: String,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
