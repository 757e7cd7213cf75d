use lesson_core::ScoreContext;
use lesson_core::model::props::FillInTheBlankProps;

use super::IntentOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillBlankIntent {
    Fill { index: usize, value: String },
    Submit,
    Reset,
}

/// Text with `___` gaps, graded all at once.
#[derive(Debug, Clone)]
pub struct FillBlankState {
    title: String,
    segments: Vec<String>,
    answers: Vec<String>,
    case_sensitive: bool,
    inputs: Vec<String>,
    results: Option<Vec<bool>>,
    points: u32,
}

impl FillBlankState {
    #[must_use]
    pub fn new(props: &FillInTheBlankProps) -> Self {
        let segments: Vec<String> = props.segments().into_iter().map(str::to_string).collect();
        let blanks = segments.len().saturating_sub(1);
        Self {
            title: props.title.clone(),
            segments,
            answers: props.answers.clone(),
            case_sensitive: props.case_sensitive,
            inputs: vec![String::new(); blanks],
            results: None,
            points: props.points.unwrap_or(0),
        }
    }

    #[must_use]
    pub fn blank_count(&self) -> usize {
        self.inputs.len()
    }

    fn matches(&self, index: usize) -> bool {
        let Some(expected) = self.answers.get(index) else {
            return false;
        };
        let given = self.inputs[index].trim();
        let expected = expected.trim();
        if self.case_sensitive {
            given == expected
        } else {
            given.to_lowercase() == expected.to_lowercase()
        }
    }

    pub fn handle(&mut self, intent: FillBlankIntent, score: &mut dyn ScoreContext) -> IntentOutcome {
        match intent {
            FillBlankIntent::Fill { index, value } => {
                if self.results.is_some() || index >= self.inputs.len() {
                    return IntentOutcome::Ignored;
                }
                self.inputs[index] = value;
                IntentOutcome::Updated
            }
            FillBlankIntent::Submit => {
                if self.results.is_some() || self.inputs.is_empty() {
                    return IntentOutcome::Ignored;
                }
                let results: Vec<bool> = (0..self.inputs.len()).map(|i| self.matches(i)).collect();
                let correct = results.iter().all(|ok| *ok);
                self.results = Some(results);

                let awarded = if correct { self.points } else { 0 };
                if correct {
                    score.add_points(awarded);
                }
                IntentOutcome::Graded { correct, awarded }
            }
            FillBlankIntent::Reset => {
                self.inputs.iter_mut().for_each(String::clear);
                self.results = None;
                IntentOutcome::Updated
            }
        }
    }

    #[must_use]
    pub fn view(&self) -> FillBlankView {
        FillBlankView {
            title: self.title.clone(),
            segments: self.segments.clone(),
            blanks: self
                .inputs
                .iter()
                .enumerate()
                .map(|(i, value)| BlankView {
                    value: value.clone(),
                    correct: self.results.as_ref().and_then(|r| r.get(i).copied()),
                    expected: self
                        .results
                        .as_ref()
                        .filter(|r| r.get(i) == Some(&false))
                        .and_then(|_| self.answers.get(i).cloned()),
                })
                .collect(),
            submitted: self.results.is_some(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlankView {
    pub value: String,
    pub correct: Option<bool>,
    /// Shown for wrong answers after submitting.
    pub expected: Option<String>,
}

/// `segments` interleave with `blanks`: segment, blank, segment, ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillBlankView {
    pub title: String,
    pub segments: Vec<String>,
    pub blanks: Vec<BlankView>,
    pub submitted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::ScoreAggregator;
    use lesson_core::model::props::FromProps;
    use serde_json::json;

    fn state(case_sensitive: bool) -> FillBlankState {
        let props = FillInTheBlankProps::from_props(
            json!({
                "text": "Rust was started at ___ and hit 1.0 in ___.",
                "answers": ["Mozilla", "2015"],
                "caseSensitive": case_sensitive,
                "points": 10
            })
            .as_object()
            .unwrap(),
        );
        FillBlankState::new(&props)
    }

    fn fill(index: usize, value: &str) -> FillBlankIntent {
        FillBlankIntent::Fill {
            index,
            value: value.to_string(),
        }
    }

    #[test]
    fn case_insensitive_by_default() {
        let mut state = state(false);
        let mut score = ScoreAggregator::new(10);
        state.handle(fill(0, " mozilla "), &mut score);
        state.handle(fill(1, "2015"), &mut score);
        assert_eq!(
            state.handle(FillBlankIntent::Submit, &mut score),
            IntentOutcome::Graded {
                correct: true,
                awarded: 10
            }
        );
    }

    #[test]
    fn case_sensitive_rejects_wrong_case() {
        let mut state = state(true);
        let mut score = ScoreAggregator::new(10);
        state.handle(fill(0, "mozilla"), &mut score);
        state.handle(fill(1, "2015"), &mut score);
        state.handle(FillBlankIntent::Submit, &mut score);

        let view = state.view();
        assert_eq!(view.blanks[0].correct, Some(false));
        assert_eq!(view.blanks[0].expected.as_deref(), Some("Mozilla"));
        assert_eq!(view.blanks[1].expected, None);
        assert_eq!(score.current_earned(), 0);
    }

    #[test]
    fn out_of_range_blank_is_ignored() {
        let mut state = state(false);
        let mut score = ScoreAggregator::new(10);
        assert_eq!(state.blank_count(), 2);
        assert_eq!(state.handle(fill(5, "x"), &mut score), IntentOutcome::Ignored);
    }

    #[test]
    fn each_attempt_is_graded_once() {
        let mut state = state(false);
        let mut score = ScoreAggregator::new(10);
        state.handle(fill(0, "Mozilla"), &mut score);
        state.handle(fill(1, "2015"), &mut score);
        state.handle(FillBlankIntent::Submit, &mut score);
        assert_eq!(state.handle(FillBlankIntent::Submit, &mut score), IntentOutcome::Ignored);
        assert_eq!(score.current_earned(), 10);

        state.handle(FillBlankIntent::Reset, &mut score);
        state.handle(fill(0, "Mozilla"), &mut score);
        state.handle(fill(1, "2015"), &mut score);
        state.handle(FillBlankIntent::Submit, &mut score);
        assert_eq!(score.current_earned(), 20);
    }
}
