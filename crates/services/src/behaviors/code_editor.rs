use lesson_core::ScoreContext;
use lesson_core::model::props::CodeEditorProps;

use super::IntentOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeEditorIntent {
    Edit(String),
    Submit,
    /// Show the reference solution. Forfeits the points.
    RevealSolution,
    Reset,
}

/// Code exercise compared against a reference solution.
///
/// Nothing is executed. A submission is correct when it equals the solution
/// after whitespace is normalized. A correct submission locks the editor
/// until `reset`; a wrong one can be edited and resubmitted.
#[derive(Debug, Clone)]
pub struct CodeEditorState {
    title: String,
    language: String,
    starter: String,
    solution: String,
    code: String,
    result: Option<bool>,
    revealed: bool,
    points: u32,
}

impl CodeEditorState {
    #[must_use]
    pub fn new(props: &CodeEditorProps) -> Self {
        Self {
            title: props.title.clone(),
            language: props.language.clone(),
            starter: props.starter_code.clone(),
            solution: props.solution.clone(),
            code: props.starter_code.clone(),
            result: None,
            revealed: false,
            points: props.points.unwrap_or(0),
        }
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn handle(&mut self, intent: CodeEditorIntent, score: &mut dyn ScoreContext) -> IntentOutcome {
        match intent {
            CodeEditorIntent::Edit(code) => {
                if self.result == Some(true) {
                    return IntentOutcome::Ignored;
                }
                self.code = code;
                self.result = None;
                IntentOutcome::Updated
            }
            CodeEditorIntent::Submit => {
                if self.solution.trim().is_empty() || self.result.is_some() {
                    return IntentOutcome::Ignored;
                }
                let correct = normalize(&self.code) == normalize(&self.solution);
                self.result = Some(correct);

                let awarded = if correct && !self.revealed { self.points } else { 0 };
                if awarded > 0 {
                    score.add_points(awarded);
                }
                IntentOutcome::Graded { correct, awarded }
            }
            CodeEditorIntent::RevealSolution => {
                if self.revealed || self.solution.trim().is_empty() {
                    return IntentOutcome::Ignored;
                }
                self.revealed = true;
                IntentOutcome::Updated
            }
            CodeEditorIntent::Reset => {
                self.code.clone_from(&self.starter);
                self.result = None;
                self.revealed = false;
                IntentOutcome::Updated
            }
        }
    }

    #[must_use]
    pub fn view(&self) -> CodeEditorView {
        CodeEditorView {
            title: self.title.clone(),
            language: self.language.clone(),
            code: self.code.clone(),
            result: self.result,
            solution: self.revealed.then(|| self.solution.clone()),
        }
    }
}

/// Collapse every whitespace run to a single space.
fn normalize(code: &str) -> String {
    code.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEditorView {
    pub title: String,
    pub language: String,
    pub code: String,
    pub result: Option<bool>,
    /// Present once revealed.
    pub solution: Option<String>,
}
