use lesson_core::ScoreContext;
use lesson_core::model::props::ScoreBoardProps;
use lesson_core::score::percentage;

use super::IntentOutcome;

/// Animation length and frame interval, in milliseconds.
const ANIMATION_MS: f64 = 500.0;
const FRAME_MS: f64 = 16.0;

/// Read-only display of the session score.
///
/// With animation on, the shown number counts up towards the earned total
/// one `tick` at a time; every tick covers 1/31.25 of the gap measured when
/// the target last changed.
#[derive(Debug, Clone)]
pub struct ScoreBoardState {
    title: String,
    show_total: bool,
    show_percentage: bool,
    animation: bool,
    displayed: u32,
    start: u32,
    target: u32,
}

impl ScoreBoardState {
    #[must_use]
    pub fn new(props: &ScoreBoardProps, score: &dyn ScoreContext) -> Self {
        let earned = score.current_earned();
        let displayed = if props.animation { 0 } else { earned };
        Self {
            title: props.title.clone(),
            show_total: props.show_total,
            show_percentage: props.show_percentage,
            animation: props.animation,
            displayed,
            start: displayed,
            target: displayed,
        }
    }

    /// Number currently shown.
    #[must_use]
    pub fn displayed(&self) -> u32 {
        self.displayed
    }

    /// Advance the count-up by one frame.
    pub fn tick(&mut self, score: &dyn ScoreContext) -> IntentOutcome {
        let earned = score.current_earned();
        if self.displayed == earned {
            return IntentOutcome::Ignored;
        }
        if !self.animation || self.displayed > earned {
            self.displayed = earned;
            return IntentOutcome::Updated;
        }
        if self.target != earned {
            self.start = self.displayed;
            self.target = earned;
        }

        let gap = f64::from(self.target - self.start);
        // Bounded by the gap, which is a u32.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let increment = ((gap / (ANIMATION_MS / FRAME_MS)).ceil() as u32).max(1);
        self.displayed = self.displayed.saturating_add(increment).min(earned);
        IntentOutcome::Updated
    }

    #[must_use]
    pub fn view(&self, score: &dyn ScoreContext) -> ScoreBoardView {
        let earned = score.current_earned();
        let total = score.obtainable_total();
        ScoreBoardView {
            title: self.title.clone(),
            displayed: self.displayed,
            total: self.show_total.then_some(total),
            percentage: self.show_percentage.then(|| percentage(self.displayed, total)),
            settled: self.displayed == earned,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBoardView {
    pub title: String,
    pub displayed: u32,
    pub total: Option<u32>,
    pub percentage: Option<u32>,
    /// The animation has caught up with the earned score.
    pub settled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::ScoreAggregator;
    use lesson_core::model::props::FromProps;
    use serde_json::json;

    fn board(animation: bool, score: &ScoreAggregator) -> ScoreBoardState {
        let props = ScoreBoardProps::from_props(
            json!({ "animation": animation, "showPercentage": true })
                .as_object()
                .unwrap(),
        );
        ScoreBoardState::new(&props, score)
    }

    #[test]
    fn counts_up_to_earned() {
        let mut score = ScoreAggregator::new(100);
        score.add_points(100);
        let mut board = board(true, &score);
        assert_eq!(board.displayed(), 0);

        board.tick(&score);
        // ceil(100 / 31.25) = 4
        assert_eq!(board.displayed(), 4);
        // The percentage follows the animated number, not the live score.
        assert_eq!(board.view(&score).percentage, Some(4));
        assert!(!board.view(&score).settled);

        let mut frames = 1;
        while board.tick(&score) == IntentOutcome::Updated {
            frames += 1;
        }
        assert_eq!(board.displayed(), 100);
        assert_eq!(board.view(&score).percentage, Some(100));
        assert_eq!(frames, 25);
        assert!(board.view(&score).settled);
    }

    #[test]
    fn without_animation_shows_earned_immediately() {
        let mut score = ScoreAggregator::new(40);
        score.add_points(10);
        let mut board = board(false, &score);
        assert_eq!(board.displayed(), 10);

        score.add_points(10);
        board.tick(&score);
        let view = board.view(&score);
        assert_eq!(view.displayed, 20);
        assert_eq!(view.total, Some(40));
        assert_eq!(view.percentage, Some(50));
        assert_eq!(view.title, "Your Score");
    }
}
