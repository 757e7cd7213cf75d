//! Session-wide score aggregation.
//!
//! Interactive behaviors never see each other. They report earned points
//! through [`ScoreContext`], which the session lends them while handling
//! an intent.

/// Narrow capability handed to every mounted component.
///
/// `add_points` does not deduplicate. Each caller must invoke it at most
/// once per scoring event.
pub trait ScoreContext {
    /// Points earned so far in this lesson.
    fn current_earned(&self) -> u32;

    /// Points obtainable across the whole lesson, fixed at load time.
    fn obtainable_total(&self) -> u32;

    /// Credit `delta` points. Points are never taken back.
    fn add_points(&mut self, delta: u32);
}

/// Owner of the earned counter and the precomputed obtainable total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreAggregator {
    earned: u32,
    obtainable: u32,
}

impl ScoreAggregator {
    /// Fresh aggregator for a newly loaded lesson.
    #[must_use]
    pub fn new(obtainable: u32) -> Self {
        Self {
            earned: 0,
            obtainable,
        }
    }

    /// Earned share of the obtainable total, in percent, rounded.
    ///
    /// Returns 0 when nothing is obtainable. May exceed 100 if components
    /// award points they did not declare.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        percentage(self.earned, self.obtainable)
    }
}

impl ScoreContext for ScoreAggregator {
    fn current_earned(&self) -> u32 {
        self.earned
    }

    fn obtainable_total(&self) -> u32 {
        self.obtainable
    }

    fn add_points(&mut self, delta: u32) {
        self.earned = self.earned.saturating_add(delta);
        tracing::debug!(delta, earned = self.earned, "points added");
    }
}

/// `round(earned / total * 100)`, or 0 when `total` is 0.
#[must_use]
pub fn percentage(earned: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let pct = (f64::from(earned) / f64::from(total) * 100.0).round();
    // Non-negative, and clamped into range before the cast.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let pct = pct.min(f64::from(u32::MAX)) as u32;
    pct
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let score = ScoreAggregator::new(20);
        assert_eq!(score.current_earned(), 0);
        assert_eq!(score.obtainable_total(), 20);
    }

    #[test]
    fn add_points_accumulates_without_dedup() {
        let mut score = ScoreAggregator::new(20);
        score.add_points(10);
        score.add_points(10);
        assert_eq!(score.current_earned(), 20);
        assert_eq!(score.obtainable_total(), 20);
    }

    #[test]
    fn add_points_saturates() {
        let mut score = ScoreAggregator::new(0);
        score.add_points(u32::MAX);
        score.add_points(1);
        assert_eq!(score.current_earned(), u32::MAX);
    }

    #[test]
    fn percentage_handles_empty_total() {
        assert_eq!(percentage(5, 0), 0);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);

        let mut score = ScoreAggregator::new(40);
        score.add_points(10);
        assert_eq!(score.percentage(), 25);
    }
}
