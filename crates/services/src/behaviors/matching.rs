use rand::Rng;
use rand::seq::SliceRandom;

use lesson_core::ScoreContext;
use lesson_core::model::PairId;
use lesson_core::model::props::{MatchingPair, MatchingPairsProps};

use super::IntentOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchingIntent {
    SelectLeft(PairId),
    /// Pick a right-hand entry; attempts a match if a left one is selected.
    SelectRight(PairId),
    Reset,
}

/// Left column in authored order, right column optionally shuffled.
///
/// Points are awarded when the last pair is matched. A completed board
/// ignores further selections until `reset`.
#[derive(Debug, Clone)]
pub struct MatchingState {
    title: String,
    pairs: Vec<MatchingPair>,
    right_order: Vec<usize>,
    matched: Vec<PairId>,
    selected_left: Option<PairId>,
    last_miss: Option<(PairId, PairId)>,
    points: u32,
}

impl MatchingState {
    #[must_use]
    pub fn new<R: Rng + ?Sized>(props: &MatchingPairsProps, rng: &mut R) -> Self {
        let pairs = props.normalized_pairs();
        let mut right_order: Vec<usize> = (0..pairs.len()).collect();
        if props.shuffle {
            right_order.shuffle(rng);
        }
        Self {
            title: props.title.clone(),
            pairs,
            right_order,
            matched: Vec::new(),
            selected_left: None,
            last_miss: None,
            points: props.points.unwrap_or(0),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.pairs.is_empty() && self.matched.len() == self.pairs.len()
    }

    fn contains(&self, id: &PairId) -> bool {
        self.pairs.iter().any(|p| &p.id == id)
    }

    pub fn handle(&mut self, intent: MatchingIntent, score: &mut dyn ScoreContext) -> IntentOutcome {
        match intent {
            MatchingIntent::SelectLeft(id) => {
                if !self.contains(&id) || self.matched.contains(&id) {
                    return IntentOutcome::Ignored;
                }
                self.selected_left = Some(id);
                self.last_miss = None;
                IntentOutcome::Updated
            }
            MatchingIntent::SelectRight(id) => {
                if !self.contains(&id) || self.matched.contains(&id) {
                    return IntentOutcome::Ignored;
                }
                let Some(left) = self.selected_left.take() else {
                    return IntentOutcome::Ignored;
                };
                if left != id {
                    self.last_miss = Some((left, id));
                    return IntentOutcome::Graded {
                        correct: false,
                        awarded: 0,
                    };
                }
                self.matched.push(id);
                self.last_miss = None;

                let mut awarded = 0;
                if self.is_complete() {
                    awarded = self.points;
                    score.add_points(awarded);
                    tracing::debug!(awarded, "all pairs matched");
                }
                IntentOutcome::Graded {
                    correct: true,
                    awarded,
                }
            }
            MatchingIntent::Reset => {
                self.matched.clear();
                self.selected_left = None;
                self.last_miss = None;
                IntentOutcome::Updated
            }
        }
    }

    #[must_use]
    pub fn view(&self) -> MatchingView {
        let entry = |pair: &MatchingPair, text: &str| MatchingEntry {
            id: pair.id.clone(),
            text: text.to_string(),
            matched: self.matched.contains(&pair.id),
            selected: self.selected_left.as_ref() == Some(&pair.id),
        };
        MatchingView {
            title: self.title.clone(),
            left: self.pairs.iter().map(|p| entry(p, &p.left)).collect(),
            right: self
                .right_order
                .iter()
                .filter_map(|i| self.pairs.get(*i))
                .map(|p| MatchingEntry {
                    selected: false,
                    ..entry(p, &p.right)
                })
                .collect(),
            last_miss: self.last_miss.is_some(),
            complete: self.is_complete(),
            progress_label: format!("Matched: {} of {}", self.matched.len(), self.pairs.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingEntry {
    pub id: PairId,
    pub text: String,
    pub matched: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingView {
    pub title: String,
    pub left: Vec<MatchingEntry>,
    pub right: Vec<MatchingEntry>,
    /// The previous attempt paired two different entries.
    pub last_miss: bool,
    pub complete: bool,
    pub progress_label: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::ScoreAggregator;
    use lesson_core::model::props::FromProps;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    fn state() -> MatchingState {
        let props = MatchingPairsProps::from_props(
            json!({
                "points": 15,
                "pairs": [
                    { "id": "p1", "left": "Vec", "right": "growable array" },
                    { "id": "p2", "left": "Box", "right": "heap pointer" }
                ]
            })
            .as_object()
            .unwrap(),
        );
        MatchingState::new(&props, &mut StdRng::seed_from_u64(9))
    }

    fn pair(s: &str) -> PairId {
        PairId::new(s)
    }

    #[test]
    fn completing_all_pairs_awards_per_attempt() {
        let mut state = state();
        let mut score = ScoreAggregator::new(15);

        state.handle(MatchingIntent::SelectLeft(pair("p1")), &mut score);
        state.handle(MatchingIntent::SelectRight(pair("p1")), &mut score);
        assert_eq!(score.current_earned(), 0);

        state.handle(MatchingIntent::SelectLeft(pair("p2")), &mut score);
        assert_eq!(
            state.handle(MatchingIntent::SelectRight(pair("p2")), &mut score),
            IntentOutcome::Graded {
                correct: true,
                awarded: 15
            }
        );
        assert!(state.is_complete());

        // A finished board accepts nothing more.
        assert_eq!(
            state.handle(MatchingIntent::SelectLeft(pair("p1")), &mut score),
            IntentOutcome::Ignored
        );
        assert_eq!(score.current_earned(), 15);

        state.handle(MatchingIntent::Reset, &mut score);
        for id in ["p1", "p2"] {
            state.handle(MatchingIntent::SelectLeft(pair(id)), &mut score);
            state.handle(MatchingIntent::SelectRight(pair(id)), &mut score);
        }
        assert!(state.is_complete());
        assert_eq!(score.current_earned(), 30);
    }

    #[test]
    fn pairs_without_ids_can_still_be_completed() {
        let props = MatchingPairsProps::from_props(
            json!({
                "points": 5,
                "shuffle": false,
                "pairs": [
                    { "left": "Vec", "right": "growable array" },
                    { "left": "Box", "right": "heap pointer" }
                ]
            })
            .as_object()
            .unwrap(),
        );
        let mut state = MatchingState::new(&props, &mut StdRng::seed_from_u64(1));
        let mut score = ScoreAggregator::new(5);

        let ids: Vec<PairId> = state.view().left.iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids, vec![pair("pair-1"), pair("pair-2")]);
        for id in ids {
            state.handle(MatchingIntent::SelectLeft(id.clone()), &mut score);
            state.handle(MatchingIntent::SelectRight(id), &mut score);
        }
        assert!(state.is_complete());
        assert_eq!(score.current_earned(), 5);
    }

    #[test]
    fn mismatch_clears_selection() {
        let mut state = state();
        let mut score = ScoreAggregator::new(15);
        state.handle(MatchingIntent::SelectLeft(pair("p1")), &mut score);
        assert_eq!(
            state.handle(MatchingIntent::SelectRight(pair("p2")), &mut score),
            IntentOutcome::Graded {
                correct: false,
                awarded: 0
            }
        );
        let view = state.view();
        assert!(view.last_miss);
        assert!(view.left.iter().all(|e| !e.selected && !e.matched));
    }

    #[test]
    fn right_without_left_is_ignored() {
        let mut state = state();
        let mut score = ScoreAggregator::new(15);
        assert_eq!(
            state.handle(MatchingIntent::SelectRight(pair("p1")), &mut score),
            IntentOutcome::Ignored
        );
    }

    #[test]
    fn shuffle_keeps_every_pair() {
        let view = state().view();
        let mut right: Vec<_> = view.right.iter().map(|e| e.id.to_string()).collect();
        right.sort();
        assert_eq!(right, vec!["p1", "p2"]);
    }
}
