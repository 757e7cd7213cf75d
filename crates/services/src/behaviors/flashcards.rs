use lesson_core::model::props::{Flashcard, FlashcardsProps};

use super::IntentOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashcardsIntent {
    Flip,
    Next,
    Previous,
}

/// Deck of two-sided cards. Never scores.
#[derive(Debug, Clone)]
pub struct FlashcardsState {
    title: String,
    cards: Vec<Flashcard>,
    current: usize,
    flipped: bool,
}

impl FlashcardsState {
    #[must_use]
    pub fn new(props: &FlashcardsProps) -> Self {
        Self {
            title: props.title.clone(),
            cards: props.cards.clone(),
            current: 0,
            flipped: false,
        }
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn handle(&mut self, intent: FlashcardsIntent) -> IntentOutcome {
        if self.cards.is_empty() {
            return IntentOutcome::Ignored;
        }
        match intent {
            FlashcardsIntent::Flip => {
                self.flipped = !self.flipped;
            }
            // Moving to another card always shows its front first.
            FlashcardsIntent::Next => {
                if self.current + 1 >= self.cards.len() {
                    return IntentOutcome::Ignored;
                }
                self.current += 1;
                self.flipped = false;
            }
            FlashcardsIntent::Previous => {
                if self.current == 0 {
                    return IntentOutcome::Ignored;
                }
                self.current -= 1;
                self.flipped = false;
            }
        }
        IntentOutcome::Updated
    }

    #[must_use]
    pub fn view(&self) -> FlashcardsView {
        let Some(card) = self.cards.get(self.current) else {
            return FlashcardsView::Empty {
                title: self.title.clone(),
                message: "No flashcards available".to_string(),
            };
        };
        FlashcardsView::Card {
            title: self.title.clone(),
            text: if self.flipped {
                card.back.clone()
            } else {
                card.front.clone()
            },
            flipped: self.flipped,
            counter_label: format!("Card {} of {}", self.current + 1, self.cards.len()),
            has_previous: self.current > 0,
            has_next: self.current + 1 < self.cards.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlashcardsView {
    Empty {
        title: String,
        message: String,
    },
    Card {
        title: String,
        text: String,
        flipped: bool,
        counter_label: String,
        has_previous: bool,
        has_next: bool,
    },
}
