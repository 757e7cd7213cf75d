use std::collections::HashMap;

use lesson_core::ScoreContext;
use lesson_core::model::props::{DragDropProps, DragItem, DropZone};
use lesson_core::model::{ItemId, ZoneId};

use super::IntentOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragDropIntent {
    /// Drop an item into a zone, replacing any earlier placement.
    Place { item: ItemId, zone: ZoneId },
    /// Return an item to the pool.
    Remove(ItemId),
    Check,
    Reset,
}

/// Sort items into zones, then check all placements at once.
#[derive(Debug, Clone)]
pub struct DragDropState {
    title: String,
    items: Vec<DragItem>,
    zones: Vec<DropZone>,
    placements: HashMap<ItemId, ZoneId>,
    checked: Option<bool>,
    points: u32,
}

impl DragDropState {
    #[must_use]
    pub fn new(props: &DragDropProps) -> Self {
        Self {
            title: props.title.clone(),
            items: props.normalized_items(),
            zones: props.normalized_zones(),
            placements: HashMap::new(),
            checked: None,
            points: props.points.unwrap_or(0),
        }
    }

    #[must_use]
    pub fn placement(&self, item: &ItemId) -> Option<&ZoneId> {
        self.placements.get(item)
    }

    pub fn handle(&mut self, intent: DragDropIntent, score: &mut dyn ScoreContext) -> IntentOutcome {
        match intent {
            DragDropIntent::Place { item, zone } => {
                let known_item = self.items.iter().any(|i| i.id == item);
                let known_zone = self.zones.iter().any(|z| z.id == zone);
                if !known_item || !known_zone || self.checked.is_some() {
                    return IntentOutcome::Ignored;
                }
                self.placements.insert(item, zone);
                IntentOutcome::Updated
            }
            DragDropIntent::Remove(item) => {
                if self.checked.is_some() || self.placements.remove(&item).is_none() {
                    return IntentOutcome::Ignored;
                }
                IntentOutcome::Updated
            }
            DragDropIntent::Check => {
                if self.checked.is_some()
                    || self.items.is_empty()
                    || self.placements.len() < self.items.len()
                {
                    return IntentOutcome::Ignored;
                }
                let correct = self
                    .items
                    .iter()
                    .all(|i| self.placements.get(&i.id) == Some(&i.zone_id));
                self.checked = Some(correct);

                let awarded = if correct { self.points } else { 0 };
                if correct {
                    score.add_points(awarded);
                }
                tracing::debug!(correct, awarded, "drag and drop checked");
                IntentOutcome::Graded { correct, awarded }
            }
            DragDropIntent::Reset => {
                self.placements.clear();
                self.checked = None;
                IntentOutcome::Updated
            }
        }
    }

    #[must_use]
    pub fn view(&self) -> DragDropView {
        let item_view = |item: &DragItem| DragItemView {
            id: item.id.clone(),
            text: item.text.clone(),
            correct: self
                .checked
                .map(|_| self.placements.get(&item.id) == Some(&item.zone_id)),
        };
        DragDropView {
            title: self.title.clone(),
            pool: self
                .items
                .iter()
                .filter(|i| !self.placements.contains_key(&i.id))
                .map(item_view)
                .collect(),
            zones: self
                .zones
                .iter()
                .map(|zone| DropZoneView {
                    id: zone.id.clone(),
                    label: zone.label.clone(),
                    items: self
                        .items
                        .iter()
                        .filter(|i| self.placements.get(&i.id) == Some(&zone.id))
                        .map(item_view)
                        .collect(),
                })
                .collect(),
            can_check: self.checked.is_none()
                && !self.items.is_empty()
                && self.placements.len() == self.items.len(),
            result: self.checked,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragItemView {
    pub id: ItemId,
    pub text: String,
    /// Set after checking.
    pub correct: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropZoneView {
    pub id: ZoneId,
    pub label: String,
    pub items: Vec<DragItemView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragDropView {
    pub title: String,
    /// Items not yet placed.
    pub pool: Vec<DragItemView>,
    pub zones: Vec<DropZoneView>,
    pub can_check: bool,
    pub result: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::ScoreAggregator;
    use lesson_core::model::props::FromProps;
    use serde_json::json;

    fn state() -> DragDropState {
        let props = DragDropProps::from_props(
            json!({
                "points": 20,
                "zones": [{ "id": "stack", "label": "Stack" }, { "id": "heap", "label": "Heap" }],
                "items": [
                    { "id": "i32", "text": "i32", "zoneId": "stack" },
                    { "id": "box", "text": "Box<T> contents", "zoneId": "heap" }
                ]
            })
            .as_object()
            .unwrap(),
        );
        DragDropState::new(&props)
    }

    fn place(item: &str, zone: &str) -> DragDropIntent {
        DragDropIntent::Place {
            item: ItemId::new(item),
            zone: ZoneId::new(zone),
        }
    }

    #[test]
    fn check_requires_every_item_placed() {
        let mut state = state();
        let mut score = ScoreAggregator::new(20);
        state.handle(place("i32", "stack"), &mut score);
        assert_eq!(state.handle(DragDropIntent::Check, &mut score), IntentOutcome::Ignored);
        assert!(!state.view().can_check);
    }

    #[test]
    fn correct_placement_awards_once_per_check() {
        let mut state = state();
        let mut score = ScoreAggregator::new(20);
        state.handle(place("i32", "stack"), &mut score);
        state.handle(place("box", "heap"), &mut score);
        assert_eq!(
            state.handle(DragDropIntent::Check, &mut score),
            IntentOutcome::Graded {
                correct: true,
                awarded: 20
            }
        );

        // Checked boards are locked.
        assert_eq!(state.handle(DragDropIntent::Check, &mut score), IntentOutcome::Ignored);
        assert_eq!(score.current_earned(), 20);

        state.handle(DragDropIntent::Reset, &mut score);
        state.handle(place("i32", "stack"), &mut score);
        state.handle(place("box", "heap"), &mut score);
        state.handle(DragDropIntent::Check, &mut score);
        assert_eq!(score.current_earned(), 40);
    }

    #[test]
    fn items_without_ids_can_be_checked() {
        let props = DragDropProps::from_props(
            json!({
                "points": 4,
                "zones": [{ "label": "Stack" }, { "id": "heap", "label": "Heap" }],
                "items": [
                    { "text": "i32", "zoneId": "zone-1" },
                    { "text": "Box<T> contents", "zoneId": "heap" }
                ]
            })
            .as_object()
            .unwrap(),
        );
        let mut state = DragDropState::new(&props);
        let mut score = ScoreAggregator::new(4);
        state.handle(place("item-1", "zone-1"), &mut score);
        state.handle(place("item-2", "heap"), &mut score);
        assert!(state.view().can_check);
        assert_eq!(
            state.handle(DragDropIntent::Check, &mut score),
            IntentOutcome::Graded {
                correct: true,
                awarded: 4
            }
        );
    }

    #[test]
    fn wrong_placement_is_marked() {
        let mut state = state();
        let mut score = ScoreAggregator::new(20);
        state.handle(place("i32", "heap"), &mut score);
        state.handle(place("box", "heap"), &mut score);
        state.handle(DragDropIntent::Check, &mut score);

        let view = state.view();
        assert_eq!(view.result, Some(false));
        let heap = view.zones.iter().find(|z| z.id.as_str() == "heap").unwrap();
        let i32_item = heap.items.iter().find(|i| i.id.as_str() == "i32").unwrap();
        assert_eq!(i32_item.correct, Some(false));
        assert_eq!(score.current_earned(), 0);

        // Locked until reset.
        assert_eq!(state.handle(place("i32", "stack"), &mut score), IntentOutcome::Ignored);
    }

    #[test]
    fn remove_returns_item_to_pool() {
        let mut state = state();
        let mut score = ScoreAggregator::new(20);
        state.handle(place("i32", "stack"), &mut score);
        assert_eq!(state.view().pool.len(), 1);
        state.handle(DragDropIntent::Remove(ItemId::new("i32")), &mut score);
        assert_eq!(state.view().pool.len(), 2);
        assert!(state.placement(&ItemId::new("i32")).is_none());
    }
}
