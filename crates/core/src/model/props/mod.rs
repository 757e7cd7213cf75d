//! Typed property contracts for each component behavior.
//!
//! Decoding is forgiving and works field by field. `null` reads as absent,
//! a top-level field that does not fit the contract is dropped in favour of
//! its default, and list fields decode each element on its own. One badly
//! authored value never takes down the rest of its component.

mod content;
mod interactive;

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

pub use content::{
    Align, BulletListProps, HeadingProps, ImageProps, ListStyle, ParagraphProps, ScoreBoardProps,
};
pub use interactive::{
    BLANK_MARKER, CodeEditorProps, DragDropProps, DragItem, DropZone, FillInTheBlankProps, Flashcard,
    FlashcardsProps, Hotspot, HotspotProps, MatchingPair, MatchingPairsProps, QuizOption,
    QuizProps, QuizQuestion,
};

/// A props contract that can be read from a component's raw props bag.
pub trait FromProps: DeserializeOwned + Default {
    /// Component type tag, used in diagnostics.
    const KIND: &'static str;

    #[must_use]
    fn from_props(props: &Map<String, Value>) -> Self {
        let bag = without_nulls(props);
        let err = match serde_json::from_value(Value::Object(bag.clone())) {
            Ok(parsed) => return parsed,
            Err(err) => err,
        };

        let (kept, dropped): (Map<String, Value>, Map<String, Value>) =
            bag.into_iter().partition(|(key, value)| {
                let single = Map::from_iter([(key.clone(), value.clone())]);
                serde_json::from_value::<Self>(Value::Object(single)).is_ok()
            });
        let dropped: Vec<&str> = dropped.keys().map(String::as_str).collect();
        tracing::warn!(
            kind = Self::KIND,
            error = %err,
            ?dropped,
            "malformed component props; using defaults for those fields"
        );

        serde_json::from_value(Value::Object(kept)).unwrap_or_default()
    }
}

/// Removes `null` object members at every depth so they read as absent.
fn without_nulls(props: &Map<String, Value>) -> Map<String, Value> {
    props
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), strip_nulls(value)))
        .collect()
}

fn strip_nulls(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(without_nulls(map)),
        Value::Array(items) => Value::Array(items.iter().map(strip_nulls).collect()),
        other => other.clone(),
    }
}

/// Decodes a list one element at a time; elements that do not fit become
/// `T::default()`, so the list keeps its authored length.
pub(crate) fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Err(de::Error::custom("expected a list"));
    };
    Ok(items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item).unwrap_or_else(|err| {
                tracing::debug!(error = %err, "malformed list entry; using defaults");
                T::default()
            })
        })
        .collect())
}

/// Treats blank strings as absent.
pub(crate) fn non_blank(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
