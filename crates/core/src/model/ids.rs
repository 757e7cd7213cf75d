use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Declares a string-backed identifier newtype.
///
/// Lesson files are hand-authored JSON, so identifiers are opaque strings
/// rather than numeric keys. Numbers are accepted and kept in their textual
/// form; `null` reads as a blank id.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.trim().is_empty() {
                    return Err(ParseIdError {
                        kind: stringify!($name).to_string(),
                    });
                }
                Ok(Self::new(s))
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                match Value::deserialize(deserializer)? {
                    Value::String(s) => Ok(Self(s)),
                    Value::Number(n) => Ok(Self(n.to_string())),
                    Value::Null => Ok(Self::default()),
                    other => Err(de::Error::custom(format!(
                        "expected a string or number for {}, found {}",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Unique identifier for a Lesson
    LessonId
);
string_id!(
    /// Identifier of a Slide within a lesson
    SlideId
);
string_id!(
    /// Identifier of a Component, unique within its slide
    ComponentId
);
string_id!(
    /// Identifier of a quiz question
    QuestionId
);
string_id!(
    /// Identifier of a quiz answer option
    OptionId
);
string_id!(
    /// Identifier of a flashcard
    CardId
);
string_id!(
    /// Identifier of a hotspot marker
    HotspotId
);
string_id!(
    /// Identifier of a matching pair
    PairId
);
string_id!(
    /// Identifier of a draggable item
    ItemId
);
string_id!(
    /// Identifier of a drop zone
    ZoneId
);

/// Error type for parsing an ID from a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lesson_id_display() {
        let id = LessonId::new("intro-to-rust");
        assert_eq!(id.to_string(), "intro-to-rust");
    }

    #[test]
    fn numeric_ids_are_read_as_text() {
        let id: OptionId = serde_json::from_value(serde_json::json!(3)).unwrap();
        assert_eq!(id.as_str(), "3");

        let id: OptionId = serde_json::from_value(serde_json::json!(null)).unwrap();
        assert_eq!(id, OptionId::default());

        assert!(serde_json::from_value::<OptionId>(serde_json::json!([1])).is_err());
    }

    #[test]
    fn test_component_id_from_str() {
        let id: ComponentId = "quiz-1".parse().unwrap();
        assert_eq!(id, ComponentId::new("quiz-1"));
    }

    #[test]
    fn test_blank_id_is_rejected() {
        let result = "   ".parse::<SlideId>();
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "failed to parse SlideId from string"
        );
    }

    #[test]
    fn test_id_debug_names_the_kind() {
        let id = OptionId::new("a");
        assert_eq!(format!("{id:?}"), "OptionId(\"a\")");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = QuestionId::new("q1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"q1\"");
        let back: QuestionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
