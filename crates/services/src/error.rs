//! Shared error types for the services crate.

use thiserror::Error;

use lesson_core::model::{ComponentId, LessonError};

use crate::registry::BehaviorKind;

/// Errors emitted while importing a lesson.
///
/// Neither variant changes session state.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    #[error("invalid lesson format: {0}")]
    InvalidLessonFormat(#[from] LessonError),
    #[error("could not read lesson: {0}")]
    FileRead(#[from] std::io::Error),
}

/// Errors emitted by a mounted component when handed an intent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IntentError {
    #[error("{kind} components do not accept {intent} intents")]
    Unsupported {
        kind: BehaviorKind,
        intent: &'static str,
    },
}

/// Errors emitted by `LessonSession`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no lesson is loaded")]
    NoLesson,
    #[error("component {0} is not on the current slide")]
    UnknownComponent(ComponentId),
    #[error(transparent)]
    Intent(#[from] IntentError),
    #[error(transparent)]
    Import(#[from] ImportError),
}
