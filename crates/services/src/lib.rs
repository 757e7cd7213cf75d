#![forbid(unsafe_code)]

pub mod behaviors;
pub mod error;
pub mod import;
pub mod notice;
pub mod registry;
pub mod session;

pub use lesson_core::Clock;

pub use behaviors::{ComponentIntent, ComponentView, IntentOutcome, MountedComponent};
pub use error::{ImportError, IntentError, SessionError};
pub use import::{FileSource, LessonSource, TextSource, read_lesson};
pub use notice::{Notice, NoticeLevel};
pub use registry::{BehaviorKind, Category, ComponentRegistry};
pub use session::{ImportReport, LessonSession, ScoreSummary, SlideSummary, SlideView};
