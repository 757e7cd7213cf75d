#![forbid(unsafe_code)]

pub mod model;
pub mod navigation;
pub mod score;
pub mod time;

pub use navigation::{NavOutcome, Navigator};
pub use score::{ScoreAggregator, ScoreContext};
pub use time::Clock;
