mod ids;
mod lesson;
pub mod media;
pub mod props;

pub use ids::{
    CardId, ComponentId, HotspotId, ItemId, LessonId, OptionId, PairId, ParseIdError, QuestionId,
    SlideId, ZoneId,
};
pub use lesson::{Component, Lesson, LessonError, LessonInfo, Slide};
pub use media::{DisplaySize, ImageMeta, ImageSource, MediaError, PLACEHOLDER_IMAGE};
