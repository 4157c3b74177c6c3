//! Lesson records and the repository they come from

mod record;
mod repository;

pub use record::{Example, LessonRecord};
pub use repository::{HttpLessonRepository, LessonRepository};
