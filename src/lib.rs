//! Lesson generation for memorizing Quranic verses.
//!
//! Given a verse and its word-by-word data, [`quiz::generate_lesson_plan`]
//! builds a graded sequence of multiple choice questions with plausible
//! wrong answers, reward points and milestones.

pub mod config;
pub mod error;
pub mod quiz;

pub use error::{LessonError, Result};
pub use quiz::verse::{validate, Verse, VerseData, Word};
pub use quiz::{
    generate_lesson_plan, Difficulty, LessonPlan, LessonQuestion, QuestionKind, QuestionOption,
};
