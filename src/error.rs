use thiserror::Error;

pub type Result<T> = std::result::Result<T, LessonError>;

#[derive(Debug, Error)]
pub enum LessonError {
    /// The verse or its words can't be turned into a lesson.
    /// The caller should let the learner pick another verse.
    #[error("Invalid lesson input: {reason}")]
    InvalidLessonInput { reason: String },

    #[error("Failed to read verse data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse verse data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl LessonError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidLessonInput {
            reason: reason.into(),
        }
    }
}
