use thiserror::Error;

/// Errors from the streak state store
#[derive(Error, Debug)]
pub enum StreakError {
    #[error("Streak storage failed: {0}")]
    Storage(String),

    #[error("Streak state could not be encoded: {0}")]
    Serialization(String),
}
