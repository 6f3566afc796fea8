use std::io;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No active round, call start or restart first")]
    NoActiveRound,

    #[error("Question {0} has already been answered")]
    AlreadyAnswered(usize),

    #[error("Question {0} has not been answered yet")]
    Unanswered(usize),
}

/// Failure of the durable key-value backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// A statistics write that did not reach the backend. Non-fatal.
#[derive(Debug, thiserror::Error)]
#[error("could not persist `{key}`: {error}")]
pub struct PersistenceWarning {
    pub key: &'static str,
    #[source]
    pub error: StoreError,
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("No question was delivered")]
    NoQuestion,

    #[error("Could not read feed: {0}")]
    Io(#[from] io::Error),

    #[error("Could not decode feed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Feed reported an error: {0}")]
    Feed(String),

    #[error("Feed contains no movies")]
    Empty,
}
