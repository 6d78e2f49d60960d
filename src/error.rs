use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum NoteError {
    #[error("Note not found: {0}")]
    NotFound(Uuid),

    #[error("Corrupt document: {0}")]
    CorruptDocument(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, NoteError>;
