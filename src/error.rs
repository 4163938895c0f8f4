use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Snapshot corrupt: {0}")]
    SnapshotCorrupt(String),

    #[error("Malformed verse reference: {0:?}")]
    MalformedReference(String),

    #[error("Verse not found: {book} {chapter}:{verse}")]
    VerseNotFound {
        book: String,
        chapter: u32,
        verse: u32,
    },

    #[error("Chain integrity check failed at block {0}")]
    InvalidChain(usize),
}

pub type Result<T> = std::result::Result<T, ChainError>;
