/// Errors raised by the heading tracker and its helpers
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// A feed entry lacks its identifier or a usable position; the whole tick is rejected
    #[error("Malformed object at index {index}: {reason}")]
    MalformedObject { index: usize, reason: String },

    /// Two entries of the same snapshot share an identifier
    #[error("Duplicate flight id in snapshot: {0}")]
    DuplicateId(String),

    /// A previous-snapshot entry was never enriched by the tracker
    #[error("Previous snapshot entry {0} carries no heading")]
    MissingPreviousHeading(String),

    #[error("Invalid quantized angle: {0} (expected a multiple of 15 in [0, 345])")]
    InvalidQuantizedAngle(i64),

    #[error("Failed to encode snapshot store: {0}")]
    StoreEncode(#[from] rmp_serde::encode::Error),

    #[error("Failed to decode snapshot store: {0}")]
    StoreDecode(#[from] rmp_serde::decode::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
