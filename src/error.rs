//! Error types for recording and persisting readings.
//!
//! Load-side parse failures are absorbed by the store (a malformed file
//! resets to an empty sequence); only record-time failures surface here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A manually entered field was missing or not a number. Nothing is
    /// recorded when this occurs.
    #[error("invalid value for {field}: enter numeric values for all parameters")]
    Validation { field: &'static str },

    /// Writing the store file failed. The in-memory reading is kept, so
    /// a later successful save will include it.
    #[error("failed to write readings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize readings: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
