//! @ai:module:intent Define error types for the statistics engine
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Unified error type for hard failures at the engine boundary
///
/// Malformed records and short windows are never reported here; they are
/// absorbed by the normalizer and calculators as absent values.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode export: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected export shape: {0}")]
    UnexpectedShape(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, Error>;
