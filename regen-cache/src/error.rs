//! Error types for the rainfall cache.

use thiserror::Error;

/// Boxed error type for pluggable providers and stores.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by cache operations.
///
/// A payload that fails to decode is not an error at this level: the cache
/// treats it as a miss and refetches. Decode failures only surface when a
/// freshly written payload cannot be read back.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The upstream provider failed; nothing was cached.
    #[error("provider fetch failed: {0}")]
    Provider(#[source] BoxError),

    /// The storage backend failed.
    #[error("cache store failed: {0}")]
    Backend(#[source] BoxError),

    /// A payload could not be encoded or decoded.
    #[error(transparent)]
    Entry(#[from] EntryError),
}

impl From<rusqlite::Error> for CacheError {
    fn from(err: rusqlite::Error) -> CacheError {
        CacheError::Backend(Box::new(err))
    }
}

/// Errors while encoding or decoding a cache payload.
#[derive(Error, Debug)]
pub enum EntryError {
    #[error("malformed cache payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed cached timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),
}

pub type Result<T> = std::result::Result<T, CacheError>;
