//! Store Error Types
//!
//! Structured errors using `exn` for automatic location tracking. These
//! are internal to the storage boundary: the lending facade converts them
//! into `DB`-kind request errors and never lets them escape raw.

use biblio_model::Isbn;
use derive_more::{Display, Error};

/// A store error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("database error")]
    Database,
    #[display("database migration error")]
    Migration,
    #[display("book not found: {_0}")]
    BookNotFound(#[error(not(source))] Isbn),
    /// A stored value could not be converted back into a domain type.
    #[display("invalid store data: {_0}")]
    InvalidData(#[error(not(source))] &'static str),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
