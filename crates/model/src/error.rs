//! Request Error Values
//!
//! Failures surfaced to the request layer are plain values, not raised
//! signals: a non-empty ordered list of field-level errors, each tagged
//! with a taxonomy kind and (where one applies) the name of the offending
//! field so the caller can route the message to the right widget.

use derive_more::{Display, Error};
use std::fmt::{Display as FmtDisplay, Formatter, Result as FmtResult};

/// Result type alias for every public library operation.
pub type Result<T> = std::result::Result<T, Errors>;

/// Error taxonomy understood by request-layer callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ErrorKind {
    /// A required field is absent.
    #[display("MISSING")]
    Missing,
    /// A field is present but has the wrong primitive type.
    #[display("BAD_TYPE")]
    BadType,
    /// Well-typed, but violates a domain or business rule. Lookups of
    /// unknown books surface under this kind too.
    #[display("BAD_REQ")]
    BadReq,
    /// Storage-layer failure, opaque to the caller.
    #[display("DB")]
    Db,
    #[display("INTERNAL")]
    Internal,
}

/// A single failure, optionally anchored to a request field.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{kind}: {message}")]
pub struct FieldError {
    pub kind: ErrorKind,
    pub field: Option<String>,
    pub message: String,
}

impl FieldError {
    pub fn new(kind: ErrorKind, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind, field: Some(field.into()), message: message.into() }
    }

    /// An error that belongs to the request as a whole rather than to one
    /// field (storage failures, malformed request envelopes).
    pub fn unfielded(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, field: None, message: message.into() }
    }

    pub fn missing(field: &str) -> Self {
        Self::new(ErrorKind::Missing, field, format!("property {field} is required"))
    }
}

/// A non-empty ordered list of [`FieldError`]s.
///
/// Validation reports every violation it finds, in a stable field order,
/// not just the first; business-rule and storage failures carry a single
/// entry. The list is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct Errors(#[error(not(source))] Vec<FieldError>);

impl Errors {
    pub fn of(error: FieldError) -> Self {
        Self(vec![error])
    }

    /// Wrap an accumulated list, or `None` if nothing went wrong.
    pub(crate) fn from_vec(errors: Vec<FieldError>) -> Option<Self> {
        (!errors.is_empty()).then(|| Self(errors))
    }

    /// The first (highest-priority) error. Always present.
    pub fn first(&self) -> &FieldError {
        &self.0[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; the list is non-empty by construction.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl From<FieldError> for Errors {
    fn from(error: FieldError) -> Self {
        Self::of(error)
    }
}

impl FmtDisplay for Errors {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl IntoIterator for Errors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
