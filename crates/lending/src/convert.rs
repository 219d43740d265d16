//! Conversions from store-internal errors to request error values.

use biblio_model::{ErrorKind, Errors, FieldError, Isbn};

/// Surface a storage failure as a single `DB`-kind error. The store
/// error's display names the failure category; internals stay in the log.
pub(crate) fn db_error(err: biblio_store::error::Error) -> Errors {
    tracing::error!(error = %err, "storage failure");
    Errors::of(FieldError::unfielded(ErrorKind::Db, err.to_string()))
}

pub(crate) fn unknown_book(isbn: &Isbn) -> Errors {
    Errors::of(FieldError::new(ErrorKind::BadReq, "isbn", format!("unknown book {isbn}")))
}
