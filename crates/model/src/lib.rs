//! Domain model and request validation for the biblio lending library.
//!
//! The request layer hands loosely-typed JSON to the validators in
//! [`validate`]; everything downstream of validation works with the typed
//! models in [`models`]. Failures at every layer are the structured values
//! in [`error`], never panics or opaque strings.

pub mod error;
pub mod models;
pub mod validate;

pub use crate::error::{ErrorKind, Errors, FieldError, Result};
pub use crate::models::{Book, Isbn, Lend, PatronId};
