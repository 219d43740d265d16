//! Lending-library facade for biblio.
//!
//! Composes the validated domain model, the word index, and a
//! [`biblio_store::LibraryDao`] into the public library operations:
//! add, find, checkout, return, and clear. Every operation validates its
//! raw request first and fails as a structured error list; mutations are
//! serialized per library instance.

mod catalog;
mod convert;
mod ledger;
mod library;

pub use crate::catalog::Catalog;
pub use crate::ledger::Ledger;
pub use crate::library::{DEFAULT_COUNT, LendingLibrary};
