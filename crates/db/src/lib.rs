//! SQLite persistence adapter for the biblio lending library.
//!
//! Implements [`biblio_store::LibraryDao`] on top of an embedded SQLite
//! database: catalog records, word postings, and lending records each get
//! a table, so search and availability checks are index lookups and the
//! sort/slice of search results happens in SQL. Errors reuse the store
//! crate's kinds, since the DAO trait fixes the error type.

mod db;
mod models;
mod store;

pub use crate::db::Database;
pub use crate::store::SqliteStore;
