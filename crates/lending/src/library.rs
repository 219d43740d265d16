use crate::catalog::Catalog;
use crate::ledger::Ledger;
use biblio_model::{Book, Isbn, Result, validate};
use biblio_store::LibraryDao;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Number of results a find request returns when it names no count.
pub const DEFAULT_COUNT: usize = 5;

/// The lending-library facade.
///
/// Every public operation validates its raw request first and
/// short-circuits with the validator's error list; on success it runs
/// existence checks, then business-rule checks, then the mutation, in
/// that order. One writer at a time per instance: mutating operations
/// (add, checkout, return, clear) hold the write side of the gate
/// end-to-end, while read-only operations share the read side and may
/// run concurrently with each other but never with a mutation.
pub struct LendingLibrary<D> {
    catalog: Catalog<D>,
    ledger: Ledger<D>,
    gate: RwLock<()>,
}

impl<D: LibraryDao> LendingLibrary<D> {
    pub fn new(dao: D) -> Self {
        let dao = Arc::new(dao);
        Self {
            catalog: Catalog::new(Arc::clone(&dao)),
            ledger: Ledger::new(dao),
            gate: RwLock::new(()),
        }
    }

    /// Add one or more copies of a book to the library.
    ///
    /// Returns the stored record: the new one for an unseen ISBN, or the
    /// existing record with its copy count increased when the request is
    /// consistent with what is already on the shelf.
    pub async fn add_book(&self, req: &Value) -> Result<Book> {
        let book = validate::add_book(req)?;
        let _writer = self.gate.write().await;
        self.catalog.add(book).await
    }

    /// Find all books whose title and author words contain every word of
    /// the search string, case-insensitively.
    ///
    /// Results are sorted ascending by title, and the optional `index` /
    /// `count` parameters slice `[index, index + count)` out of the fully
    /// sorted result (defaults: 0 and [`DEFAULT_COUNT`]). A search that
    /// matches nothing returns an empty list, not an error.
    pub async fn find_books(&self, req: &Value) -> Result<Vec<Book>> {
        let find = validate::find_books(req)?;
        let _reader = self.gate.read().await;
        self.catalog
            .find(&find.words, find.index.unwrap_or(0), find.count.unwrap_or(DEFAULT_COUNT))
            .await
    }

    /// Check the requested book out to the requested patron.
    pub async fn checkout_book(&self, req: &Value) -> Result<()> {
        let lend = validate::checkout_book(req)?;
        let _writer = self.gate.write().await;
        self.ledger.checkout(&lend).await
    }

    /// Return the requested book on behalf of the requested patron.
    pub async fn return_book(&self, req: &Value) -> Result<()> {
        let lend = validate::return_book(req)?;
        let _writer = self.gate.write().await;
        self.ledger.give_back(&lend).await
    }

    /// Reset the library: catalog, word index, and ledger, atomically.
    pub async fn clear(&self) -> Result<()> {
        let _writer = self.gate.write().await;
        self.catalog.clear().await
    }

    /// Typed lookup for in-process callers.
    pub async fn get_book(&self, isbn: &Isbn) -> Result<Book> {
        let _reader = self.gate.read().await;
        self.catalog.get(isbn).await
    }

    /// Copies of a book currently on the shelf.
    pub async fn available_copies(&self, isbn: &Isbn) -> Result<u32> {
        let _reader = self.gate.read().await;
        self.catalog.available_copies(isbn).await
    }
}
