use crate::error::Result;
use async_trait::async_trait;
use biblio_model::{Book, Isbn, Lend, PatronId};

/// Data-access boundary for the lending library.
///
/// This is the complete storage surface the domain core requires. None of
/// these operations may perform an unfiltered scan over all books or
/// patrons; lookups go through keys and word postings.
///
/// Precondition checks (duplicate adds, availability, double checkout)
/// belong to the catalog and ledger, which call these operations under a
/// single-writer discipline. Implementations only need each individual
/// call to be internally consistent.
#[async_trait]
pub trait LibraryDao: Send + Sync {
    /// Fetch the catalog record for an ISBN, if one exists.
    async fn find_by_isbn(&self, isbn: &Isbn) -> Result<Option<Book>>;

    /// Insert a previously-unseen catalog record and index the words of
    /// its title and author fields. Callers must have checked that no
    /// record exists for the ISBN.
    async fn insert_book(&self, book: &Book) -> Result<()>;

    /// Add `delta` copies to an existing record and return the updated
    /// record. Word postings are untouched: a copy-count change never
    /// re-indexes. Fails with [`ErrorKind::BookNotFound`](crate::error::ErrorKind::BookNotFound)
    /// for an unknown ISBN.
    async fn increment_copies(&self, isbn: &Isbn, delta: u32) -> Result<Book>;

    /// Books whose indexed title/author words contain *every* given word,
    /// sorted ascending by title (case-insensitively) and sliced to
    /// `[index, index + count)` — the slice is taken after the full sort.
    async fn query_by_words(&self, words: &[String], index: usize, count: usize) -> Result<Vec<Book>>;

    /// Record an active lending.
    async fn insert_lending(&self, lend: &Lend) -> Result<()>;

    /// Remove an active lending record. Removing a pair that is not
    /// active is a no-op.
    async fn delete_lending(&self, lend: &Lend) -> Result<()>;

    /// Number of currently-active lendings of a book.
    async fn count_active_lendings(&self, isbn: &Isbn) -> Result<u32>;

    /// Whether this exact (patron, book) pair is currently active.
    async fn has_active_lending(&self, patron_id: &PatronId, isbn: &Isbn) -> Result<bool>;

    /// Discard all state — catalog, word postings, and lendings — as one
    /// reset operation.
    async fn delete_all(&self) -> Result<()>;
}
