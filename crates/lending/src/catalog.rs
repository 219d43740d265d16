use crate::convert::{db_error, unknown_book};
use biblio_model::{Book, ErrorKind, Errors, FieldError, Isbn, Result};
use biblio_store::LibraryDao;
use std::sync::Arc;

/// Owner of the canonical book records.
///
/// Enforces duplicate-add consistency: an ISBN uniquely determines every
/// field except the copy count, which accumulates across repeated
/// consistent adds. Availability accounting goes through the ledger
/// relation, never a scan.
pub struct Catalog<D> {
    dao: Arc<D>,
}

impl<D: LibraryDao> Catalog<D> {
    pub fn new(dao: Arc<D>) -> Self {
        Self { dao }
    }

    /// Add a validated book.
    ///
    /// An unseen ISBN is stored and indexed. A seen ISBN must match the
    /// stored record on every immutable field; the first mismatched field
    /// (in the stable comparison order) fails the add with nothing
    /// changed, and a full match increments the stored copy count by the
    /// incoming one.
    pub async fn add(&self, book: Book) -> Result<Book> {
        match self.dao.find_by_isbn(&book.isbn).await.map_err(db_error)? {
            None => {
                self.dao.insert_book(&book).await.map_err(db_error)?;
                tracing::debug!(isbn = %book.isbn, copies = book.n_copies, "book added to catalog");
                Ok(book)
            },
            Some(stored) => match stored.first_mismatch(&book) {
                Some(field) => Err(Errors::of(FieldError::new(
                    ErrorKind::BadReq,
                    field,
                    format!("inconsistent {field} data for book {}", book.isbn),
                ))),
                None => {
                    let updated =
                        self.dao.increment_copies(&book.isbn, book.n_copies).await.map_err(db_error)?;
                    tracing::debug!(isbn = %updated.isbn, copies = updated.n_copies, "copy count increased");
                    Ok(updated)
                },
            },
        }
    }

    /// Fetch a record; an unknown ISBN surfaces as a bad request.
    pub async fn get(&self, isbn: &Isbn) -> Result<Book> {
        self.dao.find_by_isbn(isbn).await.map_err(db_error)?.ok_or_else(|| unknown_book(isbn))
    }

    /// Copies of a book not currently checked out. Never negative.
    pub async fn available_copies(&self, isbn: &Isbn) -> Result<u32> {
        let book = self.get(isbn).await?;
        let active = self.dao.count_active_lendings(isbn).await.map_err(db_error)?;
        Ok(book.n_copies.saturating_sub(active))
    }

    /// Books matching every search word, sorted by title and sliced by
    /// the store.
    pub async fn find(&self, words: &[String], index: usize, count: usize) -> Result<Vec<Book>> {
        self.dao.query_by_words(words, index, count).await.map_err(db_error)
    }

    /// Discard all records, postings, and lendings as one reset.
    pub async fn clear(&self) -> Result<()> {
        self.dao.delete_all().await.map_err(db_error)?;
        tracing::info!("library cleared");
        Ok(())
    }
}
