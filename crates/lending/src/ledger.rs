use crate::convert::{db_error, unknown_book};
use biblio_model::{ErrorKind, Errors, FieldError, Lend, Result};
use biblio_store::LibraryDao;
use std::sync::Arc;

/// Tracker of active checkouts.
///
/// Each operation checks its preconditions and then mutates; the facade's
/// writer gate guarantees no other mutation interleaves between the two,
/// so a passed check is still true at mutation time.
pub struct Ledger<D> {
    dao: Arc<D>,
}

impl<D: LibraryDao> Ledger<D> {
    pub fn new(dao: Arc<D>) -> Self {
        Self { dao }
    }

    /// Check a book out to a patron.
    ///
    /// Fails as a bad request if the book is unknown, if every copy is
    /// already out, or if this patron already has this book.
    pub async fn checkout(&self, lend: &Lend) -> Result<()> {
        let book = self
            .dao
            .find_by_isbn(&lend.isbn)
            .await
            .map_err(db_error)?
            .ok_or_else(|| unknown_book(&lend.isbn))?;
        let active = self.dao.count_active_lendings(&lend.isbn).await.map_err(db_error)?;
        if active >= book.n_copies {
            return Err(Errors::of(FieldError::new(
                ErrorKind::BadReq,
                "isbn",
                format!("no copies of book {} are available for checkout", lend.isbn),
            )));
        }
        if self.dao.has_active_lending(&lend.patron_id, &lend.isbn).await.map_err(db_error)? {
            return Err(Errors::of(FieldError::new(
                ErrorKind::BadReq,
                "isbn",
                format!("patron {} already has book {} checked out", lend.patron_id, lend.isbn),
            )));
        }
        self.dao.insert_lending(lend).await.map_err(db_error)?;
        tracing::debug!(patron = %lend.patron_id, isbn = %lend.isbn, "book checked out");
        Ok(())
    }

    /// Return a checked-out book.
    ///
    /// Fails as a bad request if the book is unknown or if no active
    /// record exists for this exact (patron, book) pair.
    pub async fn give_back(&self, lend: &Lend) -> Result<()> {
        if self.dao.find_by_isbn(&lend.isbn).await.map_err(db_error)?.is_none() {
            return Err(unknown_book(&lend.isbn));
        }
        if !self.dao.has_active_lending(&lend.patron_id, &lend.isbn).await.map_err(db_error)? {
            return Err(Errors::of(FieldError::new(
                ErrorKind::BadReq,
                "isbn",
                format!("no checkout of book {} by patron {}", lend.isbn, lend.patron_id),
            )));
        }
        self.dao.delete_lending(lend).await.map_err(db_error)?;
        tracing::debug!(patron = %lend.patron_id, isbn = %lend.isbn, "book returned");
        Ok(())
    }
}
