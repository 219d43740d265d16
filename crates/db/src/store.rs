//! SQLite-backed implementation of the library DAO.

use crate::Database;
use crate::models::BookRow;
use async_trait::async_trait;
use biblio_index::tokenize;
use biblio_model::{Book, Isbn, Lend, PatronId};
use biblio_store::LibraryDao;
use biblio_store::error::{ErrorKind, Result};
use exn::ResultExt;
use sqlx::SqlitePool;
use std::collections::BTreeSet;

/// Persistent [`LibraryDao`] backed by SQLite.
///
/// Catalog records, word postings, and lending records each live in their
/// own table, so every lookup is keyed or goes through an index — no
/// operation scans the catalog. Search ordering and slicing happen in
/// SQL, with the slice applied after the full sort.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl From<&Database> for SqliteStore {
    fn from(db: &Database) -> Self {
        Self { pool: db.pool().clone() }
    }
}

impl SqliteStore {
    /// Create a store over an already-migrated connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LibraryDao for SqliteStore {
    async fn find_by_isbn(&self, isbn: &Isbn) -> Result<Option<Book>> {
        let row: Option<BookRow> = sqlx::query_as(include_str!("../queries/find_by_isbn.sql"))
            .bind(isbn.as_str())
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        row.map(Book::try_from).transpose()
    }

    async fn insert_book(&self, book: &Book) -> Result<()> {
        let row = BookRow::try_from(book)?;
        let mut tx = self.pool.begin().await.or_raise(|| ErrorKind::Database)?;
        sqlx::query(include_str!("../queries/insert_book.sql"))
            .bind(row.isbn)
            .bind(row.title)
            .bind(row.authors)
            .bind(row.pages)
            .bind(row.year)
            .bind(row.publisher)
            .bind(row.n_copies)
            .execute(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        for word in book_words(book) {
            sqlx::query(include_str!("../queries/insert_word.sql"))
                .bind(word)
                .bind(book.isbn.as_str())
                .execute(&mut *tx)
                .await
                .or_raise(|| ErrorKind::Database)?;
        }
        tx.commit().await.or_raise(|| ErrorKind::Database)?;
        tracing::debug!(isbn = %book.isbn, "catalog record inserted");
        Ok(())
    }

    async fn increment_copies(&self, isbn: &Isbn, delta: u32) -> Result<Book> {
        let row: Option<BookRow> = sqlx::query_as(include_str!("../queries/increment_copies.sql"))
            .bind(i64::from(delta))
            .bind(isbn.as_str())
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        match row {
            Some(row) => row.try_into(),
            None => exn::bail!(ErrorKind::BookNotFound(isbn.clone())),
        }
    }

    async fn query_by_words(&self, words: &[String], index: usize, count: usize) -> Result<Vec<Book>> {
        if words.is_empty() {
            return Ok(Vec::new());
        }
        // Duplicate query words would skew the distinct-match count below.
        let unique: BTreeSet<&str> = words.iter().map(String::as_str).collect();
        let word_list =
            serde_json::to_string(&unique).or_raise(|| ErrorKind::InvalidData("search words"))?;
        let rows: Vec<BookRow> = sqlx::query_as(include_str!("../queries/query_by_words.sql"))
            .bind(word_list)
            .bind(i64::try_from(unique.len()).or_raise(|| ErrorKind::InvalidData("word count"))?)
            .bind(i64::try_from(count).or_raise(|| ErrorKind::InvalidData("count"))?)
            .bind(i64::try_from(index).or_raise(|| ErrorKind::InvalidData("index"))?)
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        rows.into_iter().map(Book::try_from).collect()
    }

    async fn insert_lending(&self, lend: &Lend) -> Result<()> {
        sqlx::query(include_str!("../queries/insert_lending.sql"))
            .bind(lend.patron_id.as_str())
            .bind(lend.isbn.as_str())
            .execute(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(())
    }

    async fn delete_lending(&self, lend: &Lend) -> Result<()> {
        sqlx::query(include_str!("../queries/delete_lending.sql"))
            .bind(lend.patron_id.as_str())
            .bind(lend.isbn.as_str())
            .execute(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(())
    }

    async fn count_active_lendings(&self, isbn: &Isbn) -> Result<u32> {
        let count: i64 = sqlx::query_scalar(include_str!("../queries/count_active_lendings.sql"))
            .bind(isbn.as_str())
            .fetch_one(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        u32::try_from(count).or_raise(|| ErrorKind::InvalidData("lending count"))
    }

    async fn has_active_lending(&self, patron_id: &PatronId, isbn: &Isbn) -> Result<bool> {
        let exists: i64 = sqlx::query_scalar(include_str!("../queries/has_active_lending.sql"))
            .bind(patron_id.as_str())
            .bind(isbn.as_str())
            .fetch_one(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(exists != 0)
    }

    async fn delete_all(&self) -> Result<()> {
        let mut tx = self.pool.begin().await.or_raise(|| ErrorKind::Database)?;
        for sql in [
            include_str!("../queries/delete_all_lendings.sql"),
            include_str!("../queries/delete_all_words.sql"),
            include_str!("../queries/delete_all_books.sql"),
        ] {
            sqlx::query(sql).execute(&mut *tx).await.or_raise(|| ErrorKind::Database)?;
        }
        tx.commit().await.or_raise(|| ErrorKind::Database)?;
        tracing::info!("library database cleared");
        Ok(())
    }
}

/// Distinct indexable words of a book's title and author fields.
fn book_words(book: &Book) -> BTreeSet<String> {
    let mut words: BTreeSet<String> = tokenize(&book.title).into_iter().collect();
    for author in &book.authors {
        words.extend(tokenize(author));
    }
    words
}
