use crate::dao::LibraryDao;
use crate::error::{ErrorKind, Result};
use crate::relation::LendingSet;
use async_trait::async_trait;
use biblio_index::WordIndex;
use biblio_model::{Book, Isbn, Lend, PatronId};
use exn::ResultExt;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory storage engine; the reference [`LibraryDao`] implementation.
///
/// State is a catalog map, a [`WordIndex`] keyed by ISBN, and a
/// [`LendingSet`] behind a single [`RwLock`], so all trait methods operate
/// on `&self` without external synchronisation. Each call is internally
/// consistent; atomicity across a check-then-mutate sequence comes from
/// the caller's single-writer discipline.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    books: HashMap<Isbn, Book>,
    index: WordIndex<Isbn>,
    lendings: LendingSet,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LibraryDao for MemoryStore {
    async fn find_by_isbn(&self, isbn: &Isbn) -> Result<Option<Book>> {
        Ok(self.inner.read().await.books.get(isbn).cloned())
    }

    async fn insert_book(&self, book: &Book) -> Result<()> {
        let mut inner = self.inner.write().await;
        let texts = std::iter::once(book.title.as_str()).chain(book.authors.iter().map(String::as_str));
        inner.index.index(&book.isbn, texts);
        inner.books.insert(book.isbn.clone(), book.clone());
        tracing::debug!(isbn = %book.isbn, "catalog record inserted");
        Ok(())
    }

    async fn increment_copies(&self, isbn: &Isbn, delta: u32) -> Result<Book> {
        let mut inner = self.inner.write().await;
        let book = inner
            .books
            .get_mut(isbn)
            .ok_or_else(|| exn::Exn::from(ErrorKind::BookNotFound(isbn.clone())))?;
        book.n_copies += delta;
        Ok(book.clone())
    }

    async fn query_by_words(&self, words: &[String], index: usize, count: usize) -> Result<Vec<Book>> {
        if words.is_empty() {
            return Ok(Vec::new());
        }
        let inner = self.inner.read().await;
        let mut books: Vec<Book> = inner
            .index
            .search(words)
            .into_iter()
            .filter_map(|isbn| inner.books.get(&isbn).cloned())
            .collect();
        books.sort_by_cached_key(|book| (book.title_sort_key(), book.isbn.clone()));
        // The slice is taken only after the full sort.
        Ok(books.into_iter().skip(index).take(count).collect())
    }

    async fn insert_lending(&self, lend: &Lend) -> Result<()> {
        self.inner.write().await.lendings.insert(lend.clone());
        Ok(())
    }

    async fn delete_lending(&self, lend: &Lend) -> Result<()> {
        self.inner.write().await.lendings.remove(lend);
        Ok(())
    }

    async fn count_active_lendings(&self, isbn: &Isbn) -> Result<u32> {
        let count = self.inner.read().await.lendings.count_for_isbn(isbn);
        u32::try_from(count).or_raise(|| ErrorKind::InvalidData("lending count"))
    }

    async fn has_active_lending(&self, patron_id: &PatronId, isbn: &Isbn) -> Result<bool> {
        Ok(self.inner.read().await.lendings.contains(patron_id, isbn))
    }

    async fn delete_all(&self) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.books.clear();
        inner.index.clear();
        inner.lendings.clear();
        tracing::info!("in-memory store cleared");
        Ok(())
    }
}
