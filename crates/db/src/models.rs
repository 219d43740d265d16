use biblio_model::{Book, Isbn};
use biblio_store::error::{Error, ErrorKind, Result};
use exn::ResultExt;

/// Row shape for the `books` table. The author list is stored as a JSON
/// array in a text column, in order.
#[derive(sqlx::FromRow)]
pub(crate) struct BookRow {
    pub(crate) isbn: String,
    pub(crate) title: String,
    pub(crate) authors: String,
    pub(crate) pages: i64,
    pub(crate) year: i64,
    pub(crate) publisher: String,
    pub(crate) n_copies: i64,
}

impl TryFrom<&Book> for BookRow {
    type Error = Error;
    fn try_from(book: &Book) -> Result<Self> {
        Ok(Self {
            isbn: book.isbn.as_str().to_string(),
            title: book.title.clone(),
            authors: serde_json::to_string(&book.authors).or_raise(|| ErrorKind::InvalidData("authors"))?,
            pages: i64::from(book.pages),
            year: i64::from(book.year),
            publisher: book.publisher.clone(),
            n_copies: i64::from(book.n_copies),
        })
    }
}

impl TryFrom<BookRow> for Book {
    type Error = Error;
    fn try_from(row: BookRow) -> Result<Self> {
        Ok(Self {
            isbn: Isbn::new(row.isbn),
            title: row.title,
            authors: serde_json::from_str(&row.authors).or_raise(|| ErrorKind::InvalidData("authors"))?,
            pages: u32::try_from(row.pages).or_raise(|| ErrorKind::InvalidData("pages"))?,
            year: u16::try_from(row.year).or_raise(|| ErrorKind::InvalidData("year"))?,
            publisher: row.publisher,
            n_copies: u32::try_from(row.n_copies).or_raise(|| ErrorKind::InvalidData("copy count"))?,
        })
    }
}
