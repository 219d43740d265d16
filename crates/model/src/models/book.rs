use crate::models::Isbn;
use serde::Serialize;

/// A catalog record: one title owned in one or more identical copies.
///
/// The ISBN uniquely determines every field except `n_copies`: repeated
/// adds of the same ISBN must agree on all of them, field by field, and
/// only accumulate the copy count. Records are never mutated otherwise and
/// never deleted individually (only by clearing the whole library).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub isbn: Isbn,
    pub title: String,
    /// Ordered author list; order is significant for duplicate detection.
    pub authors: Vec<String>,
    pub pages: u32,
    pub year: u16,
    pub publisher: String,
    /// Copies owned by the library; unaffected by checkouts.
    pub n_copies: u32,
}

impl Book {
    /// Name of the first immutable field on which `self` and `other`
    /// disagree, or `None` when the records are consistent. The field
    /// order is fixed so duplicate-add errors are reproducible. Copy
    /// counts are not compared.
    pub fn first_mismatch(&self, other: &Book) -> Option<&'static str> {
        if self.title != other.title {
            return Some("title");
        }
        if self.authors != other.authors {
            return Some("authors");
        }
        if self.pages != other.pages {
            return Some("pages");
        }
        if self.year != other.year {
            return Some("year");
        }
        if self.publisher != other.publisher {
            return Some("publisher");
        }
        None
    }

    /// Key for ordering search results: the case-folded title.
    pub fn title_sort_key(&self) -> String {
        self.title.to_lowercase()
    }
}
