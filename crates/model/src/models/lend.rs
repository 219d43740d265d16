use crate::models::{Isbn, PatronId};
use serde::Serialize;

/// An active checkout: the association of one patron with one book.
///
/// Carries no payload beyond the pair. At most one active record may exist
/// per (patron, book) pair, and the number of active records for a book
/// never exceeds that book's copy count; both rules are enforced by the
/// lending ledger, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lend {
    pub patron_id: PatronId,
    pub isbn: Isbn,
}

impl Lend {
    pub fn new(patron_id: impl Into<PatronId>, isbn: Isbn) -> Self {
        Self { patron_id: patron_id.into(), isbn }
    }
}
