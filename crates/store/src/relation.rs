use biblio_model::{Isbn, Lend, PatronId};
use std::collections::{HashMap, HashSet};

/// The active-lending relation: one set of (patron, book) pairs with two
/// derived lookup indices.
///
/// The pair set is authoritative. The by-patron and by-book maps exist
/// only to answer lookups without scanning, and are touched exclusively by
/// [`insert`](Self::insert) and [`remove`](Self::remove), so the two views
/// cannot drift apart.
#[derive(Debug, Default)]
pub struct LendingSet {
    pairs: HashSet<Lend>,
    by_patron: HashMap<PatronId, HashSet<Isbn>>,
    by_isbn: HashMap<Isbn, HashSet<PatronId>>,
}

impl LendingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate a pair. Returns `false` (and changes nothing) if the pair
    /// was already active.
    pub fn insert(&mut self, lend: Lend) -> bool {
        if !self.pairs.insert(lend.clone()) {
            return false;
        }
        self.by_patron.entry(lend.patron_id.clone()).or_default().insert(lend.isbn.clone());
        self.by_isbn.entry(lend.isbn).or_default().insert(lend.patron_id);
        true
    }

    /// Deactivate a pair. Returns `false` if it was not active.
    pub fn remove(&mut self, lend: &Lend) -> bool {
        if !self.pairs.remove(lend) {
            return false;
        }
        if let Some(isbns) = self.by_patron.get_mut(&lend.patron_id) {
            isbns.remove(&lend.isbn);
            if isbns.is_empty() {
                self.by_patron.remove(&lend.patron_id);
            }
        }
        if let Some(patrons) = self.by_isbn.get_mut(&lend.isbn) {
            patrons.remove(&lend.patron_id);
            if patrons.is_empty() {
                self.by_isbn.remove(&lend.isbn);
            }
        }
        true
    }

    pub fn contains(&self, patron_id: &PatronId, isbn: &Isbn) -> bool {
        self.by_isbn.get(isbn).is_some_and(|patrons| patrons.contains(patron_id))
    }

    /// Active lendings of one book.
    pub fn count_for_isbn(&self, isbn: &Isbn) -> usize {
        self.by_isbn.get(isbn).map_or(0, HashSet::len)
    }

    /// Active lendings held by one patron.
    pub fn count_for_patron(&self, patron_id: &PatronId) -> usize {
        self.by_patron.get(patron_id).map_or(0, HashSet::len)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
        self.by_patron.clear();
        self.by_isbn.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lend(patron: &str, isbn: &str) -> Lend {
        Lend::new(patron, Isbn::new(isbn))
    }

    #[test]
    fn test_insert_updates_both_views() {
        let mut set = LendingSet::new();
        assert!(set.insert(lend("joe", "111-111-111-1")));
        assert!(set.insert(lend("joe", "222-222-222-2")));
        assert!(set.insert(lend("sue", "111-111-111-1")));
        assert_eq!(set.len(), 3);
        assert_eq!(set.count_for_isbn(&Isbn::new("111-111-111-1")), 2);
        assert_eq!(set.count_for_patron(&PatronId::new("joe")), 2);
        assert!(set.contains(&PatronId::new("sue"), &Isbn::new("111-111-111-1")));
    }

    #[test]
    fn test_double_insert_is_rejected() {
        let mut set = LendingSet::new();
        assert!(set.insert(lend("joe", "111-111-111-1")));
        assert!(!set.insert(lend("joe", "111-111-111-1")));
        assert_eq!(set.len(), 1);
        assert_eq!(set.count_for_isbn(&Isbn::new("111-111-111-1")), 1);
    }

    #[test]
    fn test_remove_updates_both_views() {
        let mut set = LendingSet::new();
        set.insert(lend("joe", "111-111-111-1"));
        set.insert(lend("sue", "111-111-111-1"));
        assert!(set.remove(&lend("joe", "111-111-111-1")));
        assert!(!set.remove(&lend("joe", "111-111-111-1")));
        assert_eq!(set.count_for_isbn(&Isbn::new("111-111-111-1")), 1);
        assert_eq!(set.count_for_patron(&PatronId::new("joe")), 0);
        assert!(!set.contains(&PatronId::new("joe"), &Isbn::new("111-111-111-1")));
    }

    #[test]
    fn test_views_never_desync() {
        let mut set = LendingSet::new();
        let patrons = ["joe", "sue", "ann"];
        let isbns = ["111-111-111-1", "222-222-222-2"];
        for patron in patrons {
            for isbn in isbns {
                set.insert(lend(patron, isbn));
            }
        }
        set.remove(&lend("sue", "111-111-111-1"));
        set.remove(&lend("ann", "222-222-222-2"));
        let by_isbn: usize = isbns.iter().map(|i| set.count_for_isbn(&Isbn::new(*i))).sum();
        let by_patron: usize = patrons.iter().map(|p| set.count_for_patron(&PatronId::new(*p))).sum();
        assert_eq!(by_isbn, set.len());
        assert_eq!(by_patron, set.len());
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut set = LendingSet::new();
        set.insert(lend("joe", "111-111-111-1"));
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.count_for_isbn(&Isbn::new("111-111-111-1")), 0);
        assert_eq!(set.count_for_patron(&PatronId::new("joe")), 0);
    }
}
