use crate::token::tokenize;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// An inverted index from search words to posting sets of document ids.
///
/// Insertion is incremental and idempotent: re-indexing a document under a
/// word it already appears in is a no-op. Lookup is conjunctive: a document
/// matches only if it appears in the posting set of every queried word.
///
/// The id type is generic so the index carries no opinion about what a
/// document is; the catalog indexes books under their ISBN.
#[derive(Debug, Clone)]
pub struct WordIndex<I> {
    postings: HashMap<String, HashSet<I>>,
}

impl<I> Default for WordIndex<I> {
    fn default() -> Self {
        Self { postings: HashMap::new() }
    }
}

impl<I: Eq + Hash + Clone> WordIndex<I> {
    pub fn new() -> Self {
        Self { postings: HashMap::new() }
    }

    /// Index a document under every word of every given text field.
    pub fn index(&mut self, id: &I, texts: impl IntoIterator<Item = impl AsRef<str>>) {
        for text in texts {
            for word in tokenize(text.as_ref()) {
                self.postings.entry(word).or_default().insert(id.clone());
            }
        }
    }

    /// Return the ids present in the posting set of *every* given word.
    ///
    /// Starts from the smallest posting set and filters it against the
    /// others, so the work done is proportional to the smallest candidate
    /// set, never to the total number of indexed documents. An unknown word
    /// short-circuits to an empty result.
    ///
    /// The returned ids are in no particular order. Callers must pass at
    /// least one word; an empty query is a caller bug, not an empty match.
    pub fn search<W: AsRef<str>>(&self, words: &[W]) -> Vec<I> {
        debug_assert!(!words.is_empty(), "conjunctive search over an empty word list");
        let mut sets = Vec::with_capacity(words.len());
        for word in words {
            match self.postings.get(word.as_ref()) {
                Some(set) => sets.push(set),
                None => return Vec::new(),
            }
        }
        let Some(smallest) = sets.iter().min_by_key(|set| set.len()).copied() else {
            return Vec::new();
        };
        smallest
            .iter()
            .filter(|id| sets.iter().all(|set| set.contains(*id)))
            .cloned()
            .collect()
    }

    /// Number of distinct words with a non-empty posting set.
    pub fn word_count(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Discard every posting set.
    pub fn clear(&mut self) {
        self.postings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WordIndex<&'static str> {
        let mut index = WordIndex::new();
        index.index(&"B1", ["JavaScript: The Definitive Guide", "David Flanagan"]);
        index.index(&"B2", ["Eloquent JavaScript", "Marijn Haverbeke"]);
        index.index(&"B3", ["The Rust Programming Language", "Steve Klabnik", "Carol Nichols"]);
        index
    }

    #[test]
    fn test_single_word_lookup() {
        let index = sample();
        let mut hits = index.search(&["javascript"]);
        hits.sort();
        assert_eq!(hits, ["B1", "B2"]);
    }

    #[test]
    fn test_search_is_conjunctive() {
        let index = sample();
        assert_eq!(index.search(&["definitive", "javascript"]), ["B1"]);
        assert_eq!(index.search(&["javascript", "rust"]), Vec::<&str>::new());
    }

    #[test]
    fn test_author_words_are_indexed() {
        let index = sample();
        assert_eq!(index.search(&["flanagan"]), ["B1"]);
        let mut hits = index.search(&["the"]);
        hits.sort();
        assert_eq!(hits, ["B1", "B3"]);
    }

    #[test]
    fn test_unknown_word_short_circuits() {
        let index = sample();
        assert!(index.search(&["javascript", "nosuchword"]).is_empty());
    }

    #[test]
    fn test_indexing_is_idempotent() {
        let mut index = sample();
        index.index(&"B1", ["JavaScript: The Definitive Guide", "David Flanagan"]);
        assert_eq!(index.search(&["definitive"]), ["B1"]);
    }

    #[test]
    fn test_clear_discards_postings() {
        let mut index = sample();
        assert!(!index.is_empty());
        index.clear();
        assert!(index.is_empty());
        assert!(index.search(&["javascript"]).is_empty());
        assert_eq!(index.word_count(), 0);
    }
}
