//! Inverted word index for catalog search.
//!
//! Maps lowercased search words to posting sets of document identifiers.
//! Built incrementally as documents are added; queried conjunctively
//! (every word must match). The index knows nothing about result ordering,
//! that is the caller's concern.

mod index;
mod token;

pub use crate::index::WordIndex;
pub use crate::token::{MIN_WORD_LEN, tokenize};
