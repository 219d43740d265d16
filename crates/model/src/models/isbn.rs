use derive_more::{Display, Error};
use regex::Regex;
use serde::Serialize;
use std::str::FromStr;
use std::sync::LazyLock;

static ISBN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{3}-\d{3}-\d{3}-\d$").unwrap());

/// Catalog identifier for a book, grouped ISBN-10 style: `ddd-ddd-ddd-d`.
///
/// The shape is only enforced when a book enters the catalog ([`FromStr`]);
/// lookup operations accept whatever string the request carried via
/// [`Isbn::new`] and simply fail to match anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize)]
#[serde(transparent)]
pub struct Isbn(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("must have the form ddd-ddd-ddd-d")]
pub struct InvalidIsbn;

impl Isbn {
    /// Wrap a raw identifier without checking its shape.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Isbn {
    type Err = InvalidIsbn;
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if ISBN_REGEX.is_match(raw) { Ok(Self(raw.to_string())) } else { Err(InvalidIsbn) }
    }
}

impl AsRef<str> for Isbn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
