use derive_more::Display;
use serde::Serialize;

/// Identifier for a library patron. Opaque to the library; any string the
/// request layer authenticates is acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize)]
#[serde(transparent)]
pub struct PatronId(String);

impl PatronId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PatronId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for PatronId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl AsRef<str> for PatronId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
