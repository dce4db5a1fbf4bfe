// crates/shared-kernel/src/value_objects/visitor.rs
use std::fmt;

use serde::{Deserialize, Serialize};

/// Address string identifying a visitor for deduplication.
///
/// Surrounding whitespace is trimmed on construction; no IP syntax check is
/// made here.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitorAddress(String);

impl VisitorAddress {
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(value.as_ref().trim().to_string())
    }

    /// `None` for empty or whitespace-only input.
    pub fn parse(value: impl AsRef<str>) -> Option<Self> {
        let address = Self::new(value);
        (!address.is_blank()).then_some(address)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for VisitorAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VisitorAddress {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for VisitorAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
