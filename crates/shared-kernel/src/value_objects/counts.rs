// crates/shared-kernel/src/value_objects/counts.rs
use std::fmt;

use serde::{Deserialize, Serialize};

/// Running total of recorded visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitCount(u64);

impl VisitCount {
    #[inline]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn zero() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// The count after one more visit, saturating at `u64::MAX`.
    #[inline]
    pub const fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Decimal digits, most significant first.
    pub fn digits(self) -> Vec<u8> {
        self.0.to_string().bytes().map(|b| b - b'0').collect()
    }
}

impl Default for VisitCount {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<u64> for VisitCount {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for VisitCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
