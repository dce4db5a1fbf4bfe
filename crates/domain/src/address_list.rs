// crates/domain/src/address_list.rs
use std::collections::HashSet;

use visit_counter_shared_kernel::VisitorAddress;

/// Ordered set of visitor addresses already counted.
///
/// Blank entries never make it in, and the first occurrence of a duplicate
/// keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressList {
    entries: Vec<VisitorAddress>,
    seen: HashSet<VisitorAddress>,
}

impl AddressList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored entries, dropping blanks and duplicates.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for entry in entries {
            if let Some(address) = VisitorAddress::parse(entry) {
                list.insert(address);
            }
        }
        list
    }

    pub fn contains(&self, address: &VisitorAddress) -> bool {
        self.seen.contains(address)
    }

    /// Append `address` unless it is blank or already present. Returns whether it was added.
    pub fn insert(&mut self, address: VisitorAddress) -> bool {
        if address.is_blank() || self.seen.contains(&address) {
            return false;
        }
        self.seen.insert(address.clone());
        self.entries.push(address);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.entries.iter().map(|a| a.as_str().to_string()).collect()
    }
}

impl<'a> IntoIterator for &'a AddressList {
    type Item = &'a VisitorAddress;
    type IntoIter = std::slice::Iter<'a, VisitorAddress>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
