// crates/ports/src/storage.rs
use visit_counter_domain::AddressList;
use visit_counter_shared_kernel::{Result, VisitCount};

/// Port over the two persisted records.
///
/// Reads hold a shared lock on one record for their duration; writes and
/// updates hold an exclusive lock on one record. No operation spans both
/// records.
pub trait CounterStore: Send + Sync {
    fn read_count(&self) -> Result<VisitCount>;

    fn read_addresses(&self) -> Result<AddressList>;

    fn write_count(&self, count: VisitCount) -> Result<()>;

    fn write_addresses(&self, addresses: &AddressList) -> Result<()>;

    /// Read, transform and write the count under one exclusive lock.
    /// Returns the value that was written.
    fn update_count(&self, update: &mut dyn FnMut(VisitCount) -> VisitCount) -> Result<VisitCount>;

    /// Read the address list under an exclusive lock and hand it to `update`.
    /// The list is written back before the lock is released only when `update`
    /// returns `true`; that value is passed through.
    fn update_addresses(&self, update: &mut dyn FnMut(&mut AddressList) -> bool) -> Result<bool>;
}
