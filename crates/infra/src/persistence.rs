// crates/infra/src/persistence.rs
pub mod flat_file_store;
pub mod legacy;
pub mod locked_file;
pub mod records;

pub use flat_file_store::{FlatFileStore, InitReport};
pub use legacy::{MigrationReport, migrate};
pub use locked_file::LockedFile;
