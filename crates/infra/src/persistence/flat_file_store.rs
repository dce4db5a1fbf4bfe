// crates/infra/src/persistence/flat_file_store.rs
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use visit_counter_domain::{AddressList, Config, LockPolicy, OptionName};
use visit_counter_ports::storage::CounterStore;
use visit_counter_shared_kernel::{DomainError, DomainResult, Result, VisitCount};

use super::{
    locked_file::LockedFile,
    records::{decode_addresses, decode_count, encode_addresses, encode_count},
};

/// Counter storage backed by two JSON files inside the configured log directory.
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    count_path: PathBuf,
    ip_path: PathBuf,
    lock_policy: LockPolicy,
}

/// Files touched by [`FlatFileStore::initialize`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InitReport {
    pub written: Vec<PathBuf>,
    pub kept: Vec<PathBuf>,
}

impl FlatFileStore {
    /// Open the store, failing when either record file is missing or read-only.
    pub fn open(config: &Config) -> Result<Self> {
        let store = Self::unchecked(config);
        validate_record_file(OptionName::CountFile, &store.count_path)?;
        validate_record_file(OptionName::IpFile, &store.ip_path)?;
        debug!(count = %store.count_path.display(), ips = %store.ip_path.display(), "opened flat-file store");
        Ok(store)
    }

    /// Create the record files, starting the count at `start` with no
    /// addresses. Existing files are left alone unless `overwrite` is set.
    pub fn initialize(config: &Config, start: VisitCount, overwrite: bool) -> Result<(Self, InitReport)> {
        let store = Self::unchecked(config);
        let mut report = InitReport::default();

        if overwrite || !store.count_path.exists() {
            let mut file = LockedFile::create_exclusive(&store.count_path, store.lock_policy)?;
            file.replace_contents(&encode_count(start)?)?;
            report.written.push(store.count_path.clone());
        } else {
            report.kept.push(store.count_path.clone());
        }

        if overwrite || !store.ip_path.exists() {
            let mut file = LockedFile::create_exclusive(&store.ip_path, store.lock_policy)?;
            file.replace_contents(&encode_addresses(&AddressList::new())?)?;
            report.written.push(store.ip_path.clone());
        } else {
            report.kept.push(store.ip_path.clone());
        }

        info!(written = report.written.len(), kept = report.kept.len(), "initialized counter records");
        Ok((store, report))
    }

    fn unchecked(config: &Config) -> Self {
        Self { count_path: config.count_path(), ip_path: config.ip_path(), lock_policy: config.lock_policy() }
    }
}

impl CounterStore for FlatFileStore {
    fn read_count(&self) -> Result<VisitCount> {
        let raw = LockedFile::open_shared(&self.count_path, self.lock_policy)?.read_to_string()?;
        Ok(decode_count(&self.count_path, &raw)?)
    }

    fn read_addresses(&self) -> Result<AddressList> {
        let raw = LockedFile::open_shared(&self.ip_path, self.lock_policy)?.read_to_string()?;
        Ok(decode_addresses(&self.ip_path, &raw)?)
    }

    fn write_count(&self, count: VisitCount) -> Result<()> {
        let mut file = LockedFile::open_exclusive(&self.count_path, self.lock_policy)?;
        file.replace_contents(&encode_count(count)?)?;
        Ok(())
    }

    fn write_addresses(&self, addresses: &AddressList) -> Result<()> {
        let mut file = LockedFile::open_exclusive(&self.ip_path, self.lock_policy)?;
        file.replace_contents(&encode_addresses(addresses)?)?;
        Ok(())
    }

    fn update_count(&self, update: &mut dyn FnMut(VisitCount) -> VisitCount) -> Result<VisitCount> {
        let mut file = LockedFile::open_exclusive(&self.count_path, self.lock_policy)?;
        let current = decode_count(&self.count_path, &file.read_to_string()?)?;
        let next = update(current);
        file.replace_contents(&encode_count(next)?)?;
        debug!(from = current.value(), to = next.value(), "count updated");
        Ok(next)
    }

    fn update_addresses(&self, update: &mut dyn FnMut(&mut AddressList) -> bool) -> Result<bool> {
        let mut file = LockedFile::open_exclusive(&self.ip_path, self.lock_policy)?;
        let mut addresses = decode_addresses(&self.ip_path, &file.read_to_string()?)?;
        let changed = update(&mut addresses);
        if changed {
            file.replace_contents(&encode_addresses(&addresses)?)?;
            debug!(entries = addresses.len(), "address list updated");
        }
        Ok(changed)
    }
}

fn validate_record_file(option: OptionName, path: &Path) -> DomainResult<()> {
    let invalid = |reason: String| DomainError::InvalidOption { option: option.as_str().to_string(), reason };
    match std::fs::metadata(path) {
        Ok(meta) if !meta.is_file() => Err(invalid(format!("'{}' appears to be an invalid file", path.display()))),
        Ok(meta) if meta.permissions().readonly() => Err(invalid(format!("'{}' is not writable", path.display()))),
        Ok(_) => Ok(()),
        Err(err) => Err(invalid(format!("'{}' appears to be an invalid file: {err}", path.display()))),
    }
}
