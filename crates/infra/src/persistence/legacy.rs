// crates/infra/src/persistence/legacy.rs
//! Import of the older plain-text records: a bare integer in `counter.txt`
//! and one address per line in `ips.txt`.

use std::path::Path;

use tracing::{info, warn};
use visit_counter_domain::{AddressList, LockPolicy};
use visit_counter_ports::storage::CounterStore;
use visit_counter_shared_kernel::{ErrorContext, InfraResult, InfrastructureError, Result, VisitCount};

use super::locked_file::LockedFile;

const LEGACY_COUNT_RECORD: &str = "legacy counter";

/// What was carried over by [`migrate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub count: VisitCount,
    pub addresses: usize,
    pub duplicates: usize,
}

/// A blank file counts as zero.
pub fn parse_legacy_count(path: &Path, raw: &str) -> InfraResult<VisitCount> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(VisitCount::zero());
    }
    text.parse::<u64>().map(VisitCount::new).map_err(|e| InfrastructureError::Parse {
        path: path.to_path_buf(),
        record: LEGACY_COUNT_RECORD,
        details: format!("'{text}': {e}"),
    })
}

/// One address per line; blank lines and repeats are dropped.
/// Returns the list and the number of repeated entries.
pub fn parse_legacy_addresses(raw: &str) -> (AddressList, usize) {
    let lines: Vec<&str> = raw.lines().map(str::trim).filter(|line| !line.is_empty()).collect();
    let total = lines.len();
    let list = AddressList::from_entries(lines);
    let duplicates = total - list.len();
    (list, duplicates)
}

/// Copy the legacy records into `store`, replacing whatever it held.
///
/// The address list is written before the count.
pub fn migrate(
    store: &dyn CounterStore,
    legacy_count: &Path,
    legacy_ips: &Path,
    policy: LockPolicy,
) -> Result<MigrationReport> {
    let raw_count = read_shared(legacy_count, policy).context("reading legacy counter")?;
    let count = parse_legacy_count(legacy_count, &raw_count)?;

    let raw_ips = read_shared(legacy_ips, policy).context("reading legacy address list")?;
    let (addresses, duplicates) = parse_legacy_addresses(&raw_ips);
    if duplicates > 0 {
        warn!(duplicates, path = %legacy_ips.display(), "collapsed repeated legacy addresses");
    }

    store.write_addresses(&addresses)?;
    store.write_count(count)?;
    info!(count = count.value(), addresses = addresses.len(), "migrated legacy records");

    Ok(MigrationReport { count, addresses: addresses.len(), duplicates })
}

fn read_shared(path: &Path, policy: LockPolicy) -> InfraResult<String> {
    LockedFile::open_shared(path, policy)?.read_to_string()
}
