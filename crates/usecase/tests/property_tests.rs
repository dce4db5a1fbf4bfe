use std::{collections::HashSet, sync::Mutex};

use proptest::prelude::*;
use tempfile::tempdir;
use visit_counter_domain::{AddressList, Config, CounterOptions};
use visit_counter_ports::{storage::CounterStore, visitor::KnownVisitor};
use visit_counter_shared_kernel::{Result, VisitCount, VisitorAddress};
use visit_counter_usecase::{Disposition, VisitCounter};

#[derive(Default)]
struct MemoryStore {
    count: Mutex<VisitCount>,
    addresses: Mutex<AddressList>,
}

impl CounterStore for MemoryStore {
    fn read_count(&self) -> Result<VisitCount> {
        Ok(*self.count.lock().unwrap())
    }

    fn read_addresses(&self) -> Result<AddressList> {
        Ok(self.addresses.lock().unwrap().clone())
    }

    fn write_count(&self, count: VisitCount) -> Result<()> {
        *self.count.lock().unwrap() = count;
        Ok(())
    }

    fn write_addresses(&self, addresses: &AddressList) -> Result<()> {
        *self.addresses.lock().unwrap() = addresses.clone();
        Ok(())
    }

    fn update_count(&self, update: &mut dyn FnMut(VisitCount) -> VisitCount) -> Result<VisitCount> {
        let mut count = self.count.lock().unwrap();
        *count = update(*count);
        Ok(*count)
    }

    fn update_addresses(&self, update: &mut dyn FnMut(&mut AddressList) -> bool) -> Result<bool> {
        let mut list = self.addresses.lock().unwrap();
        Ok(update(&mut *list))
    }
}

fn resolve(unique_only: bool) -> (tempfile::TempDir, Config) {
    let tmp = tempdir().unwrap();
    let config = Config::resolve(CounterOptions {
        log_dir: Some(tmp.path().to_path_buf()),
        unique_only: Some(unique_only),
        ..Default::default()
    })
    .unwrap();
    (tmp, config)
}

proptest! {
    #[test]
    fn n_plain_visits_add_n(initial in 0u64..1_000_000, visits in 0usize..40) {
        let (_tmp, config) = resolve(false);
        let store = MemoryStore::default();
        store.write_count(VisitCount::from(initial)).unwrap();
        let who = KnownVisitor::default();
        let counter = VisitCounter::new(&config, &store, &who, &who);

        for _ in 0..visits {
            counter.display().unwrap();
        }
        prop_assert_eq!(counter.fetch_current_count().unwrap().value(), initial + visits as u64);
    }

    #[test]
    fn unique_count_matches_distinct_addresses(octets in proptest::collection::vec(1u8..20, 0..60)) {
        let (_tmp, config) = resolve(true);
        let store = MemoryStore::default();
        let mut seen = HashSet::new();

        for octet in &octets {
            let who = KnownVisitor::new(VisitorAddress::parse(format!("203.0.113.{octet}")), false);
            let outcome = VisitCounter::new(&config, &store, &who, &who).record_visit().unwrap();
            let first_time = seen.insert(*octet);
            prop_assert_eq!(outcome.disposition == Disposition::Counted, first_time);
        }

        prop_assert_eq!(store.read_count().unwrap().value(), seen.len() as u64);
        prop_assert_eq!(store.read_addresses().unwrap().len(), seen.len());
    }

    #[test]
    fn recorded_address_never_changes_count(repeats in 1usize..25) {
        let (_tmp, config) = resolve(true);
        let store = MemoryStore::default();
        let who = KnownVisitor::new(VisitorAddress::parse("198.51.100.77"), false);
        let counter = VisitCounter::new(&config, &store, &who, &who);

        let first = counter.record_visit().unwrap().count;
        for _ in 0..repeats {
            prop_assert_eq!(counter.record_visit().unwrap().count, first);
        }
    }
}
