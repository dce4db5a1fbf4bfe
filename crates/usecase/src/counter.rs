// crates/usecase/src/counter.rs
use tracing::{debug, info};
use visit_counter_domain::{AddressList, Config, OptionName, OptionValue, display};
use visit_counter_ports::{
    storage::CounterStore,
    visitor::{AddressResolver, DoNotTrackSource},
};
use visit_counter_shared_kernel::{ApplicationError, Result, VisitCount};

use crate::dto::{Disposition, VisitOutcome};

/// Counts visits against a [`CounterStore`] and renders the result.
///
/// Holds no state of its own; every call goes back to the store.
pub struct VisitCounter<'a> {
    config: &'a Config,
    store: &'a dyn CounterStore,
    resolver: &'a dyn AddressResolver,
    dnt: &'a dyn DoNotTrackSource,
}

impl<'a> VisitCounter<'a> {
    pub fn new(
        config: &'a Config,
        store: &'a dyn CounterStore,
        resolver: &'a dyn AddressResolver,
        dnt: &'a dyn DoNotTrackSource,
    ) -> Self {
        Self { config, store, resolver, dnt }
    }

    pub fn fetch_current_count(&self) -> Result<VisitCount> {
        self.store.read_count()
    }

    pub fn fetch_current_address_list(&self) -> Result<AddressList> {
        self.store.read_addresses()
    }

    pub fn get_option(&self, name: OptionName) -> OptionValue {
        self.config.get_option(name)
    }

    /// Record the current visit and render the resulting count.
    ///
    /// A visit skipped for do-not-track still renders the current count.
    pub fn display(&self) -> Result<String> {
        let outcome = self.record_visit()?;
        Ok(self.render(outcome.count))
    }

    /// Render `count` without touching the store.
    pub fn render(&self, count: VisitCount) -> String {
        display::render(self.config, count)
    }

    /// Apply the update algorithm for one visit.
    ///
    /// With `uniqueOnly` the address list is written before the count, so a
    /// failure between the two leaves the visitor recorded but uncounted and
    /// a retry cannot count them twice.
    pub fn record_visit(&self) -> Result<VisitOutcome> {
        if self.config.honor_dnt() && self.dnt.do_not_track() {
            let count = self.store.read_count()?;
            debug!(count = count.value(), "do-not-track honoured, visit not counted");
            return Ok(VisitOutcome::new(count, Disposition::DoNotTrack));
        }

        if self.config.unique_only() {
            let address = self.resolver.visitor_address().ok_or(ApplicationError::VisitorAddressUnavailable)?;
            let is_new = self.store.update_addresses(&mut |list: &mut AddressList| list.insert(address.clone()))?;
            if !is_new {
                let count = self.store.read_count()?;
                debug!(%address, count = count.value(), "repeat visitor, count unchanged");
                return Ok(VisitOutcome::new(count, Disposition::Repeat));
            }
            let count = self.increment()?;
            info!(%address, count = count.value(), "new unique visitor counted");
            return Ok(VisitOutcome::new(count, Disposition::Counted));
        }

        let count = self.increment()?;
        info!(count = count.value(), "visit counted");
        Ok(VisitOutcome::new(count, Disposition::Counted))
    }

    fn increment(&self) -> Result<VisitCount> {
        self.store.update_count(&mut |count: VisitCount| count.incremented())
    }
}
