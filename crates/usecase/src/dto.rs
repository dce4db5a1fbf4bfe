// crates/usecase/src/dto.rs
use serde::Serialize;
use visit_counter_shared_kernel::VisitCount;

/// What happened to the current visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Disposition {
    /// The count was incremented.
    Counted,
    /// The visitor's address was already on record; nothing was written.
    Repeat,
    /// The visitor sent do-not-track and `honorDnt` is on; nothing was written.
    DoNotTrack,
}

/// Result of recording one visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitOutcome {
    pub count: VisitCount,
    pub disposition: Disposition,
}

impl VisitOutcome {
    pub fn new(count: VisitCount, disposition: Disposition) -> Self {
        Self { count, disposition }
    }

    pub fn was_counted(&self) -> bool {
        self.disposition == Disposition::Counted
    }
}
