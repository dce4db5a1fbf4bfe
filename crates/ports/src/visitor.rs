// crates/ports/src/visitor.rs
use visit_counter_shared_kernel::VisitorAddress;

/// Best-guess public address of the current visitor.
pub trait AddressResolver: Send + Sync {
    fn visitor_address(&self) -> Option<VisitorAddress>;
}

/// Whether the current visitor asked not to be tracked.
pub trait DoNotTrackSource: Send + Sync {
    fn do_not_track(&self) -> bool;
}

/// A visitor known up front, e.g. passed on the command line.
#[derive(Debug, Clone, Default)]
pub struct KnownVisitor {
    pub address: Option<VisitorAddress>,
    pub do_not_track: bool,
}

impl KnownVisitor {
    pub fn new(address: Option<VisitorAddress>, do_not_track: bool) -> Self {
        Self { address, do_not_track }
    }
}

impl AddressResolver for KnownVisitor {
    fn visitor_address(&self) -> Option<VisitorAddress> {
        self.address.clone()
    }
}

impl DoNotTrackSource for KnownVisitor {
    fn do_not_track(&self) -> bool {
        self.do_not_track
    }
}
