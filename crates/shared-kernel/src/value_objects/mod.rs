// crates/shared-kernel/src/value_objects/mod.rs
pub mod counts;
pub mod visitor;

pub use counts::VisitCount;
pub use visitor::VisitorAddress;
