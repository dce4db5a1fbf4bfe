//! # Use Cases
//!
//! Application-level orchestration logic.
//!
//! - [`counter`]: the visit counter (update algorithm and rendering)
//! - [`dto`]: Data transfer objects for use case boundaries
//!
//! Use cases depend on both domain and ports, but not on infrastructure.

#![allow(clippy::multiple_crate_versions)]

pub mod counter;
pub mod dto;

pub use counter::VisitCounter;
pub use dto::{Disposition, VisitOutcome};
