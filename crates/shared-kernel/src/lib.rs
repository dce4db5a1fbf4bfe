// crates/shared-kernel/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub use error::{
    ApplicationError, DomainError, DomainResult, ErrorContext, InfraResult,
    InfrastructureError, LockKind, Result, VisitCounterError,
};

pub mod error;
pub mod value_objects;

pub use value_objects::{VisitCount, VisitorAddress};
