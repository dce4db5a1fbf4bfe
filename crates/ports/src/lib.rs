//! # Ports
//!
//! Interface definitions for external dependencies.
//!
//! This crate defines traits that abstract external concerns:
//!
//! - [`storage`]: Locked access to the count and address records
//! - [`visitor`]: Facts about the current request (address, do-not-track)
//!
//! These ports allow the use cases to remain independent of specific
//! implementations.

// crates/ports/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod storage;
pub mod visitor;
