//! # Domain
//!
//! Option resolution, the visitor address model and count rendering. Nothing
//! in here touches the record files.

// crates/domain/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod address_list;
pub mod config;
pub mod display;
pub mod options;

pub use address_list::AddressList;
pub use config::{Config, LockPolicy};
pub use options::{CounterOptions, OptionName, OptionValue};
