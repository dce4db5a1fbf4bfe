//! # Infra
//!
//! Adapters behind the ports: the fs2-locked JSON record store, legacy record
//! import, request-derived visitor identity and options file loading.

// crates/infra/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod options_file;
pub mod persistence;
pub mod request;

pub use options_file::load_options;
pub use persistence::{FlatFileStore, InitReport, MigrationReport};
pub use request::RequestContext;
