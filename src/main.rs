// src/main.rs
#![allow(clippy::multiple_crate_versions)]

use std::{io, process::ExitCode};

use clap::Parser;
use tracing_subscriber::EnvFilter;
use visit_counter::{app, cli::Args};
use visit_counter_shared_kernel::{DomainError, VisitCounterError};

const EXIT_FAILURE: u8 = 1;
const EXIT_CONFIGURATION: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let stdout = io::stdout();
    match app::run(args, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

/// `-v` flags win over `RUST_LOG`; with neither only warnings are shown.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(false).init();
}

fn exit_code(err: &anyhow::Error) -> u8 {
    let configuration = err.downcast_ref::<DomainError>().is_some()
        || err.downcast_ref::<VisitCounterError>().is_some_and(VisitCounterError::is_configuration);
    if configuration { EXIT_CONFIGURATION } else { EXIT_FAILURE }
}
