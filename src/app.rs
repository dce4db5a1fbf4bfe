// src/app.rs
use std::{fs, io::Write, path::PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};
use visit_counter_domain::{Config, CounterOptions, config::DEFAULT_LOG_DIR};
use visit_counter_infra::{FlatFileStore, RequestContext, load_options, persistence::migrate};
use visit_counter_ports::visitor::KnownVisitor;
use visit_counter_shared_kernel::VisitCount;
use visit_counter_usecase::{
    counter::VisitCounter,
    dto::{Disposition, VisitOutcome},
};

use crate::cli::{Args, CliFormat, Command, OptionArgs};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderedVisit<'a> {
    count: VisitCount,
    #[serde(skip_serializing_if = "Option::is_none")]
    disposition: Option<Disposition>,
    rendered: &'a str,
}

/// Execute the parsed command, writing results to `out`.
pub fn run(args: Args, out: &mut dyn Write) -> Result<()> {
    let options = layered_options(&args.options)?;
    match args.command {
        Command::Hit { address, dnt, trust_proxy, format } => {
            let config = Config::resolve(options)?;
            let store = FlatFileStore::open(&config)?;
            let mut request = RequestContext::from_cgi_env().with_trusted_proxy(trust_proxy).with_do_not_track(dnt);
            if let Some(address) = address {
                request = request.with_address(address);
            }
            let counter = VisitCounter::new(&config, &store, &request, &request);
            let outcome = counter.record_visit().context("recording visit")?;
            let rendered = counter.render(outcome.count);
            write_visit(out, format, &outcome_view(&outcome, &rendered))
        }
        Command::Show { format } => {
            let config = Config::resolve(options)?;
            let store = FlatFileStore::open(&config)?;
            let nobody = KnownVisitor::default();
            let counter = VisitCounter::new(&config, &store, &nobody, &nobody);
            let count = counter.fetch_current_count()?;
            let rendered = counter.render(count);
            write_visit(out, format, &RenderedVisit { count, disposition: None, rendered: &rendered })
        }
        Command::Addresses { json } => {
            let config = Config::resolve(options)?;
            let store = FlatFileStore::open(&config)?;
            let nobody = KnownVisitor::default();
            let list = VisitCounter::new(&config, &store, &nobody, &nobody).fetch_current_address_list()?;
            if json {
                writeln!(out, "{}", serde_json::to_string(&list.to_strings())?)?;
            } else {
                for address in &list {
                    writeln!(out, "{address}")?;
                }
            }
            Ok(())
        }
        Command::Init { force, start } => {
            let log_dir = options.log_dir.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));
            fs::create_dir_all(&log_dir)
                .with_context(|| format!("creating log directory '{}'", log_dir.display()))?;
            let config = Config::resolve(options)?;
            let (_, report) = FlatFileStore::initialize(&config, VisitCount::new(start), force)?;
            for path in &report.written {
                writeln!(out, "wrote {}", path.display())?;
            }
            for path in &report.kept {
                writeln!(out, "kept {} (use --force to overwrite)", path.display())?;
            }
            Ok(())
        }
        Command::Migrate { legacy_count, legacy_ips } => {
            let config = Config::resolve(options)?;
            let (store, _) = FlatFileStore::initialize(&config, VisitCount::zero(), false)?;
            let report = migrate(&store, &legacy_count, &legacy_ips, config.lock_policy())?;
            writeln!(out, "migrated count {} and {} address(es)", report.count, report.addresses)?;
            if report.duplicates > 0 {
                writeln!(out, "dropped {} repeated address(es)", report.duplicates)?;
            }
            Ok(())
        }
    }
}

/// Merge the option sources, lowest precedence first.
pub fn layered_options(args: &OptionArgs) -> Result<CounterOptions> {
    let mut options = CounterOptions::default();
    if let Some(path) = &args.config {
        options = options.merge(load_options(path)?);
        info!(path = %path.display(), "applied options file");
    }
    let pairs = CounterOptions::from_pairs(args.set.iter().map(|kv| (kv.key.as_str(), kv.value.as_str())))?;
    let options = options.merge(pairs).merge(args.flag_overrides());
    debug!(?options, "layered options");
    Ok(options)
}

fn outcome_view<'a>(outcome: &VisitOutcome, rendered: &'a str) -> RenderedVisit<'a> {
    RenderedVisit { count: outcome.count, disposition: Some(outcome.disposition), rendered }
}

fn write_visit(out: &mut dyn Write, format: CliFormat, visit: &RenderedVisit<'_>) -> Result<()> {
    match format {
        CliFormat::Text => writeln!(out, "{}", visit.rendered)?,
        CliFormat::Json => writeln!(out, "{}", serde_json::to_string(visit)?)?,
    }
    Ok(())
}
