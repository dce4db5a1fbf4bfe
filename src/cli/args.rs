// src/cli/args.rs
use std::path::PathBuf;

use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand, ValueHint, builder::BoolishValueParser};
use visit_counter_domain::CounterOptions;

use super::{parsers::KeyValueArg, value_enum::CliFormat};

/// Top-level CLI arguments parsed via clap.
#[derive(Parser, Debug)]
#[command(name = "visit_counter", version = crate::VERSION, about = "Flat-file visitor counter")]
pub struct Args {
    #[command(flatten)]
    pub options: OptionArgs,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a visit and print the rendered count
    Hit {
        /// Visitor address; overrides REMOTE_ADDR and proxy headers
        #[arg(long)]
        address: Option<String>,

        /// Treat the visitor as having sent a do-not-track signal
        #[arg(long)]
        dnt: bool,

        /// Take the visitor address from X-Forwarded-For / X-Real-IP / Client-IP
        #[arg(long)]
        trust_proxy: bool,

        #[arg(long, value_enum, default_value = "text")]
        format: CliFormat,
    },

    /// Print the rendered current count without recording a visit
    Show {
        #[arg(long, value_enum, default_value = "text")]
        format: CliFormat,
    },

    /// List recorded visitor addresses
    Addresses {
        #[arg(long)]
        json: bool,
    },

    /// Create the log directory and record files
    Init {
        /// Overwrite existing record files
        #[arg(long)]
        force: bool,

        /// Initial visit count
        #[arg(long, default_value_t = 0)]
        start: u64,
    },

    /// Import plain-text records from older installations
    Migrate {
        #[arg(long, value_hint = ValueHint::FilePath)]
        legacy_count: PathBuf,

        #[arg(long, value_hint = ValueHint::FilePath)]
        legacy_ips: PathBuf,
    },
}

/// Option overrides shared by every subcommand.
///
/// Precedence, lowest first: `--config` file, `--set` pairs, dedicated flags.
#[derive(ClapArgs, Debug, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct OptionArgs {
    /// Options file (JSON, or YAML with the `yaml` feature)
    #[arg(long, global = true, value_hint = ValueHint::FilePath, help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Set an option by name, e.g. --set uniqueOnly=false (repeatable)
    #[arg(long = "set", global = true, value_name = "KEY=VALUE", help_heading = "Options")]
    pub set: Vec<KeyValueArg>,

    #[arg(long, global = true, value_hint = ValueHint::DirPath, help_heading = "Options")]
    pub log_dir: Option<PathBuf>,

    #[arg(long, global = true, help_heading = "Options")]
    pub count_file: Option<String>,

    #[arg(long, global = true, help_heading = "Options")]
    pub ip_file: Option<String>,

    #[arg(long, global = true, value_hint = ValueHint::DirPath, help_heading = "Options")]
    pub image_dir: Option<PathBuf>,

    #[arg(long, global = true, help_heading = "Options")]
    pub image_ext: Option<String>,

    /// Count each address once (default true)
    #[arg(long, global = true, value_name = "BOOL", value_parser = BoolishValueParser::new(), help_heading = "Options")]
    pub unique_only: Option<bool>,

    /// Render digit images instead of text
    #[arg(long, global = true, help_heading = "Options")]
    pub as_image: bool,

    /// Skip counting visitors that send DNT or Sec-GPC
    #[arg(long, global = true, help_heading = "Options")]
    pub honor_dnt: bool,

    /// Text template with a single %s for the count
    #[arg(long = "visitor-text", global = true, help_heading = "Options")]
    pub visitor_text: Option<String>,

    /// Lock wait limit; 0 fails immediately, unset waits indefinitely
    #[arg(long, global = true, value_name = "MS", help_heading = "Options")]
    pub lock_timeout_ms: Option<u64>,
}

impl OptionArgs {
    /// Overrides carried by the dedicated flags. Boolean switches only ever
    /// turn an option on.
    pub fn flag_overrides(&self) -> CounterOptions {
        CounterOptions {
            log_dir: self.log_dir.clone(),
            count_file: self.count_file.clone(),
            ip_file: self.ip_file.clone(),
            image_dir: self.image_dir.clone(),
            image_ext: self.image_ext.clone(),
            unique_only: self.unique_only,
            as_image: self.as_image.then_some(true),
            honor_dnt: self.honor_dnt.then_some(true),
            visitor_text_string: self.visitor_text.clone(),
            lock_timeout_ms: self.lock_timeout_ms,
        }
    }
}
