// src/cli/value_enum.rs
use clap::ValueEnum;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum CliFormat {
    #[default]
    Text,
    Json,
}
