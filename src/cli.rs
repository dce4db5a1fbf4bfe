// src/cli.rs
mod args;
mod parsers;
mod value_enum;

pub use args::{Args, Command, OptionArgs};
pub use parsers::KeyValueArg;
pub use value_enum::CliFormat;
