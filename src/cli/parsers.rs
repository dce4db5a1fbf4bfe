// src/cli/parsers.rs
use std::str::FromStr;

/// A `key=value` pair as given to `--set`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValueArg {
    pub key: String,
    pub value: String,
}

impl FromStr for KeyValueArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s.split_once('=').ok_or_else(|| format!("expected key=value, got '{s}'"))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("missing option name in '{s}'"));
        }
        Ok(Self { key: key.to_string(), value: value.to_string() })
    }
}
