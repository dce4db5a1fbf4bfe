// crates/domain/src/options.rs
use std::{fmt, path::PathBuf, str::FromStr};

use serde::{Deserialize, Serialize};
use visit_counter_shared_kernel::{DomainError, DomainResult};

/// Recognised option keys, spelled the way they appear in options files and `--set` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionName {
    LogDir,
    CountFile,
    IpFile,
    ImageDir,
    ImageExt,
    UniqueOnly,
    AsImage,
    HonorDnt,
    VisitorTextString,
    LockTimeoutMs,
}

impl OptionName {
    pub const ALL: [OptionName; 10] = [
        Self::LogDir,
        Self::CountFile,
        Self::IpFile,
        Self::ImageDir,
        Self::ImageExt,
        Self::UniqueOnly,
        Self::AsImage,
        Self::HonorDnt,
        Self::VisitorTextString,
        Self::LockTimeoutMs,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LogDir => "logDir",
            Self::CountFile => "countFile",
            Self::IpFile => "ipFile",
            Self::ImageDir => "imageDir",
            Self::ImageExt => "imageExt",
            Self::UniqueOnly => "uniqueOnly",
            Self::AsImage => "asImage",
            Self::HonorDnt => "honorDnt",
            Self::VisitorTextString => "visitorTextString",
            Self::LockTimeoutMs => "lockTimeoutMs",
        }
    }
}

impl FromStr for OptionName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| DomainError::UnknownOption { option: s.to_string() })
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved option value as handed out by `Config::get_option`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Path(PathBuf),
    Text(String),
    Flag(bool),
    Millis(Option<u64>),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Text(text) => f.write_str(text),
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::Millis(Some(ms)) => write!(f, "{ms}"),
            Self::Millis(None) => f.write_str("blocking"),
        }
    }
}

/// User-supplied overrides. Every field is optional; absent fields fall back
/// to the defaults during resolution.
///
/// Unknown keys are rejected, both when deserializing an options file and in
/// [`CounterOptions::set`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CounterOptions {
    pub log_dir: Option<PathBuf>,
    pub count_file: Option<String>,
    pub ip_file: Option<String>,
    pub image_dir: Option<PathBuf>,
    pub image_ext: Option<String>,
    pub unique_only: Option<bool>,
    pub as_image: Option<bool>,
    pub honor_dnt: Option<bool>,
    pub visitor_text_string: Option<String>,
    pub lock_timeout_ms: Option<u64>,
}

impl CounterOptions {
    /// Build overrides from raw `name -> value` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = Self::default();
        for (key, value) in pairs {
            options.set(key.as_ref(), value.as_ref())?;
        }
        Ok(options)
    }

    /// Parse and store a single raw value.
    pub fn set(&mut self, key: &str, value: &str) -> DomainResult<()> {
        let name: OptionName = key.parse()?;
        match name {
            OptionName::LogDir => self.log_dir = Some(PathBuf::from(value)),
            OptionName::CountFile => self.count_file = Some(value.to_string()),
            OptionName::IpFile => self.ip_file = Some(value.to_string()),
            OptionName::ImageDir => self.image_dir = Some(PathBuf::from(value)),
            OptionName::ImageExt => self.image_ext = Some(value.to_string()),
            OptionName::UniqueOnly => self.unique_only = Some(parse_flag(name, value)?),
            OptionName::AsImage => self.as_image = Some(parse_flag(name, value)?),
            OptionName::HonorDnt => self.honor_dnt = Some(parse_flag(name, value)?),
            OptionName::VisitorTextString => self.visitor_text_string = Some(value.to_string()),
            OptionName::LockTimeoutMs => {
                let ms = value.trim().parse::<u64>().map_err(|e| DomainError::InvalidOption {
                    option: name.as_str().to_string(),
                    reason: format!("expected a number of milliseconds: {e}"),
                })?;
                self.lock_timeout_ms = Some(ms);
            }
        }
        Ok(())
    }

    /// Layer `overrides` on top of `self`; fields set in `overrides` win.
    #[must_use]
    pub fn merge(self, overrides: CounterOptions) -> Self {
        Self {
            log_dir: overrides.log_dir.or(self.log_dir),
            count_file: overrides.count_file.or(self.count_file),
            ip_file: overrides.ip_file.or(self.ip_file),
            image_dir: overrides.image_dir.or(self.image_dir),
            image_ext: overrides.image_ext.or(self.image_ext),
            unique_only: overrides.unique_only.or(self.unique_only),
            as_image: overrides.as_image.or(self.as_image),
            honor_dnt: overrides.honor_dnt.or(self.honor_dnt),
            visitor_text_string: overrides.visitor_text_string.or(self.visitor_text_string),
            lock_timeout_ms: overrides.lock_timeout_ms.or(self.lock_timeout_ms),
        }
    }
}

fn parse_flag(name: OptionName, value: &str) -> DomainResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(DomainError::InvalidOption {
            option: name.as_str().to_string(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}
