// crates/domain/src/config.rs
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use visit_counter_shared_kernel::{DomainError, DomainResult};

use crate::options::{CounterOptions, OptionName, OptionValue};

pub const DEFAULT_LOG_DIR: &str = "counter/logs";
pub const DEFAULT_COUNT_FILE: &str = "counter.json";
pub const DEFAULT_IP_FILE: &str = "ips.json";
pub const DEFAULT_IMAGE_DIR: &str = "counter/images";
pub const DEFAULT_IMAGE_EXT: &str = ".png";
pub const DEFAULT_VISITOR_TEXT: &str = "You are visitor #%s";

/// Token replaced by the formatted count in `visitorTextString`.
pub const PLACEHOLDER: &str = "%s";

/// Extension both record files must carry.
pub const RECORD_EXTENSION: &str = ".json";

/// How long a storage operation may wait for a file lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockPolicy {
    #[default]
    Blocking,
    FailFast,
    Timeout(Duration),
}

impl LockPolicy {
    pub fn from_timeout_ms(ms: Option<u64>) -> Self {
        match ms {
            None => Self::Blocking,
            Some(0) => Self::FailFast,
            Some(ms) => Self::Timeout(Duration::from_millis(ms)),
        }
    }

    pub fn timeout_ms(self) -> Option<u64> {
        match self {
            Self::Blocking => None,
            Self::FailFast => Some(0),
            Self::Timeout(d) => Some(u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
        }
    }
}

/// Domain representation of resolved configuration options.
///
/// Only obtainable through [`Config::resolve`], so every instance has passed
/// validation. Cloning is cheap enough to hand copies to worker threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    log_dir: PathBuf,
    count_file: String,
    ip_file: String,
    image_dir: PathBuf,
    image_ext: String,
    unique_only: bool,
    as_image: bool,
    honor_dnt: bool,
    visitor_text: String,
    lock_policy: LockPolicy,
}

impl Config {
    /// Merge `options` with the defaults, normalise, and validate.
    ///
    /// Only directory existence is checked on disk; record files are checked
    /// when a store is opened against the result.
    pub fn resolve(options: CounterOptions) -> DomainResult<Self> {
        let log_dir = strip_trailing_separators(&options.log_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)));
        ensure_directory(OptionName::LogDir, &log_dir)?;

        let count_file = options.count_file.unwrap_or_else(|| DEFAULT_COUNT_FILE.to_string());
        ensure_record_name(OptionName::CountFile, &count_file)?;

        let ip_file = options.ip_file.unwrap_or_else(|| DEFAULT_IP_FILE.to_string());
        ensure_record_name(OptionName::IpFile, &ip_file)?;

        let as_image = options.as_image.unwrap_or(false);
        let image_dir_explicit = options.image_dir.is_some();
        let image_dir =
            strip_trailing_separators(&options.image_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE_DIR)));
        // Text output never reads imageDir, so the default location only has
        // to exist once images are rendered; an explicit value is always checked.
        if as_image || image_dir_explicit {
            ensure_directory(OptionName::ImageDir, &image_dir)?;
        }

        let image_ext = normalize_extension(options.image_ext.as_deref().unwrap_or(DEFAULT_IMAGE_EXT))?;

        let visitor_text = options.visitor_text_string.unwrap_or_else(|| DEFAULT_VISITOR_TEXT.to_string());
        let placeholders = visitor_text.matches(PLACEHOLDER).count();
        if placeholders != 1 {
            return Err(invalid(
                OptionName::VisitorTextString,
                format!("must contain exactly one '{PLACEHOLDER}' placeholder, found {placeholders}"),
            ));
        }

        Ok(Self {
            log_dir,
            count_file,
            ip_file,
            image_dir,
            image_ext,
            unique_only: options.unique_only.unwrap_or(true),
            as_image,
            honor_dnt: options.honor_dnt.unwrap_or(false),
            visitor_text,
            lock_policy: LockPolicy::from_timeout_ms(options.lock_timeout_ms),
        })
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn count_file(&self) -> &str {
        &self.count_file
    }

    pub fn ip_file(&self) -> &str {
        &self.ip_file
    }

    pub fn count_path(&self) -> PathBuf {
        self.log_dir.join(&self.count_file)
    }

    pub fn ip_path(&self) -> PathBuf {
        self.log_dir.join(&self.ip_file)
    }

    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    pub fn image_ext(&self) -> &str {
        &self.image_ext
    }

    pub fn unique_only(&self) -> bool {
        self.unique_only
    }

    pub fn as_image(&self) -> bool {
        self.as_image
    }

    pub fn honor_dnt(&self) -> bool {
        self.honor_dnt
    }

    pub fn visitor_text(&self) -> &str {
        &self.visitor_text
    }

    pub fn lock_policy(&self) -> LockPolicy {
        self.lock_policy
    }

    pub fn get_option(&self, name: OptionName) -> OptionValue {
        match name {
            OptionName::LogDir => OptionValue::Path(self.log_dir.clone()),
            OptionName::CountFile => OptionValue::Text(self.count_file.clone()),
            OptionName::IpFile => OptionValue::Text(self.ip_file.clone()),
            OptionName::ImageDir => OptionValue::Path(self.image_dir.clone()),
            OptionName::ImageExt => OptionValue::Text(self.image_ext.clone()),
            OptionName::UniqueOnly => OptionValue::Flag(self.unique_only),
            OptionName::AsImage => OptionValue::Flag(self.as_image),
            OptionName::HonorDnt => OptionValue::Flag(self.honor_dnt),
            OptionName::VisitorTextString => OptionValue::Text(self.visitor_text.clone()),
            OptionName::LockTimeoutMs => OptionValue::Millis(self.lock_policy.timeout_ms()),
        }
    }
}

fn invalid(option: OptionName, reason: impl Into<String>) -> DomainError {
    DomainError::InvalidOption { option: option.as_str().to_string(), reason: reason.into() }
}

fn ensure_directory(option: OptionName, path: &Path) -> DomainResult<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(invalid(option, format!("'{}' is not an existing directory", path.display())))
    }
}

fn ensure_record_name(option: OptionName, name: &str) -> DomainResult<()> {
    if name.len() > RECORD_EXTENSION.len() && name.ends_with(RECORD_EXTENSION) {
        Ok(())
    } else {
        Err(invalid(option, format!("'{name}' must be a file name ending in '{RECORD_EXTENSION}'")))
    }
}

fn normalize_extension(ext: &str) -> DomainResult<String> {
    let ext = ext.trim();
    if ext.is_empty() || ext == "." {
        return Err(invalid(OptionName::ImageExt, "must not be empty"));
    }
    if ext.starts_with('.') { Ok(ext.to_string()) } else { Ok(format!(".{ext}")) }
}

/// Drop trailing `/` and `\`; a path made only of separators keeps its first one.
fn strip_trailing_separators(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    let trimmed = raw.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() && !raw.is_empty() {
        PathBuf::from(&raw[..1])
    } else {
        PathBuf::from(trimmed)
    }
}
