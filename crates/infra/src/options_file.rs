// crates/infra/src/options_file.rs
use std::{fs, path::Path};

use tracing::debug;
use visit_counter_domain::CounterOptions;
use visit_counter_shared_kernel::{DomainError, InfrastructureError, Result};

/// Load option overrides from a JSON file, or YAML (`.yaml`/`.yml`) when the
/// `yaml` feature is enabled.
pub fn load_options(path: &Path) -> Result<CounterOptions> {
    let raw = fs::read_to_string(path)
        .map_err(|source| InfrastructureError::FileRead { path: path.to_path_buf(), source })?;
    let options = parse_options(path, &raw)?;
    debug!(path = %path.display(), "loaded options file");
    Ok(options)
}

fn parse_options(path: &Path, raw: &str) -> std::result::Result<CounterOptions, DomainError> {
    let invalid = |details: String| DomainError::OptionsFile { path: path.to_path_buf(), details };
    match path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase).as_deref() {
        Some("yaml" | "yml") => parse_yaml(raw).map_err(invalid),
        _ => serde_json::from_str(raw).map_err(|e| invalid(e.to_string())),
    }
}

#[cfg(feature = "yaml")]
fn parse_yaml(raw: &str) -> std::result::Result<CounterOptions, String> {
    serde_yaml::from_str(raw).map_err(|e| e.to_string())
}

#[cfg(not(feature = "yaml"))]
fn parse_yaml(_raw: &str) -> std::result::Result<CounterOptions, String> {
    Err("YAML options files need the `yaml` feature".to_string())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn json_file_is_loaded() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("counter.options.json");
        fs::write(&path, r#"{"logDir":"/srv/logs","asImage":true,"lockTimeoutMs":100}"#).unwrap();

        let options = load_options(&path).unwrap();
        assert_eq!(options.log_dir, Some(PathBuf::from("/srv/logs")));
        assert_eq!(options.as_image, Some(true));
        assert_eq!(options.lock_timeout_ms, Some(100));
    }

    #[test]
    fn unknown_keys_are_a_configuration_error() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("options.json");
        fs::write(&path, r#"{"logdir":"/srv/logs"}"#).unwrap();

        let err = load_options(&path).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("logdir"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let tmp = tempdir().unwrap();
        let err = load_options(&tmp.path().join("absent.json")).unwrap_err();
        assert!(!err.is_configuration());
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn yaml_file_is_loaded() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("options.yml");
        fs::write(&path, "uniqueOnly: false\nimageExt: gif\n").unwrap();

        let options = load_options(&path).unwrap();
        assert_eq!(options.unique_only, Some(false));
        assert_eq!(options.image_ext.as_deref(), Some("gif"));
    }
}
