//! Configuration loading for the CLI.

use crate::error::{CliError, Result};
use pagewise_capability::ProviderConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

/// Get the default configuration file path.
pub fn default_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    Ok(home.join(".pagewise").join("config.toml"))
}

/// Load the provider configuration.
///
/// An explicit path must exist. Without one, the default path is used when
/// present and built-in defaults otherwise. `PAGEWISE_MISTRAL_*` variables
/// override the file.
pub fn load(explicit: Option<&Path>) -> Result<ProviderConfig> {
    let config = match explicit {
        Some(path) => ProviderConfig::from_file(path)?,
        None => {
            let path = default_path()?;
            if path.exists() {
                ProviderConfig::from_file(&path)?
            } else {
                ProviderConfig::default()
            }
        }
    };

    let config = config.with_env_overrides();
    config.validate().map_err(CliError::Config)?;
    Ok(config)
}

/// Write a default configuration file, refusing to clobber unless `force`.
pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = ProviderConfig::default()
        .to_toml()
        .map_err(CliError::Config)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Effective configuration as TOML, with the API key masked
pub fn redacted_toml(config: &ProviderConfig) -> Result<String> {
    let mut shown = config.clone();
    if shown.api_key.is_some() {
        shown.api_key = Some("********".to_string());
    }
    shown.to_toml().map_err(CliError::Config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        init(&path, false).unwrap();
        let loaded = ProviderConfig::from_file(&path).unwrap();
        assert_eq!(loaded, ProviderConfig::default());

        assert!(matches!(init(&path, false), Err(CliError::Config(_))));
        init(&path, true).unwrap();
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_redaction() {
        let config = ProviderConfig::enabled_with_key("super-secret");
        let shown = redacted_toml(&config).unwrap();
        assert!(!shown.contains("super-secret"));
        assert!(shown.contains("********"));
    }
}
