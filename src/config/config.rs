//! Config file handling

use std::path::{Path, PathBuf};

use crate::context::Environment;
use crate::curl::{MissingUrl, ParseOptions};
use crate::errors::CurlImportError;

/// curlimport configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub config_dir: PathBuf,
    /// Flags prepended to every invocation
    pub default_options: Vec<String>,
    pub parse_options: ParseOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: Self::default_config_dir(),
            default_options: Vec::new(),
            parse_options: ParseOptions::default(),
        }
    }
}

impl Config {
    /// Load configuration from the config file (TOML format)
    pub fn load(env: &Environment) -> Result<Self, CurlImportError> {
        let config_dir = env.config_dir.clone().unwrap_or_else(Self::default_config_dir);
        Self::load_from(&config_dir)
    }

    /// Load `config.toml` from a specific directory
    pub fn load_from(config_dir: &Path) -> Result<Self, CurlImportError> {
        let config_file = config_dir.join("config.toml");

        if !config_file.exists() {
            return Ok(Self {
                config_dir: config_dir.to_path_buf(),
                ..Self::default()
            });
        }

        let content = std::fs::read_to_string(&config_file)
            .map_err(|e| CurlImportError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_toml(config_dir, &content)
    }

    fn from_toml(config_dir: &Path, content: &str) -> Result<Self, CurlImportError> {
        let toml_value: toml::Value = toml::from_str(content)
            .map_err(|e| CurlImportError::Config(format!("Invalid config TOML: {}", e)))?;

        let default_options = toml_value
            .get("defaults")
            .and_then(|d| d.get("options"))
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();

        let missing_url = match toml_value
            .get("parser")
            .and_then(|p| p.get("missing_url"))
            .and_then(|v| v.as_str())
        {
            Some(policy) => policy.parse::<MissingUrl>()?,
            None => MissingUrl::default(),
        };

        Ok(Self {
            config_dir: config_dir.to_path_buf(),
            default_options,
            parse_options: ParseOptions { missing_url },
        })
    }

    /// Get the default config directory
    fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("curlimport"))
            .unwrap_or_else(|| PathBuf::from(".curlimport"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path()).unwrap();
        assert_eq!(config.config_dir, dir.path());
        assert!(config.default_options.is_empty());
        assert_eq!(config.parse_options.missing_url, MissingUrl::Allow);
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml(
            Path::new("/tmp/cfg"),
            r#"
            [defaults]
            options = ["--format", "curl", 3]

            [parser]
            missing_url = "Reject"
            "#,
        )
        .unwrap();
        assert_eq!(config.default_options, vec!["--format", "curl"]);
        assert_eq!(config.parse_options.missing_url, MissingUrl::Reject);
    }

    #[test]
    fn test_invalid_policy() {
        let err = Config::from_toml(Path::new("."), "[parser]\nmissing_url = \"maybe\"").unwrap_err();
        assert!(matches!(err, CurlImportError::Config(_)));
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml(Path::new("."), "[defaults").unwrap_err();
        assert!(err.to_string().contains("Invalid config TOML"));
    }
}
