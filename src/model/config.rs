use serde::Deserialize;
use std::fs;
use std::path::Path;

const ENV_CONFIG_PATH: &str = "CONTRACT_CHECKER_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_PORT: &str = "PORT";
const ENV_HOST: &str = "HOST";
const ENV_ANALYSIS_MODEL: &str = "ANALYSIS_MODEL";
const ENV_ORACLE_TIMEOUT_SECS: &str = "ORACLE_TIMEOUT_SECS";
const ENV_MAX_UPLOAD_BYTES: &str = "MAX_UPLOAD_BYTES";

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_MODEL: &str = rig::providers::openai::GPT_4O_MINI;
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Settings for the contract analysis call
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Model name passed to the LLM provider
    pub model: String,
    /// Upper bound on a single LLM call, in seconds
    pub timeout_secs: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Settings for document uploads
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Largest accepted upload; larger files are rejected while streaming
    pub max_bytes: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub upload: UploadConfig,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_sources(ConfigFile::default(), |_| None)
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let file = Self::load_config_file(&config_path).unwrap_or_default();

        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Merge file settings with variables from `lookup`; variables win
    fn from_sources(file: ConfigFile, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let ConfigFile {
            mut analysis,
            mut upload,
        } = file;

        let port = lookup(ENV_PORT)
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let host = lookup(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string());

        if let Some(model) = lookup(ENV_ANALYSIS_MODEL).filter(|m| !m.trim().is_empty()) {
            analysis.model = model;
        }

        if let Some(timeout) = lookup(ENV_ORACLE_TIMEOUT_SECS).and_then(|t| t.parse().ok()) {
            analysis.timeout_secs = timeout;
        }

        if let Some(max_bytes) = lookup(ENV_MAX_UPLOAD_BYTES).and_then(|b| b.parse().ok()) {
            upload.max_bytes = max_bytes;
        }

        Self {
            analysis,
            upload,
            port,
            host,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(ConfigFile::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.analysis.model, DEFAULT_MODEL);
        assert_eq!(config.analysis.timeout_secs, 60);
        assert_eq!(config.upload.max_bytes, 10 * 1024 * 1024);
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let file: ConfigFile = serde_yaml::from_str("analysis:\n  timeout_secs: 15\n").unwrap();
        assert_eq!(file.analysis.timeout_secs, 15);
        assert_eq!(file.analysis.model, DEFAULT_MODEL);
        assert_eq!(file.upload.max_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    fn test_env_overrides_file() {
        let file: ConfigFile =
            serde_yaml::from_str("analysis:\n  model: gpt-4o\nupload:\n  max_bytes: 1024\n")
                .unwrap();
        let env: HashMap<&str, &str> = HashMap::from([
            ("PORT", "9090"),
            ("ANALYSIS_MODEL", "gpt-4.1-mini"),
            ("MAX_UPLOAD_BYTES", "not-a-number"),
        ]);

        let config = Config::from_sources(file, |key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.port, 9090);
        assert_eq!(config.analysis.model, "gpt-4.1-mini");
        // Unparseable values fall back to the file setting
        assert_eq!(config.upload.max_bytes, 1024);
    }

    #[test]
    fn test_missing_config_file() {
        assert!(Config::load_config_file("/nonexistent/contract-checker.yaml").is_none());
    }
}
