//! Application state and service initialization
//!
//! This module centralizes service construction so `main` only wires the
//! resulting state into the HTTP server.

use std::sync::Arc;
use std::time::Duration;

use crate::model::{Config, UploadConfig};
use crate::service::{ContractAnalysisService, LlmClient, OpenAiOracle};

/// Application state containing all services and shared settings
pub struct AppState {
    /// Contract risk analysis service
    pub analysis_service: Arc<ContractAnalysisService>,
    /// Upload limits applied by the upload handler
    pub upload: UploadConfig,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// Requires `OPENAI_API_KEY` to be present in the environment.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(AppError::MissingConfig("OPENAI_API_KEY"))?;

        Self::with_api_key(config, &api_key)
    }

    fn with_api_key(config: Config, api_key: &str) -> Result<Self, AppError> {
        let llm_client = LlmClient::new(api_key)
            .map_err(|_| AppError::InvalidConfig("Invalid OPENAI_API_KEY"))?;

        if config.analysis.timeout_secs == 0 {
            return Err(AppError::InvalidConfig(
                "analysis timeout must be at least one second",
            ));
        }

        let oracle = OpenAiOracle::new(
            llm_client,
            config.analysis.model,
            Duration::from_secs(config.analysis.timeout_secs),
        );

        Ok(Self {
            analysis_service: Arc::new(ContractAnalysisService::new(Arc::new(oracle))),
            upload: config.upload,
        })
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Missing required configuration
    #[error("Missing required configuration: {0}")]
    MissingConfig(&'static str),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_service_with_configured_model() {
        let mut config = Config::default();
        config.analysis.model = "gpt-4o".to_string();

        let state = AppState::with_api_key(config, "sk-test").unwrap();

        assert_eq!(state.analysis_service.model(), "gpt-4o");
        assert_eq!(state.upload.max_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = Config::default();
        config.analysis.timeout_secs = 0;

        assert!(matches!(
            AppState::with_api_key(config, "sk-test"),
            Err(AppError::InvalidConfig(_))
        ));
    }
}
