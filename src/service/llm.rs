//! Shared LLM client and the oracle interface used by contract analysis
//!
//! The analysis pipeline only needs text in and text out. [`AnalysisOracle`]
//! is that seam: production code talks to OpenAI through [`OpenAiOracle`],
//! tests substitute a stub.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::openai;

/// Shared LLM client wrapper
#[derive(Clone)]
pub struct LlmClient {
    client: openai::Client,
}

impl LlmClient {
    /// Create a new LLM client with the provided API key
    pub fn new(api_key: &str) -> Result<Self, String> {
        let client = openai::Client::new(api_key)
            .map_err(|e| format!("Failed to create OpenAI client: {}", e))?;

        Ok(Self { client })
    }

    /// Get a reference to the underlying OpenAI client
    pub fn openai_client(&self) -> &openai::Client {
        &self.client
    }
}

/// Error type for oracle calls
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum OracleError {
    #[error("LLM request failed: {0}")]
    Request(String),

    #[error("LLM request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

/// Text-in, text-out access to a generative model
#[async_trait]
pub trait AnalysisOracle: Send + Sync {
    /// Run one completion and return the model's raw text
    async fn complete(&self, system: &str, user: &str) -> Result<String, OracleError>;

    /// Model identifier, for logs and readiness reporting
    fn model(&self) -> &str;
}

/// Oracle backed by the OpenAI chat API
pub struct OpenAiOracle {
    llm_client: LlmClient,
    model: String,
    timeout: Duration,
}

impl OpenAiOracle {
    pub fn new(llm_client: LlmClient, model: impl Into<String>, timeout: Duration) -> Self {
        let model = model.into();

        tracing::info!(
            model = %model,
            timeout_secs = timeout.as_secs(),
            "Contract analysis oracle initialized"
        );

        Self {
            llm_client,
            model,
            timeout,
        }
    }
}

#[async_trait]
impl AnalysisOracle for OpenAiOracle {
    async fn complete(&self, system: &str, user: &str) -> Result<String, OracleError> {
        let start_time = Instant::now();
        let prompt_length = system.len() + user.len();

        tracing::debug!(
            model = %self.model,
            prompt_length = prompt_length,
            "Initiating OpenAI API call for contract analysis"
        );

        // temperature=0.0 keeps risk labels reproducible across calls
        let agent = self
            .llm_client
            .openai_client()
            .agent(&self.model)
            .preamble(system)
            .temperature(0.0)
            .build();

        match tokio::time::timeout(self.timeout, agent.prompt(user)).await {
            Ok(Ok(output)) => {
                tracing::info!(
                    model = %self.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    prompt_length = prompt_length,
                    output_length = output.len(),
                    "OpenAI API call for contract analysis completed successfully"
                );
                Ok(output)
            }
            Ok(Err(e)) => {
                tracing::error!(
                    model = %self.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    prompt_length = prompt_length,
                    error = %e,
                    "OpenAI API call for contract analysis failed"
                );
                Err(OracleError::Request(e.to_string()))
            }
            Err(_) => {
                tracing::error!(
                    model = %self.model,
                    timeout_secs = self.timeout.as_secs(),
                    prompt_length = prompt_length,
                    "OpenAI API call for contract analysis timed out"
                );
                Err(OracleError::Timeout(self.timeout))
            }
        }
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
pub mod testing {
    //! Deterministic oracle for tests

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Oracle that replays a canned response and records each call
    pub struct StubOracle {
        response: Result<String, String>,
        calls: AtomicUsize,
        last_prompt: Mutex<Option<(String, String)>>,
    }

    impl StubOracle {
        pub fn returning(output: impl Into<String>) -> Self {
            Self::with_response(Ok(output.into()))
        }

        pub fn failing(message: impl Into<String>) -> Self {
            Self::with_response(Err(message.into()))
        }

        fn with_response(response: Result<String, String>) -> Self {
            Self {
                response,
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// System and user prompt of the most recent call
        pub fn last_prompt(&self) -> Option<(String, String)> {
            self.last_prompt.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AnalysisOracle for StubOracle {
        async fn complete(&self, system: &str, user: &str) -> Result<String, OracleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some((system.to_string(), user.to_string()));
            self.response.clone().map_err(OracleError::Request)
        }

        fn model(&self) -> &str {
            "stub"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message() {
        let err = OracleError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "LLM request timed out after 30s");
    }

    #[tokio::test]
    async fn test_unanswered_call_times_out() {
        // accepts connections but never writes a response
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let client = openai::Client::builder()
            .api_key("sk-test")
            .base_url(format!("http://{addr}/v1"))
            .build()
            .unwrap();
        let oracle = OpenAiOracle::new(
            LlmClient { client },
            openai::GPT_4O_MINI,
            Duration::from_secs(1),
        );

        let start_time = Instant::now();
        let result = oracle.complete("Reply with JSON only.", "Return {}").await;

        match result {
            Err(OracleError::Timeout(t)) => assert_eq!(t, Duration::from_secs(1)),
            other => panic!("expected timeout, got {other:?}"),
        }
        assert!(start_time.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    #[ignore] // Requires OPENAI_API_KEY and network access
    async fn test_openai_round_trip() {
        let api_key = std::env::var("OPENAI_API_KEY").unwrap();
        let oracle = OpenAiOracle::new(
            LlmClient::new(&api_key).unwrap(),
            openai::GPT_4O_MINI,
            Duration::from_secs(60),
        );

        let output = oracle
            .complete("Reply with JSON only.", "Return {\"ok\": true}")
            .await
            .unwrap();
        assert!(output.contains("ok"));
    }
}
