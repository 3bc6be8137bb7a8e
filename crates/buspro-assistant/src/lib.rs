//! Driver assistant - answers questions about the current stop list
//!
//! Each question is answered from a fresh system instruction built from the
//! selected cell; earlier chat turns are never sent. Every failure becomes a
//! fixed, human-readable reply instead of an error.

pub mod ai;

pub use ai::gemini::{GeminiClient, GeminiConfig};
pub use ai::prompts::build_driver_context;

use std::sync::Arc;

use async_trait::async_trait;
use buspro_domain::model::Stop;
use thiserror::Error;

pub const NO_CREDENTIALS_MESSAGE: &str =
    "AI Error: API Key not found. Please check app configuration.";
pub const CONNECTION_FAILURE_MESSAGE: &str = "AI Error: Failed to connect. Check your internet.";
pub const EMPTY_RESPONSE_MESSAGE: &str = "I couldn't process that. Please try again.";

/// Errors from the text-generation backend
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP client unavailable: {0}")]
    ClientUnavailable(String),

    #[error("Service returned status {0}")]
    Status(u16),

    #[error("Service returned no text")]
    EmptyResponse,
}

/// What the driver is told went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NoCredentials,
    Connection,
    EmptyResponse,
}

impl FailureKind {
    pub fn fallback_message(&self) -> &'static str {
        match self {
            FailureKind::NoCredentials => NO_CREDENTIALS_MESSAGE,
            FailureKind::Connection => CONNECTION_FAILURE_MESSAGE,
            FailureKind::EmptyResponse => EMPTY_RESPONSE_MESSAGE,
        }
    }
}

impl AssistantError {
    /// Timeouts, refused connections and bad statuses all read as connection trouble
    pub fn failure(&self) -> FailureKind {
        match self {
            AssistantError::MissingApiKey => FailureKind::NoCredentials,
            AssistantError::Http(_)
            | AssistantError::ClientUnavailable(_)
            | AssistantError::Status(_) => FailureKind::Connection,
            AssistantError::EmptyResponse => FailureKind::EmptyResponse,
        }
    }
}

/// One question with its system instruction
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub query: String,
}

/// External text-generation service
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Whether a request could be sent at all; checked before any network call
    fn has_credentials(&self) -> bool;

    async fn generate(&self, request: &GenerationRequest) -> Result<String, AssistantError>;
}

/// Assistant gateway over a text generator
#[derive(Clone)]
pub struct DriverAssistant {
    generator: Arc<dyn TextGenerator>,
}

impl DriverAssistant {
    pub fn new(generator: impl TextGenerator + 'static) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }

    /// Answer `query` about `stops`; never fails
    #[tracing::instrument(skip(self, query, stops), fields(stop_count = stops.len()))]
    pub async fn ask(
        &self,
        query: &str,
        stops: &[Stop],
        route_label: &str,
        direction_label: &str,
    ) -> String {
        if !self.generator.has_credentials() {
            tracing::warn!("assistant has no API key configured");
            return FailureKind::NoCredentials.fallback_message().to_string();
        }

        let request = GenerationRequest {
            system_instruction: build_driver_context(stops, route_label, direction_label),
            query: query.to_string(),
        };

        match self.generator.generate(&request).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => EMPTY_RESPONSE_MESSAGE.to_string(),
            Err(err) => {
                tracing::warn!(error = %err, "assistant request failed");
                err.failure().fallback_message().to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Generator returning canned results and recording what it was sent
    struct ScriptedGenerator {
        credentials: bool,
        reply: fn() -> Result<String, AssistantError>,
        calls: Arc<AtomicUsize>,
        last: Arc<Mutex<Option<GenerationRequest>>>,
    }

    impl ScriptedGenerator {
        fn new(reply: fn() -> Result<String, AssistantError>) -> Self {
            Self {
                credentials: true,
                reply,
                calls: Arc::new(AtomicUsize::new(0)),
                last: Arc::new(Mutex::new(None)),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        fn has_credentials(&self) -> bool {
            self.credentials
        }

        async fn generate(&self, request: &GenerationRequest) -> Result<String, AssistantError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(request.clone());
            (self.reply)()
        }
    }

    fn stops() -> Vec<Stop> {
        vec![Stop {
            id: "1".to_string(),
            name: "Alex Johnson".to_string(),
            ..Default::default()
        }]
    }

    #[tokio::test]
    async fn test_no_credentials_skips_network() {
        let mut generator = ScriptedGenerator::new(|| Ok("unused".to_string()));
        generator.credentials = false;
        let calls = generator.calls.clone();

        let reply = DriverAssistant::new(generator)
            .ask("Who is first?", &stops(), "Morning Route", "Go to School")
            .await;
        assert_eq!(reply, NO_CREDENTIALS_MESSAGE);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_reply_passes_through_with_context() {
        let generator = ScriptedGenerator::new(|| Ok("Alex Johnson is first.".to_string()));
        let last = generator.last.clone();

        let reply = DriverAssistant::new(generator)
            .ask("Who is first?", &stops(), "Afternoon Route", "Back from School")
            .await;
        assert_eq!(reply, "Alex Johnson is first.");

        let sent = last.lock().unwrap().clone().unwrap();
        assert_eq!(sent.query, "Who is first?");
        assert!(sent.system_instruction.contains("Afternoon Route - Back from School"));
        assert!(sent.system_instruction.contains("Alex Johnson"));
    }

    #[tokio::test]
    async fn test_failures_map_to_fixed_messages() {
        let empty = DriverAssistant::new(ScriptedGenerator::new(|| Ok("   ".to_string())));
        assert_eq!(empty.ask("q", &[], "r", "d").await, EMPTY_RESPONSE_MESSAGE);

        let no_text = DriverAssistant::new(ScriptedGenerator::new(|| Err(AssistantError::EmptyResponse)));
        assert_eq!(no_text.ask("q", &[], "r", "d").await, EMPTY_RESPONSE_MESSAGE);

        let status = DriverAssistant::new(ScriptedGenerator::new(|| Err(AssistantError::Status(503))));
        assert_eq!(status.ask("q", &[], "r", "d").await, CONNECTION_FAILURE_MESSAGE);

        let no_client = DriverAssistant::new(ScriptedGenerator::new(|| {
            Err(AssistantError::ClientUnavailable("tls".to_string()))
        }));
        assert_eq!(no_client.ask("q", &[], "r", "d").await, CONNECTION_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_gemini_without_key_returns_no_credentials() {
        let client = GeminiClient::new(GeminiConfig::default().with_api_base("http://127.0.0.1:9"));
        let reply = DriverAssistant::new(client).ask("q", &stops(), "r", "d").await;
        assert_eq!(reply, NO_CREDENTIALS_MESSAGE);
    }
}
