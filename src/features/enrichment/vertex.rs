use std::sync::Arc;

use async_trait::async_trait;
use gcp_auth::TokenProvider;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::VertexConfig;
use crate::core::error::AppError;
use crate::core::http_client::ensure_success;
use crate::features::civic::Official;
use crate::features::enrichment::dto::{GenerationConfig, SafetySetting, StrategyKind};
use crate::features::enrichment::session::{ModelSession, official_prompt};
use crate::features::enrichment::strategy::EnrichmentStrategy;

const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Supplies the bearer token for each Vertex call. Tokens expire, so callers
/// must ask again per request instead of caching the string.
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    async fn access_token(&self) -> Result<String, AppError>;
}

/// Fixed token, used when `VERTEX_ACCESS_TOKEN` is set.
pub struct StaticTokenSource {
    token: String,
}

impl StaticTokenSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl AccessTokenSource for StaticTokenSource {
    async fn access_token(&self) -> Result<String, AppError> {
        Ok(self.token.clone())
    }
}

/// Application Default Credentials. `gcp_auth` caches and refreshes the token.
pub struct GcpTokenSource {
    provider: Arc<dyn TokenProvider>,
}

impl GcpTokenSource {
    pub async fn discover() -> Result<Self, AppError> {
        let provider = gcp_auth::provider().await.map_err(|err| {
            AppError::configuration(format!("no Google application default credentials: {err}"))
        })?;

        Ok(Self { provider })
    }
}

#[async_trait]
impl AccessTokenSource for GcpTokenSource {
    async fn access_token(&self) -> Result<String, AppError> {
        let token = self
            .provider
            .token(&[CLOUD_PLATFORM_SCOPE])
            .await
            .map_err(|err| AppError::upstream(format!("failed to obtain vertex token: {err}")))?;

        Ok(token.as_str().to_string())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    generation_config: &'a GenerationConfig,
    safety_settings: &'a [SafetySetting],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(session: &'a ModelSession, prompt: &'a str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &session.system_instruction,
                }],
            },
            generation_config: &session.generation,
            safety_settings: &session.safety_settings,
        }
    }
}

/// Gemini through the Vertex AI `generateContent` endpoint.
pub struct VertexStrategy {
    endpoint: String,
    tokens: Arc<dyn AccessTokenSource>,
    http_client: reqwest::Client,
}

impl VertexStrategy {
    pub fn new(
        config: &VertexConfig,
        tokens: Arc<dyn AccessTokenSource>,
        http_client: reqwest::Client,
    ) -> Self {
        let endpoint = format!(
            "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:generateContent",
            config.api_base.trim_end_matches('/'),
            config.project,
            config.location,
            config.model,
        );

        Self {
            endpoint,
            tokens,
            http_client,
        }
    }
}

#[async_trait]
impl EnrichmentStrategy for VertexStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Vertex
    }

    async fn describe_official(
        &self,
        session: &ModelSession,
        official: &Official,
    ) -> Result<Value, AppError> {
        let prompt = official_prompt(&official.name);
        let request = GenerateContentRequest::new(session, &prompt);
        let token = self.tokens.access_token().await?;
        debug!(official = %official.name, endpoint = %self.endpoint, "requesting generated content");

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .map_err(|err| AppError::upstream(format!("network error contacting vertex: {err}")))?;

        let response = ensure_success(response, "vertex generateContent").await?;

        response
            .json::<Value>()
            .await
            .map_err(|err| AppError::upstream(format!("failed to parse vertex response: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::enrichment::dto::SafetyConfig;

    #[test]
    fn request_carries_instruction_and_safety() {
        let session = ModelSession {
            system_instruction: "You are an informed citizen who cares about housing".to_string(),
            generation: GenerationConfig::default(),
            safety_settings: SafetyConfig::default().settings(),
        };
        let prompt = official_prompt("Ada Lee");

        let body = serde_json::to_value(GenerateContentRequest::new(&session, &prompt))
            .expect("serialise");

        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            "You are an informed citizen who cares about housing"
        );
        assert!(body["systemInstruction"].get("role").is_none());
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            "Tell me about what Ada Lee has done while in office"
        );
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 2000);
        assert_eq!(body["safetySettings"].as_array().map(Vec::len), Some(4));
        assert_eq!(
            body["safetySettings"][0]["category"],
            "HARM_CATEGORY_HATE_SPEECH"
        );
    }

    #[tokio::test]
    async fn static_source_returns_its_token() {
        let source = StaticTokenSource::new("ya29.fixed");
        assert_eq!(source.access_token().await.expect("token"), "ya29.fixed");
    }
}
