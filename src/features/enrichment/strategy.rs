use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::config::AppConfig;
use crate::core::error::AppError;
use crate::features::civic::Official;
use crate::features::enrichment::dto::StrategyKind;
use crate::features::enrichment::mock::MockStrategy;
use crate::features::enrichment::openai::OpenAiChatStrategy;
use crate::features::enrichment::session::ModelSession;
use crate::features::enrichment::vertex::{
    AccessTokenSource, GcpTokenSource, StaticTokenSource, VertexStrategy,
};

/// A way of producing a descriptive paragraph for an official.
#[async_trait]
pub trait EnrichmentStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Returns the generated text, or the provider's raw response object.
    async fn describe_official(
        &self,
        session: &ModelSession,
        official: &Official,
    ) -> Result<Value, AppError>;
}

pub async fn build_strategy(
    config: &AppConfig,
    http_client: reqwest::Client,
) -> Result<Arc<dyn EnrichmentStrategy>, AppError> {
    let strategy: Arc<dyn EnrichmentStrategy> = match config.enrichment.strategy {
        StrategyKind::Vertex => {
            let tokens: Arc<dyn AccessTokenSource> = match &config.vertex.access_token {
                Some(token) => {
                    info!("using static vertex access token");
                    Arc::new(StaticTokenSource::new(token.clone()))
                }
                None => Arc::new(GcpTokenSource::discover().await?),
            };
            Arc::new(VertexStrategy::new(&config.vertex, tokens, http_client))
        }
        StrategyKind::OpenAi => Arc::new(OpenAiChatStrategy::new(&config.openai, http_client)?),
        StrategyKind::Mock => Arc::new(MockStrategy::new(config.enrichment.mock_delay_ms)),
    };

    Ok(strategy)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::config::loader::config_from_lookup;

    fn config_with(vars: &[(&str, &str)]) -> AppConfig {
        let mut env: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        env.entry("GOOGLE_API_KEY".to_string())
            .or_insert_with(|| "civic-key".to_string());

        config_from_lookup(|key| env.get(key).cloned()).expect("valid config")
    }

    #[tokio::test]
    async fn mock_strategy_is_selected() {
        let config = config_with(&[("ENRICHMENT_STRATEGY", "mock")]);
        let strategy = build_strategy(&config, reqwest::Client::new())
            .await
            .expect("mock builds");
        assert_eq!(strategy.kind(), StrategyKind::Mock);
    }

    #[tokio::test]
    async fn openai_strategy_is_selected_with_key() {
        let config = config_with(&[("ENRICHMENT_STRATEGY", "openai"), ("OPENAI_API_KEY", "sk-test")]);
        let strategy = build_strategy(&config, reqwest::Client::new())
            .await
            .expect("openai builds");
        assert_eq!(strategy.kind(), StrategyKind::OpenAi);
    }

    #[tokio::test]
    async fn openai_without_key_fails_configuration() {
        let config = config_with(&[("ENRICHMENT_STRATEGY", "openai")]);
        let result = build_strategy(&config, reqwest::Client::new()).await;
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[tokio::test]
    async fn vertex_with_static_token_skips_credential_discovery() {
        let config = config_with(&[("VERTEX_ACCESS_TOKEN", "ya29.fixed")]);
        assert_eq!(config.enrichment.strategy, StrategyKind::Vertex);

        let strategy = build_strategy(&config, reqwest::Client::new())
            .await
            .expect("vertex builds");
        assert_eq!(strategy.kind(), StrategyKind::Vertex);
    }
}
