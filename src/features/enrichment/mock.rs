use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::time::sleep;

use crate::core::error::AppError;
use crate::features::civic::Official;
use crate::features::enrichment::dto::StrategyKind;
use crate::features::enrichment::session::ModelSession;
use crate::features::enrichment::strategy::EnrichmentStrategy;

/// Canned responder for local development; never calls out.
pub struct MockStrategy {
    delay: Duration,
}

impl MockStrategy {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
        }
    }
}

#[async_trait]
impl EnrichmentStrategy for MockStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Mock
    }

    async fn describe_official(
        &self,
        _session: &ModelSession,
        official: &Official,
    ) -> Result<Value, AppError> {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        Ok(Value::String(format!(
            "Mock response detailing the achievements and work of {} while in office. This is for testing purposes.",
            official.name
        )))
    }
}
