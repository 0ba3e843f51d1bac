use std::sync::Arc;

use futures::future::try_join_all;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::EnrichmentConfig;
use crate::core::error::AppError;
use crate::features::civic::Official;
use crate::features::enrichment::dto::EnrichmentResult;
use crate::features::enrichment::session::ModelSession;
use crate::features::enrichment::strategy::EnrichmentStrategy;

pub struct EnrichmentService {
    config: EnrichmentConfig,
    strategy: Arc<dyn EnrichmentStrategy>,
}

impl EnrichmentService {
    pub fn new(config: EnrichmentConfig, strategy: Arc<dyn EnrichmentStrategy>) -> Self {
        Self { config, strategy }
    }

    pub fn max_enriched_officials(&self) -> usize {
        self.config.max_enriched_officials
    }

    /// Enriches the leading officials, up to the configured quota, concurrently.
    /// Results keep the input order; any single failure fails the whole batch.
    pub async fn enrich(
        &self,
        officials: &[Value],
        issue: Option<&str>,
    ) -> Result<Vec<EnrichmentResult>, AppError> {
        let selected = select_officials(officials, self.config.max_enriched_officials)?;
        let session = ModelSession::for_issue(issue, &self.config);
        debug!(?session, strategy = %self.strategy.kind(), "model session ready");

        let results = try_join_all(
            selected
                .iter()
                .map(|official| enrich_one(self.strategy.as_ref(), &session, official)),
        )
        .await?;

        info!(
            enriched = results.len(),
            available = officials.len(),
            strategy = %self.strategy.kind(),
            "officials enriched"
        );

        Ok(results)
    }
}

pub async fn enrich_one(
    strategy: &dyn EnrichmentStrategy,
    session: &ModelSession,
    official: &Official,
) -> Result<EnrichmentResult, AppError> {
    let details = strategy.describe_official(session, official).await?;

    Ok(EnrichmentResult {
        name: official.name.clone(),
        details,
    })
}

fn select_officials(officials: &[Value], limit: usize) -> Result<Vec<Official>, AppError> {
    officials
        .iter()
        .take(limit)
        .enumerate()
        .map(|(index, raw)| {
            serde_json::from_value::<Official>(raw.clone()).map_err(|err| {
                AppError::upstream(format!("official at position {index} is malformed: {err}"))
            })
        })
        .collect()
}
