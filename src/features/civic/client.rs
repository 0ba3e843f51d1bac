use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use crate::config::CivicConfig;
use crate::core::error::AppError;
use crate::core::http_client::ensure_success;

const REPRESENTATIVES_PATH: &str = "/civicinfo/v2/representatives";
const COUNTRY: &str = "US";

#[async_trait]
pub trait CivicDataSource: Send + Sync {
    /// Resolves a postal code to the provider's raw representatives payload.
    async fn lookup_representatives(&self, postal_code: &str) -> Result<Value, AppError>;
}

pub struct CivicClient {
    config: CivicConfig,
    http_client: reqwest::Client,
}

impl CivicClient {
    pub fn new(config: CivicConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    fn representatives_url(&self, postal_code: &str) -> Result<Url, AppError> {
        let base = self.config.api_base.trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}{REPRESENTATIVES_PATH}"))
            .map_err(|err| AppError::internal(format!("invalid civic api url: {err}")))?;

        url.query_pairs_mut()
            .append_pair(
                "address",
                &format!("postal_code:{postal_code}|country:{COUNTRY}"),
            )
            .append_pair("key", &self.config.api_key);

        Ok(url)
    }
}

#[async_trait]
impl CivicDataSource for CivicClient {
    async fn lookup_representatives(&self, postal_code: &str) -> Result<Value, AppError> {
        let url = self.representatives_url(postal_code)?;
        debug!(postal_code, "looking up representatives");

        let response = self.http_client.get(url).send().await.map_err(|err| {
            AppError::upstream(format!("network error contacting civic api: {err}"))
        })?;

        let response = ensure_success(response, "civic api").await?;

        let payload = response.json::<Value>().await.map_err(|err| {
            AppError::upstream(format!("failed to parse civic api response: {err}"))
        })?;

        if !payload.is_object() {
            return Err(AppError::upstream(
                "civic api response was not a JSON object",
            ));
        }

        Ok(payload)
    }
}
