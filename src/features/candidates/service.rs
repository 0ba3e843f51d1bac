use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::core::error::AppError;
use crate::features::candidates::dto::LookupRequest;
use crate::features::civic::CivicDataSource;
use crate::features::enrichment::EnrichmentService;

const DETAILS_FIELD: &str = "details";
const OFFICIALS_FIELD: &str = "officials";

pub struct CandidateService {
    civic: Arc<dyn CivicDataSource>,
    enrichment: Arc<EnrichmentService>,
}

impl CandidateService {
    pub fn new(civic: Arc<dyn CivicDataSource>, enrichment: Arc<EnrichmentService>) -> Self {
        Self { civic, enrichment }
    }

    /// Looks up the officials for a postal code and returns the provider payload
    /// with a `details` array holding one generated summary per enriched official.
    pub async fn get_candidate_data(&self, request: LookupRequest) -> Result<Value, AppError> {
        let postal_code = request
            .postal_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .ok_or_else(|| AppError::missing_parameter("zipCode"))?;

        let mut payload = self.civic.lookup_representatives(postal_code).await?;

        let officials = officials_of(&payload, postal_code)?;
        info!(
            postal_code,
            officials = officials.len(),
            quota = self.enrichment.max_enriched_officials(),
            "officials found"
        );

        let details = self
            .enrichment
            .enrich(officials, request.issue.as_deref())
            .await?;
        let details = serde_json::to_value(details)
            .map_err(|err| AppError::internal(format!("failed to serialise details: {err}")))?;

        payload
            .as_object_mut()
            .ok_or_else(|| AppError::upstream("civic payload was not a JSON object"))?
            .insert(DETAILS_FIELD.to_string(), details);

        Ok(payload)
    }
}

fn officials_of<'a>(payload: &'a Value, postal_code: &str) -> Result<&'a [Value], AppError> {
    match payload.get(OFFICIALS_FIELD) {
        None | Some(Value::Null) => Err(AppError::not_found(format!(
            "no officials returned for {postal_code}"
        ))),
        Some(Value::Array(officials)) if officials.is_empty() => Err(AppError::not_found(
            format!("empty officials list returned for {postal_code}"),
        )),
        Some(Value::Array(officials)) => Ok(officials.as_slice()),
        Some(_) => Err(AppError::upstream(
            "civic payload has a non-array officials field",
        )),
    }
}
