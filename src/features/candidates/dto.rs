use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupRequest {
    #[serde(rename = "zipCode")]
    pub postal_code: Option<String>,
    pub issue: Option<String>,
}
