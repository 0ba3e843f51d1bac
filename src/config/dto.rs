use crate::features::enrichment::{GenerationConfig, SafetyConfig, StrategyKind};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub civic: CivicConfig,
    pub enrichment: EnrichmentConfig,
    pub vertex: VertexConfig,
    pub openai: OpenAiConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone)]
pub struct CivicConfig {
    pub api_key: String,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    pub strategy: StrategyKind,
    /// Only this many officials, taken from the front of the list, are enriched.
    pub max_enriched_officials: usize,
    pub generation: GenerationConfig,
    pub safety: SafetyConfig,
    pub mock_delay_ms: u64,
}

#[derive(Debug, Clone)]
pub struct VertexConfig {
    pub project: String,
    pub location: String,
    pub model: String,
    pub api_base: String,
    pub access_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// `None` means outbound calls are never cut off.
    pub timeout_secs: Option<u64>,
    pub disable_proxy: bool,
}
