pub mod dto;
pub mod loader;

pub use dto::{AppConfig, CivicConfig, EnrichmentConfig, HttpConfig, OpenAiConfig, VertexConfig};
pub use loader::load_config;
