pub mod dto;
pub mod mock;
pub mod openai;
pub mod service;
pub mod session;
pub mod strategy;
pub mod vertex;

pub use dto::{
    EnrichmentResult, GenerationConfig, HarmBlockThreshold, HarmCategory, SafetyConfig,
    SafetySetting, StrategyKind,
};
pub use mock::MockStrategy;
pub use openai::OpenAiChatStrategy;
pub use service::EnrichmentService;
pub use session::{ModelSession, official_prompt};
pub use strategy::{EnrichmentStrategy, build_strategy};
pub use vertex::{AccessTokenSource, GcpTokenSource, StaticTokenSource, VertexStrategy};
