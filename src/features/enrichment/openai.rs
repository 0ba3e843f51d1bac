use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::config::OpenAiConfig;
use crate::core::error::AppError;
use crate::features::civic::Official;
use crate::features::enrichment::dto::StrategyKind;
use crate::features::enrichment::session::{ModelSession, official_prompt};
use crate::features::enrichment::strategy::EnrichmentStrategy;

const API_VERSION_PATH: &str = "/v1";

pub struct OpenAiChatStrategy {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiChatStrategy {
    pub fn new(config: &OpenAiConfig, http_client: reqwest::Client) -> Result<Self, AppError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            AppError::configuration("OPENAI_API_KEY is required for the openai strategy")
        })?;

        let cfg = OpenAIConfig::new().with_api_key(api_key).with_api_base(format!(
            "{}{API_VERSION_PATH}",
            config.api_base.trim_end_matches('/')
        ));

        Ok(Self {
            client: Client::with_config(cfg).with_http_client(http_client),
            model: config.model.clone(),
        })
    }

    #[allow(deprecated)]
    fn build_request(
        &self,
        session: &ModelSession,
        official: &Official,
    ) -> Result<CreateChatCompletionRequest, OpenAIError> {
        CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(session.system_instruction.as_str())
                    .build()?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(official_prompt(&official.name))
                    .build()?
                    .into(),
            ])
            .max_tokens(session.generation.max_output_tokens)
            .temperature(session.generation.temperature)
            .top_p(session.generation.top_p)
            .build()
    }
}

#[async_trait]
impl EnrichmentStrategy for OpenAiChatStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::OpenAi
    }

    async fn describe_official(
        &self,
        session: &ModelSession,
        official: &Official,
    ) -> Result<Value, AppError> {
        let request = self
            .build_request(session, official)
            .map_err(|err| AppError::internal(format!("invalid chat completion request: {err}")))?;
        debug!(official = %official.name, model = %self.model, "requesting chat completion");

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|err| AppError::upstream(format!("openai chat completion failed: {err}")))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(Value::String)
            .ok_or_else(|| AppError::upstream("openai response had no message content"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::enrichment::dto::{GenerationConfig, SafetyConfig};

    #[test]
    fn request_carries_persona_prompt_and_sampling() {
        let strategy = OpenAiChatStrategy::new(
            &OpenAiConfig {
                api_key: Some("sk-test".to_string()),
                api_base: "https://api.openai.com".to_string(),
                model: "gpt-3.5-turbo".to_string(),
            },
            reqwest::Client::new(),
        )
        .expect("key present");
        let session = ModelSession {
            system_instruction: "You are an informed citizen who cares about transit".to_string(),
            generation: GenerationConfig::default(),
            safety_settings: SafetyConfig::default().settings(),
        };

        let request = strategy
            .build_request(&session, &Official::named("John Smith"))
            .expect("valid request");
        let body = serde_json::to_value(&request).expect("serialise");

        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(
            body["messages"][0]["content"],
            "You are an informed citizen who cares about transit"
        );
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(
            body["messages"][1]["content"],
            "Tell me about what John Smith has done while in office"
        );
        assert_eq!(body["max_tokens"], 2000);
        assert!(body["temperature"].is_number());
        assert!(body["top_p"].is_number());
    }

    #[test]
    fn missing_key_is_a_configuration_error() {
        let result = OpenAiChatStrategy::new(
            &OpenAiConfig {
                api_key: None,
                api_base: "https://api.openai.com".to_string(),
                model: "gpt-3.5-turbo".to_string(),
            },
            reqwest::Client::new(),
        );

        assert!(matches!(result, Err(AppError::Configuration(_))));
    }
}
