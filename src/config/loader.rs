use std::env;
use std::fmt::Display;
use std::str::FromStr;

use tracing::debug;

use crate::config::dto::{
    AppConfig, CivicConfig, EnrichmentConfig, HttpConfig, OpenAiConfig, VertexConfig,
};
use crate::core::error::AppError;
use crate::features::enrichment::{
    GenerationConfig, HarmBlockThreshold, SafetyConfig, StrategyKind,
};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CIVIC_API_BASE: &str = "https://civicinfo.googleapis.com";
const DEFAULT_VERTEX_PROJECT: &str = "vote-right-421402";
const DEFAULT_VERTEX_LOCATION: &str = "us-central1";
const DEFAULT_VERTEX_MODEL: &str = "gemini-1.5-pro-001";
const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com";
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_MAX_ENRICHED_OFFICIALS: usize = 2;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 120;

pub fn load_config() -> Result<AppConfig, AppError> {
    load_dotenv();
    config_from_lookup(|key| env::var(key).ok())
}

/// Builds the configuration from any variable source; `load_config` passes the
/// process environment.
pub fn config_from_lookup<F>(lookup: F) -> Result<AppConfig, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let vars = Vars { lookup };

    let port = vars.parse("PORT", DEFAULT_PORT)?;

    let civic = CivicConfig {
        api_key: vars.required("GOOGLE_API_KEY")?,
        api_base: vars.string("CIVIC_API_BASE", DEFAULT_CIVIC_API_BASE),
    };

    let strategy = vars.parse("ENRICHMENT_STRATEGY", StrategyKind::Vertex)?;
    let max_enriched_officials =
        vars.parse("MAX_ENRICHED_OFFICIALS", DEFAULT_MAX_ENRICHED_OFFICIALS)?;
    if max_enriched_officials == 0 {
        return Err(AppError::configuration(
            "MAX_ENRICHED_OFFICIALS must be at least 1",
        ));
    }

    let defaults = GenerationConfig::default();
    let generation = GenerationConfig {
        max_output_tokens: vars.parse("GENERATION_MAX_OUTPUT_TOKENS", defaults.max_output_tokens)?,
        temperature: vars.parse("GENERATION_TEMPERATURE", defaults.temperature)?,
        top_p: vars.parse("GENERATION_TOP_P", defaults.top_p)?,
    };

    let safety = SafetyConfig {
        hate_speech: vars.parse("SAFETY_HATE_SPEECH", HarmBlockThreshold::default())?,
        dangerous_content: vars.parse("SAFETY_DANGEROUS_CONTENT", HarmBlockThreshold::default())?,
        sexually_explicit: vars.parse("SAFETY_SEXUALLY_EXPLICIT", HarmBlockThreshold::default())?,
        harassment: vars.parse("SAFETY_HARASSMENT", HarmBlockThreshold::default())?,
    };

    let enrichment = EnrichmentConfig {
        strategy,
        max_enriched_officials,
        generation,
        safety,
        mock_delay_ms: vars.parse("MOCK_DELAY_MS", 2000)?,
    };

    let location = vars.string("VERTEX_LOCATION", DEFAULT_VERTEX_LOCATION);
    let vertex = VertexConfig {
        project: vars.string("VERTEX_PROJECT", DEFAULT_VERTEX_PROJECT),
        api_base: vars.string(
            "VERTEX_API_BASE",
            &format!("https://{location}-aiplatform.googleapis.com"),
        ),
        model: vars.string("VERTEX_MODEL", DEFAULT_VERTEX_MODEL),
        access_token: vars.optional("VERTEX_ACCESS_TOKEN"),
        location,
    };

    let openai = OpenAiConfig {
        api_key: vars.optional("OPENAI_API_KEY"),
        api_base: vars.string("OPENAI_API_BASE", DEFAULT_OPENAI_API_BASE),
        model: vars.string("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
    };

    // 0 switches the client-level timeout off.
    let timeout_secs = vars.parse("HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?;
    let http = HttpConfig {
        timeout_secs: (timeout_secs > 0).then_some(timeout_secs),
        disable_proxy: vars.flag("DISABLE_PROXY", false),
    };

    Ok(AppConfig {
        port,
        civic,
        enrichment,
        vertex,
        openai,
        http,
    })
}

/// Loads `.env.<APP_ENV>` (when `APP_ENV` is set) and then `.env`. Variables already
/// present in the process environment are never overwritten.
fn load_dotenv() {
    if let Ok(app_env) = env::var("APP_ENV") {
        let filename = format!(".env.{app_env}");
        if dotenvy::from_filename(&filename).is_ok() {
            debug!(%filename, "loaded environment file");
        }
    }
    dotenvy::dotenv().ok();
}

struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, key: &str) -> Result<String, AppError> {
        self.optional(key)
            .ok_or_else(|| AppError::configuration(format!("{key} is required")))
    }

    fn string(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    fn parse<T>(&self, key: &str, default: T) -> Result<T, AppError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.optional(key) {
            Some(value) => value
                .parse::<T>()
                .map_err(|err| AppError::configuration(format!("invalid {key}: {err}"))),
            None => Ok(default),
        }
    }

    fn flag(&self, key: &str, default: bool) -> bool {
        self.optional(key)
            .map(|value| matches!(value.as_str(), "true" | "1" | "TRUE" | "True"))
            .unwrap_or(default)
    }
}
