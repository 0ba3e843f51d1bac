use crate::config::EnrichmentConfig;
use crate::features::enrichment::dto::{GenerationConfig, SafetySetting};

/// Per-request model configuration. The system instruction depends on the
/// requested issue, so a fresh session is built for every lookup and shared by
/// all enrichment calls of that lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSession {
    pub system_instruction: String,
    pub generation: GenerationConfig,
    pub safety_settings: Vec<SafetySetting>,
}

impl ModelSession {
    pub fn for_issue(issue: Option<&str>, config: &EnrichmentConfig) -> Self {
        Self {
            system_instruction: system_instruction(issue),
            generation: config.generation,
            safety_settings: config.safety.settings(),
        }
    }
}

fn system_instruction(issue: Option<&str>) -> String {
    match issue.map(str::trim).filter(|issue| !issue.is_empty()) {
        Some(issue) => format!("You are an informed citizen who cares about {issue}"),
        None => "You are an informed citizen".to_string(),
    }
}

pub fn official_prompt(name: &str) -> String {
    format!("Tell me about what {name} has done while in office")
}
