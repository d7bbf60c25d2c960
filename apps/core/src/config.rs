//! Application configuration.
//!
//! One validated configuration object, loaded from the environment exactly once
//! at startup and injected into components. Nothing in the crate reads
//! environment variables after this module has produced an `AppConfig`.

use std::env;

use serde::{Deserialize, Serialize};
use url::Url;
use validator::Validate;

use crate::error::Result;

/// Default system instruction for the generative fallback.
///
/// The sighting-probability link is always served from configuration by the
/// orchestrator; this text only teaches the model the tone and the redirect.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are an AI assistant for a wildlife travel and safari experience platform.

When a user asks how AI is used in safaris, about the chances or probability of \
wildlife sightings, or how likely they are to see animals on a safari:
- Acknowledge the question clearly.
- Explain briefly (1-2 sentences) that we use AI-driven predictive models built \
on historical sighting data, seasonal patterns, and park-specific movement trends.
- Recommend our AI-powered sighting prediction models and point the user to \
https://www.wildquest.com/trips-safaris/predictive-models

Rules:
- NEVER claim guaranteed sightings.
- NEVER invent probabilities.
- Keep responses concise (one to three short paragraphs), informative, and friendly.";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// Connection string for the durable store.
    #[validate(length(min = 1))]
    pub database_url: String,
    /// Base URL of the generative backend (OpenAI-style chat completions).
    #[validate(length(min = 1))]
    pub llm_api_base: String,
    /// API key for the generative backend. May be empty for local backends.
    pub llm_api_key: String,
    /// Model identifier sent with every completion request.
    #[validate(length(min = 1))]
    pub llm_model: String,
    /// System instruction for the generative fallback.
    #[validate(length(min = 1))]
    pub system_prompt: String,
    /// Base URL of the expedition site, used to build package landing-page links.
    #[validate(length(min = 1))]
    pub expedition_site_base_url: String,
    /// Base URL of the educational-content site, used to build article links.
    #[validate(length(min = 1))]
    pub content_site_base_url: String,
    /// Informational page on sighting probabilities. Never produced by the model.
    #[validate(length(min = 1))]
    pub sighting_info_url: String,
    /// Informational page for gate recommendations. Never produced by the model.
    #[validate(length(min = 1))]
    pub gate_prediction_url: String,
    /// Number of conversation turns kept per session.
    #[validate(range(min = 2, max = 50))]
    pub history_limit: usize,
    /// Expiry applied to cached session history, in seconds.
    #[validate(range(min = 1))]
    pub history_cache_ttl_secs: u64,
    /// Key prefix for cached session history.
    #[validate(length(min = 1))]
    pub history_cache_key_prefix: String,
    /// Maximum number of articles returned by the content resolver.
    #[validate(range(min = 1, max = 20))]
    pub max_content_results: usize,
    /// Maximum number of active packages considered for an AI-assisted suggestion.
    #[validate(range(min = 1, max = 500))]
    pub max_packages_to_search: u32,
    /// Character cap for short package descriptions.
    #[validate(range(min = 20, max = 500))]
    pub short_description_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://junglechat.sqlite".to_string(),
            llm_api_base: "https://api.openai.com/v1".to_string(),
            llm_api_key: String::new(),
            llm_model: "gpt-4o-mini".to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            expedition_site_base_url: "https://www.wildquest.com".to_string(),
            content_site_base_url: "https://www.explorewilds.com".to_string(),
            sighting_info_url: "https://www.wildquest.com/trips-safaris/predictive-models"
                .to_string(),
            gate_prediction_url: "https://www.wildquest.com/gate-predictor".to_string(),
            history_limit: 10,
            history_cache_ttl_secs: 3600,
            history_cache_key_prefix: "session_history:".to_string(),
            max_content_results: 5,
            max_packages_to_search: 100,
            short_description_limit: 150,
        }
    }
}

impl AppConfig {
    /// Loads the configuration from the environment, falling back to defaults
    /// for anything unset, and validates the result.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            database_url: env_or("DATABASE_URL", defaults.database_url),
            llm_api_base: env_or("LLM_API_BASE", defaults.llm_api_base),
            llm_api_key: env_or("LLM_API_KEY", defaults.llm_api_key),
            llm_model: env_or("LLM_MODEL", defaults.llm_model),
            system_prompt: env_or("SYSTEM_PROMPT", defaults.system_prompt),
            expedition_site_base_url: env_or(
                "EXPEDITION_SITE_URL",
                defaults.expedition_site_base_url,
            ),
            content_site_base_url: env_or("CONTENT_SITE_URL", defaults.content_site_base_url),
            sighting_info_url: env_or("SIGHTING_INFO_URL", defaults.sighting_info_url),
            gate_prediction_url: env_or("GATE_PREDICTION_URL", defaults.gate_prediction_url),
            history_limit: env_parse("HISTORY_LIMIT", defaults.history_limit),
            history_cache_ttl_secs: env_parse(
                "HISTORY_CACHE_TTL_SECS",
                defaults.history_cache_ttl_secs,
            ),
            history_cache_key_prefix: env_or(
                "HISTORY_CACHE_KEY_PREFIX",
                defaults.history_cache_key_prefix,
            ),
            max_content_results: env_parse("MAX_CONTENT_RESULTS", defaults.max_content_results),
            max_packages_to_search: env_parse(
                "MAX_PACKAGES_TO_SEARCH",
                defaults.max_packages_to_search,
            ),
            short_description_limit: env_parse(
                "SHORT_DESCRIPTION_LIMIT",
                defaults.short_description_limit,
            ),
        };

        config.validate()?;
        for raw in [
            &config.llm_api_base,
            &config.expedition_site_base_url,
            &config.content_site_base_url,
            &config.sighting_info_url,
            &config.gate_prediction_url,
        ] {
            Url::parse(raw)?;
        }
        Ok(config)
    }
}

fn env_or(key: &str, default: String) -> String {
    env::var(key).unwrap_or(default)
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
