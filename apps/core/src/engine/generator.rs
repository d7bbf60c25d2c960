//! Generative backend client and the AI-assisted helpers built on it.
//!
//! The production client speaks an OpenAI-style chat-completions API. Model
//! replies used for selection are untrusted free text: they are parsed and
//! bounds-checked, and anything unparseable means "no match", not an error.

use std::fmt::Write as _;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::engine::traits::TextGenerator;
use crate::error::{AppError, Result};
use crate::models::{ChatMessage, Package, Sender};

const COMPLETION_TIMEOUT: Duration = Duration::from_secs(60);

const DESCRIPTION_SYSTEM_PROMPT: &str = "You are a wildlife safari expert. Create compelling \
     descriptions that make people excited about the safari experience.";

const MATCHING_SYSTEM_PROMPT: &str = "You are a wildlife safari expert. Analyze user requests \
     and match them with the most relevant safari package. Be precise and only recommend strong \
     matches.";

/// Chat-completions client for the generative backend.
pub struct HttpTextGenerator {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl HttpTextGenerator {
    pub fn new(api_base: &str, api_key: &str, model: &str) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    async fn chat(&self, messages: Vec<serde_json::Value>) -> Result<String> {
        let payload = json!({
            "model": self.model,
            "messages": messages,
        });

        let request = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send();
        let response = timeout(COMPLETION_TIMEOUT, request).await??;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "completion request failed with status {}: {}",
                status, body
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;
        Ok(body["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string())
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
        user_message: &str,
    ) -> Result<String> {
        let mut messages = vec![json!({"role": "system", "content": system_prompt})];
        for turn in history {
            let role = match turn.sender {
                Sender::User => "user",
                Sender::Bot => "assistant",
            };
            messages.push(json!({"role": role, "content": turn.text}));
        }
        messages.push(json!({"role": "user", "content": user_message}));

        info!(turns = history.len(), "requesting completion");
        self.chat(messages).await
    }
}

/// Which kind of package description to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionKind {
    Short,
    Detailed,
}

/// Clips `text` to at most `max_chars` characters without splitting a
/// character. Returns the original slice when it already fits.
pub fn clip(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn package_summary(package: &Package) -> String {
    format!(
        "Title: {}\nDescription: {}\nLocation: {} - {}\nDuration: {}\nType: {}\nPrice: {} {}\nFeatures: {}",
        package.title,
        package.description,
        package.heading,
        package.region,
        package.duration,
        package.kind,
        package.price,
        package.currency,
        package.features,
    )
}

/// Generates a package description, falling back to the stored description
/// (clipped for the short kind) when the backend fails or returns nothing.
pub async fn package_description(
    generator: &dyn TextGenerator,
    package: &Package,
    kind: DescriptionKind,
    short_limit: usize,
) -> String {
    let summary = package_summary(package);
    let prompt = match kind {
        DescriptionKind::Short => format!(
            "Create a compelling 1-2 line description for this safari package:\n{}\n\n\
             Make it exciting and enticing. Keep it under 100 characters. Focus on the main \
             wildlife and experience.",
            summary
        ),
        DescriptionKind::Detailed => format!(
            "Create a detailed, engaging description for this safari package:\n{}\n\n\
             Cover the wildlife they will see, the experience highlights, location details, \
             what makes this package special, and what is included. Write 3-4 paragraphs.",
            summary
        ),
    };

    match generator
        .complete(DESCRIPTION_SYSTEM_PROMPT, &[], &prompt)
        .await
    {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => fallback_description(package, kind, short_limit),
        Err(e) => {
            warn!(error = %e, package_id = %package.id, "description generation failed");
            fallback_description(package, kind, short_limit)
        }
    }
}

fn fallback_description(package: &Package, kind: DescriptionKind, short_limit: usize) -> String {
    match kind {
        DescriptionKind::Short => {
            let clipped = clip(&package.description, short_limit);
            if clipped.len() < package.description.len() {
                format!("{}...", clipped)
            } else {
                clipped.to_string()
            }
        }
        DescriptionKind::Detailed => package.description.clone(),
    }
}

/// Asks the backend to pick the best package for the message from a numbered
/// candidate list. Returns a reference into `packages`, or `None` when the
/// backend answers `NONE`, errors, or replies with anything unusable.
pub async fn select_best_package<'a>(
    generator: &dyn TextGenerator,
    message: &str,
    packages: &'a [Package],
) -> Option<&'a Package> {
    if packages.is_empty() {
        return None;
    }

    let mut listing = String::new();
    for (i, package) in packages.iter().enumerate() {
        let _ = writeln!(
            listing,
            "{}. Package: {}\n   Description: {}\n   Location: {} - {}\n   Duration: {}\n   Type: {}",
            i + 1,
            package.title,
            package.description,
            package.heading,
            package.region,
            package.duration,
            package.kind,
        );
    }

    let prompt = format!(
        "A user has asked: \"{}\"\n\n\
         Based on their request, analyze these available safari packages and recommend the one \
         that best matches their specific requirements. Consider the wildlife they want to see, \
         locations mentioned, duration preferences, type of experience, budget, and any negative \
         preferences.\n\nAvailable packages:\n{}\n\
         Respond with ONLY the package number (1, 2, 3, etc.) that best matches their request. \
         If no package is suitable, respond with \"NONE\".",
        message, listing
    );

    let reply = match generator.complete(MATCHING_SYSTEM_PROMPT, &[], &prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(error = %e, "package matching failed");
            return None;
        }
    };

    parse_match_index(&reply, packages.len()).map(|idx| &packages[idx])
}

/// Parses a best-match reply into a zero-based index. `NONE` (any case) and
/// anything non-numeric or out of the 1..=`candidates` range mean no match.
pub fn parse_match_index(reply: &str, candidates: usize) -> Option<usize> {
    let reply = reply.trim();
    if reply.eq_ignore_ascii_case("none") {
        return None;
    }
    let index: usize = reply.parse().ok()?;
    if (1..=candidates).contains(&index) {
        Some(index - 1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_index() {
        assert_eq!(parse_match_index("3", 5), Some(2));
        assert_eq!(parse_match_index(" 1 \n", 5), Some(0));
    }

    #[test]
    fn test_parse_none_sentinel_is_no_match_not_index_zero() {
        assert_eq!(parse_match_index("NONE", 5), None);
        assert_eq!(parse_match_index("none", 5), None);
    }

    #[test]
    fn test_parse_out_of_bounds_is_no_match() {
        assert_eq!(parse_match_index("0", 5), None);
        assert_eq!(parse_match_index("6", 5), None);
    }

    #[test]
    fn test_parse_garbage_is_no_match() {
        assert_eq!(parse_match_index("the best is 2", 5), None);
        assert_eq!(parse_match_index("-1", 5), None);
        assert_eq!(parse_match_index("", 5), None);
    }

    #[test]
    fn test_clip_respects_char_boundaries() {
        assert_eq!(clip("tiger", 10), "tiger");
        assert_eq!(clip("tigers everywhere", 6), "tigers");
        assert_eq!(clip("çà été", 2), "çà");
    }
}
