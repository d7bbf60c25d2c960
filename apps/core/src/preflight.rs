//! Preflight checks.
//!
//! Verifies the system's collaborators before the first message is served:
//! the durable store answers queries, the history cache round-trips, and the
//! generative backend is configured. Nothing is assumed.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqlitePool;
use tracing::{info, warn};
use url::Url;

use crate::config::AppConfig;
use crate::engine::traits::HistoryCache;
use crate::models::ChatMessage;

/// Result of a single check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub message: String,
}

impl CheckResult {
    fn pass(name: &str, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: message.into(),
        }
    }

    fn fail(name: &str, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: message.into(),
        }
    }
}

/// Complete preflight report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreflightReport {
    pub all_passed: bool,
    pub checks: Vec<CheckResult>,
    pub summary: String,
}

pub async fn run_preflight_checks(
    config: &AppConfig,
    pool: &SqlitePool,
    cache: &dyn HistoryCache,
) -> PreflightReport {
    info!("Running preflight checks");

    let checks = vec![
        check_database(pool).await,
        check_cache(cache).await,
        check_generator_config(config),
    ];

    let all_passed = checks.iter().all(|check| check.passed);
    let summary = if all_passed {
        "All checks passed. System ready.".to_string()
    } else {
        let failed: Vec<&str> = checks
            .iter()
            .filter(|check| !check.passed)
            .map(|check| check.name.as_str())
            .collect();
        format!("Failed checks: {}", failed.join(", "))
    };

    for check in checks.iter().filter(|check| !check.passed) {
        warn!(check = %check.name, "{}", check.message);
    }

    PreflightReport {
        all_passed,
        checks,
        summary,
    }
}

async fn check_database(pool: &SqlitePool) -> CheckResult {
    let counts: Result<(i64, i64, i64), sqlx::Error> = async {
        let sessions: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions")
            .fetch_one(pool)
            .await?;
        let articles: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM articles")
            .fetch_one(pool)
            .await?;
        let packages: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM packages")
            .fetch_one(pool)
            .await?;
        Ok((sessions.0, articles.0, packages.0))
    }
    .await;

    match counts {
        Ok((sessions, articles, packages)) => CheckResult::pass(
            "database",
            format!(
                "connected ({} sessions, {} articles, {} packages)",
                sessions, articles, packages
            ),
        ),
        Err(e) => CheckResult::fail("database", format!("query failed: {}", e)),
    }
}

async fn check_cache(cache: &dyn HistoryCache) -> CheckResult {
    let probe = vec![ChatMessage::user("preflight probe")];
    let outcome = async {
        cache
            .store("preflight:probe", &probe, Duration::from_secs(5))
            .await?;
        cache.fetch("preflight:probe").await
    }
    .await;

    match outcome {
        Ok(Some(fetched)) if fetched == probe => CheckResult::pass("cache", "round-trip ok"),
        Ok(_) => CheckResult::fail("cache", "round-trip returned unexpected value"),
        Err(e) => CheckResult::fail("cache", format!("round-trip failed: {}", e)),
    }
}

fn check_generator_config(config: &AppConfig) -> CheckResult {
    if Url::parse(&config.llm_api_base).is_err() {
        return CheckResult::fail("generator", "LLM API base URL does not parse");
    }
    if config.llm_api_key.is_empty() {
        return CheckResult::fail(
            "generator",
            "LLM_API_KEY is empty; the generative fallback will be unavailable",
        );
    }
    CheckResult::pass("generator", format!("configured for model {}", config.llm_model))
}
