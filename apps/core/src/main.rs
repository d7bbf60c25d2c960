// JungleChat Backend Entry Point
// Composition root: config -> telemetry -> stores -> engine.

mod brain;
mod cache;
mod config;
mod database;
mod engine;
mod error;
mod models;
mod preflight;
mod resolvers;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::cache::MemoryTtlCache;
use crate::config::AppConfig;
use crate::database::{SqliteArticleStore, SqlitePackageStore, SqliteSessionStore};
use crate::engine::traits::SessionStore;
use crate::engine::{ChatEngine, HttpTextGenerator};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = AppConfig::load()?;
    let pool = database::init_db(&config.database_url).await?;

    let sessions = Arc::new(SqliteSessionStore::new(pool.clone()));
    let articles = Arc::new(SqliteArticleStore::new(pool.clone()));
    let packages = Arc::new(SqlitePackageStore::new(pool.clone()));
    let history_cache = Arc::new(MemoryTtlCache::new());
    let generator = Arc::new(HttpTextGenerator::new(
        &config.llm_api_base,
        &config.llm_api_key,
        &config.llm_model,
    ));

    let report =
        preflight::run_preflight_checks(&config, &pool, history_cache.as_ref()).await;
    info!("{}", report.summary);

    let engine = ChatEngine::new(
        config,
        sessions.clone(),
        articles,
        packages,
        history_cache,
        generator,
    );

    // Console chat loop. The HTTP surface lives in the host API layer; this
    // gives the same pipeline a local debug entry point.
    let user = sessions.create_user(None, None).await?;
    let session = sessions.create_session(&user.id, None).await?;
    println!(
        "Session {} ready. Type a message, or 'quit' to exit.",
        session.session_id
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message.eq_ignore_ascii_case("quit") {
            break;
        }

        match engine.respond(&session.session_id, message).await {
            Ok(reply) => println!("{}\n", reply.reply),
            Err(e) => error!("Failed to answer: {}", e),
        }
    }

    Ok(())
}
