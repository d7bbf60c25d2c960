//! SQLite-backed store implementations.
//!
//! Schema initialization plus the production implementations of the store
//! contracts in [`crate::engine::traits`]. All rows are read into permissive
//! `*Record` types and normalized into entities at this boundary.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::types::Json;
use tracing::info;
use uuid::Uuid;

use crate::engine::traits::{ArticleStore, PackageStore, SessionStore};
use crate::error::{AppError, Result};
use crate::models::{Article, ArticleRecord, ChatMessage, Package, PackageRecord, Session, User};

pub async fn init_db(database_url: &str) -> std::result::Result<SqlitePool, sqlx::Error> {
    info!("Initializing database at: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT UNIQUE,
            name TEXT,
            created_at DATETIME NOT NULL
        );
        CREATE TABLE IF NOT EXISTS sessions (
            session_id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            title TEXT NOT NULL,
            history JSON NOT NULL,
            created_at DATETIME NOT NULL,
            FOREIGN KEY(user_id) REFERENCES users(id)
        );
        CREATE TABLE IF NOT EXISTS articles (
            id TEXT PRIMARY KEY,
            title TEXT,
            slug TEXT,
            excerpt TEXT,
            author TEXT,
            image TEXT,
            kind TEXT,
            view_count INTEGER,
            body TEXT,
            status TEXT NOT NULL DEFAULT 'DRAFT',
            published_at DATETIME,
            created_at DATETIME
        );
        CREATE TABLE IF NOT EXISTS packages (
            id TEXT PRIMARY KEY,
            title TEXT,
            description TEXT,
            heading TEXT,
            region TEXT,
            location TEXT,
            duration TEXT,
            kind TEXT,
            slug TEXT,
            price REAL,
            currency TEXT,
            image TEXT,
            additional_images JSON,
            features JSON,
            status INTEGER NOT NULL DEFAULT 1,
            created_at DATETIME,
            updated_at DATETIME
        );
        CREATE INDEX IF NOT EXISTS idx_sessions_user_id ON sessions(user_id);
        CREATE INDEX IF NOT EXISTS idx_articles_status ON articles(status);
        CREATE INDEX IF NOT EXISTS idx_packages_status ON packages(status);
        "#,
    )
    .execute(&pool)
    .await?;

    info!("Database initialized and schema applied.");
    Ok(pool)
}

// --- Sessions and users ---

#[derive(Clone)]
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_user(&self, email: Option<&str>, name: Option<&str>) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, name, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, email, name, created_at
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(email)
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn create_session(&self, user_id: &str, title: Option<String>) -> Result<Session> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (session_id, user_id, title, history, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING session_id, user_id, title, history, created_at
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(title.unwrap_or_else(|| "New Chat".to_string()))
        .bind(Json(Vec::<ChatMessage>::new()))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(session)
    }

    async fn fetch_session(&self, session_id: &str) -> Result<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT session_id, user_id, title, history, created_at
            FROM sessions
            WHERE session_id = ?
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(session)
    }

    async fn sessions_for_user(&self, user_id: &str) -> Result<Vec<Session>> {
        let sessions = sqlx::query_as::<_, Session>(
            r#"
            SELECT session_id, user_id, title, history, created_at
            FROM sessions
            WHERE user_id = ?
            ORDER BY created_at DESC
            LIMIT 100
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(sessions)
    }

    async fn update_history(&self, session_id: &str, history: &[ChatMessage]) -> Result<()> {
        let result = sqlx::query("UPDATE sessions SET history = ? WHERE session_id = ?")
            .bind(Json(history.to_vec()))
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "session {} not found",
                session_id
            )));
        }
        Ok(())
    }
}

// --- Articles ---

#[derive(Clone)]
pub struct SqliteArticleStore {
    pool: SqlitePool,
}

impl SqliteArticleStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleStore for SqliteArticleStore {
    async fn search_published(&self, term: &str, limit: u32) -> Result<Vec<Article>> {
        let pattern = format!("%{}%", term.to_lowercase());

        let records = sqlx::query_as::<_, ArticleRecord>(
            r#"
            SELECT id, title, slug, excerpt, author, image, kind, view_count, published_at
            FROM articles
            WHERE status = 'PUBLISHED'
              AND (LOWER(title) LIKE ? OR LOWER(excerpt) LIKE ? OR LOWER(body) LIKE ?)
            ORDER BY published_at IS NULL, published_at DESC
            LIMIT ?
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Article::from).collect())
    }
}

// --- Packages ---

#[derive(Clone)]
pub struct SqlitePackageStore {
    pool: SqlitePool,
}

impl SqlitePackageStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const PACKAGE_COLUMNS: &str = "id, title, description, heading, region, location, duration, \
     kind, slug, price, currency, image, additional_images, features, status, created_at, \
     updated_at";

#[async_trait]
impl PackageStore for SqlitePackageStore {
    async fn expedition_packages(&self, location: Option<&str>) -> Result<Vec<Package>> {
        let mut sql = format!(
            "SELECT {} FROM packages WHERE status = 1 AND LOWER(kind) LIKE ?",
            PACKAGE_COLUMNS
        );
        if location.is_some() {
            sql.push_str(
                " AND (LOWER(region) LIKE ? OR LOWER(heading) LIKE ? \
                 OR LOWER(title) LIKE ? OR LOWER(slug) LIKE ?)",
            );
        }

        let mut query = sqlx::query_as::<_, PackageRecord>(&sql).bind("%expedition%");
        if let Some(location) = location {
            let pattern = format!("%{}%", location.to_lowercase());
            query = query
                .bind(pattern.clone())
                .bind(pattern.clone())
                .bind(pattern.clone())
                .bind(pattern);
        }

        let records = query.fetch_all(&self.pool).await?;
        Ok(records.into_iter().map(Package::from).collect())
    }

    async fn active_packages(&self, limit: u32) -> Result<Vec<Package>> {
        let records = sqlx::query_as::<_, PackageRecord>(&format!(
            "SELECT {} FROM packages WHERE status = 1 LIMIT ?",
            PACKAGE_COLUMNS
        ))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Package::from).collect())
    }

    async fn package_by_id(&self, id: &str) -> Result<Option<Package>> {
        let record = sqlx::query_as::<_, PackageRecord>(&format!(
            "SELECT {} FROM packages WHERE id = ? AND status = 1",
            PACKAGE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Package::from))
    }
}
