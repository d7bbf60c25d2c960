//! Shared fixtures for the test suite.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePool;
use sqlx::types::Json;
use tempfile::TempDir;
use uuid::Uuid;

use crate::database;
use crate::models::{Article, ChatMessage, Package};
use crate::resolvers::slugify;

/// Creates a file-backed test database with the full schema applied. The
/// returned guard keeps the backing directory alive for the test's duration.
pub async fn test_pool() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.sqlite");
    let db_url = format!("sqlite://{}", db_path.display());

    let pool = database::init_db(&db_url)
        .await
        .expect("Failed to init test database");
    (pool, dir)
}

pub async fn insert_article(
    pool: &SqlitePool,
    title: &str,
    excerpt: &str,
    image: &str,
    status: &str,
    published_at: Option<DateTime<Utc>>,
) -> String {
    let id = Uuid::new_v4().to_string();
    sqlx::query(
        r#"
        INSERT INTO articles
            (id, title, slug, excerpt, author, image, kind, view_count, body, status,
             published_at, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(title)
    .bind(slugify(title))
    .bind(excerpt)
    .bind("Field Desk")
    .bind(image)
    .bind("BLOG")
    .bind(0i64)
    .bind(format!("{} {}", title, excerpt))
    .bind(status)
    .bind(published_at)
    .bind(Utc::now())
    .execute(pool)
    .await
    .expect("Failed to insert article");
    id
}

/// Insertable package fixture; defaults to an active expedition.
#[derive(Clone)]
pub struct PackageSeed {
    pub title: String,
    pub heading: String,
    pub region: String,
    pub location: String,
    pub duration: String,
    pub kind: String,
    pub description: String,
    pub image: String,
    pub status: bool,
}

impl Default for PackageSeed {
    fn default() -> Self {
        Self {
            title: String::new(),
            heading: String::new(),
            region: String::new(),
            location: String::new(),
            duration: String::new(),
            kind: "Expedition".to_string(),
            description: String::new(),
            image: String::new(),
            status: true,
        }
    }
}

pub fn expedition_seed(title: &str) -> PackageSeed {
    PackageSeed {
        title: title.to_string(),
        ..Default::default()
    }
}

pub async fn insert_package(pool: &SqlitePool, seed: &PackageSeed) -> String {
    let id = Uuid::new_v4().to_string();
    sqlx::query(
        r#"
        INSERT INTO packages
            (id, title, description, heading, region, location, duration, kind, slug, price,
             currency, image, additional_images, features, status, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&seed.title)
    .bind(&seed.description)
    .bind(&seed.heading)
    .bind(&seed.region)
    .bind(&seed.location)
    .bind(&seed.duration)
    .bind(&seed.kind)
    .bind(slugify(&seed.title))
    .bind(0.0f64)
    .bind("INR")
    .bind(Json(Vec::<String>::new()))
    .bind(Json(serde_json::json!({})))
    .bind(seed.status)
    .bind(Utc::now())
    .bind(Utc::now())
    .execute(pool)
    .await
    .expect("Failed to insert package");
    id
}

/// In-memory package for stub-backed tests.
pub fn package(id: &str, title: &str) -> Package {
    Package {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        heading: String::new(),
        region: String::new(),
        location: String::new(),
        duration: String::new(),
        kind: "Expedition".to_string(),
        slug: slugify(title),
        price: 0.0,
        currency: "INR".to_string(),
        image: String::new(),
        additional_images: Vec::new(),
        features: serde_json::json!({}),
        status: true,
        created_at: None,
        updated_at: None,
    }
}

/// In-memory article for stub-backed tests.
pub fn article(title: &str, excerpt: &str, image: &str) -> Article {
    Article {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        slug: slugify(title),
        excerpt: excerpt.to_string(),
        author: "Field Desk".to_string(),
        image: image.to_string(),
        kind: "BLOG".to_string(),
        view_count: 0,
        published_at: Some(Utc::now()),
    }
}

/// Alternating user/bot turns, oldest first.
pub fn turns(count: usize) -> Vec<ChatMessage> {
    (0..count)
        .map(|i| {
            if i % 2 == 0 {
                ChatMessage::user(format!("user turn {}", i))
            } else {
                ChatMessage::bot(format!("bot turn {}", i))
            }
        })
        .collect()
}
