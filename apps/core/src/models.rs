//! Domain entities and reply payloads.
//!
//! The `*Record` types mirror the permissive shape of the external stores
//! (every field may be absent); they are normalized into the strongly-typed
//! entities in one place, at the store boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Who produced a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// A single conversation turn. Immutable once appended to a session's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            timestamp: None,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            timestamp: None,
        }
    }
}

/// A chat session. The history column holds the most recent turns as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub session_id: String,
    pub user_id: String,
    pub title: String,
    pub history: Json<Vec<ChatMessage>>,
    pub created_at: DateTime<Utc>,
}

/// A registered user. Sessions reference users by id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An expedition or resort offering, sourced from the package store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: String,
    pub title: String,
    pub description: String,
    pub heading: String,
    pub region: String,
    pub location: String,
    pub duration: String,
    /// Offering type, e.g. "expedition" or "resort".
    pub kind: String,
    pub slug: String,
    pub price: f64,
    pub currency: String,
    pub image: String,
    pub additional_images: Vec<String>,
    pub features: serde_json::Value,
    pub status: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Raw package row as the store hands it over. Normalized via `Package::from`.
#[derive(Debug, Clone, FromRow)]
pub struct PackageRecord {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub heading: Option<String>,
    pub region: Option<String>,
    pub location: Option<String>,
    pub duration: Option<String>,
    pub kind: Option<String>,
    pub slug: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub image: Option<String>,
    pub additional_images: Option<Json<Vec<String>>>,
    pub features: Option<Json<serde_json::Value>>,
    pub status: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<PackageRecord> for Package {
    fn from(record: PackageRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.unwrap_or_default(),
            description: record.description.unwrap_or_default(),
            heading: record.heading.unwrap_or_default(),
            region: record.region.unwrap_or_default(),
            location: record.location.unwrap_or_default(),
            duration: record.duration.unwrap_or_default(),
            kind: record.kind.unwrap_or_default(),
            slug: record.slug.unwrap_or_default(),
            price: record.price.unwrap_or(0.0),
            currency: record.currency.unwrap_or_else(|| "INR".to_string()),
            image: record.image.unwrap_or_default(),
            additional_images: record.additional_images.map(|j| j.0).unwrap_or_default(),
            features: record
                .features
                .map(|j| j.0)
                .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new())),
            status: record.status.unwrap_or(false),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// A published educational article, sourced from the article store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub author: String,
    pub image: String,
    pub kind: String,
    pub view_count: i64,
    pub published_at: Option<DateTime<Utc>>,
}

/// Raw article row as the store hands it over. Normalized via `Article::from`.
#[derive(Debug, Clone, FromRow)]
pub struct ArticleRecord {
    pub id: String,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub image: Option<String>,
    pub kind: Option<String>,
    pub view_count: Option<i64>,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<ArticleRecord> for Article {
    fn from(record: ArticleRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.unwrap_or_default(),
            slug: record.slug.unwrap_or_default(),
            excerpt: record.excerpt.unwrap_or_default(),
            author: record.author.unwrap_or_else(|| "ExploreWilds".to_string()),
            image: record.image.unwrap_or_default(),
            kind: record.kind.unwrap_or_default(),
            view_count: record.view_count.unwrap_or(0),
            published_at: record.published_at,
        }
    }
}

/// The assembled reply for one message, with optional structured payloads
/// for the host layer to render.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BotReply {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expedition_package: Option<ExpeditionCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_article: Option<FeaturedArticle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_suggestion: Option<PackageSuggestion>,
}

impl BotReply {
    pub fn text(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            ..Default::default()
        }
    }
}

/// Card payload for the top expedition match.
#[derive(Debug, Clone, Serialize)]
pub struct ExpeditionCard {
    pub title: String,
    pub image: String,
    pub duration: String,
    pub description: String,
    pub url: String,
    pub park: String,
}

/// Card payload for the featured educational article.
#[derive(Debug, Clone, Serialize)]
pub struct FeaturedArticle {
    pub title: String,
    pub excerpt: String,
    pub url: String,
    pub image: String,
}

/// Card payload for an AI-suggested package attached to a generative reply.
#[derive(Debug, Clone, Serialize)]
pub struct PackageSuggestion {
    pub title: String,
    pub image: String,
    pub description: String,
    pub package_id: String,
}

/// Full package detail payload with a derived description.
#[derive(Debug, Clone, Serialize)]
pub struct PackageDetails {
    pub title: String,
    pub image: String,
    pub additional_images: Vec<String>,
    pub description: String,
    pub duration: String,
    pub region: String,
    pub price: f64,
    pub currency: String,
    pub kind: String,
    pub features: serde_json::Value,
    pub package_id: String,
}
