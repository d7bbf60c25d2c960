//! Educational content resolver.
//!
//! Turns a free-text message into ranked article recommendations. Lookups
//! walk a keyword ladder: up to the first three keywords individually, then
//! the first two joined, then all keywords joined. Store failures degrade to
//! "no match"; an empty result is a valid outcome, never an error.

use std::sync::Arc;

use tracing::{debug, error};

use crate::brain::relevance::{extract_query_keywords, relevance_score};
use crate::brain::taxonomy;
use crate::engine::traits::ArticleStore;
use crate::models::Article;

/// An article with its landing-page URL and relevance score.
#[derive(Debug, Clone)]
pub struct RankedArticle {
    pub article: Article,
    pub url: String,
    pub score: u32,
}

/// Outcome of a content lookup. `topic` is the search term that produced the
/// hits, or the last term tried when nothing matched.
#[derive(Debug, Clone, Default)]
pub struct ContentMatch {
    pub matched: bool,
    pub posts: Vec<RankedArticle>,
    pub topic: Option<String>,
}

pub struct ContentResolver {
    articles: Arc<dyn ArticleStore>,
    base_url: String,
    max_results: usize,
}

impl ContentResolver {
    pub fn new(articles: Arc<dyn ArticleStore>, base_url: &str, max_results: usize) -> Self {
        Self {
            articles,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_results,
        }
    }

    pub async fn match_message(&self, message: &str) -> ContentMatch {
        let keywords = extract_query_keywords(message, taxonomy::CONTENT_STOP_WORDS);
        if keywords.is_empty() {
            return ContentMatch::default();
        }
        debug!(?keywords, "content matching");

        let mut terms: Vec<String> = keywords.iter().take(3).cloned().collect();
        if keywords.len() > 1 {
            terms.push(keywords[..2].join(" "));
        }
        if keywords.len() > 2 {
            terms.push(keywords.join(" "));
        }

        let mut last_term = None;
        for term in terms {
            let posts = self.lookup(&term, &keywords).await;
            if !posts.is_empty() {
                debug!(term, hits = posts.len(), "content match");
                return ContentMatch {
                    matched: true,
                    posts,
                    topic: Some(term),
                };
            }
            last_term = Some(term);
        }

        ContentMatch {
            matched: false,
            posts: Vec::new(),
            topic: last_term,
        }
    }

    /// One store lookup, scored against the full keyword set. Candidates
    /// scoring below 3 are dropped; the rest are ranked and truncated.
    async fn lookup(&self, term: &str, keywords: &[String]) -> Vec<RankedArticle> {
        let raw = match self
            .articles
            .search_published(term, (self.max_results * 2) as u32)
            .await
        {
            Ok(articles) => articles,
            Err(e) => {
                error!(error = %e, term, "article store lookup failed");
                return Vec::new();
            }
        };

        let mut ranked: Vec<RankedArticle> = raw
            .into_iter()
            .map(|article| {
                let score = relevance_score(&article.title, &article.excerpt, keywords);
                let url = format!("{}/blog/{}", self.base_url, article.slug);
                RankedArticle {
                    article,
                    url,
                    score,
                }
            })
            .filter(|ranked| ranked.score >= 3)
            .collect();

        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked.truncate(self.max_results);
        ranked
    }
}
