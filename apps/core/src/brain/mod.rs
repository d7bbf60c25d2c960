//! # Brain Module
//!
//! Fast, non-LLM analysis of user input, run before any store or model call.
//!
//! ## Components
//! - `taxonomy`: fixed trigger-phrase sets per intent category
//! - `intent`: substring-containment intent classifier
//! - `relevance`: article relevance scoring and keyword extraction

pub mod intent;
pub mod relevance;
pub mod taxonomy;

pub use intent::{IntentClassifier, IntentSignals};
pub use relevance::{extract_query_keywords, relevance_score};
