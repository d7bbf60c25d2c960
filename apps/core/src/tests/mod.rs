//! Test Module
//!
//! Test suite for the JungleChat backend core.
//!
//! ## Test Categories
//! - `brain_tests`: intent classification, relevance scoring, keyword extraction
//! - `database_tests`: SQLite store implementations
//! - `resolver_tests`: content and expedition resolvers over seeded stores
//! - `history_tests`: write-through session history
//! - `orchestrator_tests`: the response cascade over mocked collaborators
//! - `generator_tests`: the HTTP generative-backend client

pub mod support;

mod brain_tests;
mod generator_tests;
