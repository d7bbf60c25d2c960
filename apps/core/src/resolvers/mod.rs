//! Resolvers: components that turn a matched intent into a concrete,
//! store-backed answer.

pub mod content;
pub mod expedition;

pub use content::{ContentMatch, ContentResolver, RankedArticle};
pub use expedition::{construct_package_url, slugify, ExpeditionMatch, ExpeditionResolver};
