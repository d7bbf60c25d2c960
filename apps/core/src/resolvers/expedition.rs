//! Expedition resolver.
//!
//! Matches free text against active expedition packages and builds
//! landing-page URLs from slugified titles. URL construction is pure and
//! deterministic; it is never delegated to the generative backend.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, error};

use crate::brain::relevance::extract_query_keywords;
use crate::brain::taxonomy;
use crate::engine::traits::PackageStore;
use crate::models::Package;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("Invalid regex: non-alphanumeric runs"));
static PARK_NOISE_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)national park|expedition").expect("Invalid regex: park noise words")
});

/// Lower-cases, collapses non-alphanumeric runs into single hyphens, and
/// trims edge hyphens. Idempotent.
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    NON_ALPHANUMERIC
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

/// Builds the landing-page URL for a package from its title: the part before
/// any " - " separator, stripped of "National Park" and "Expedition" in any
/// case, slugified, with a fixed `-national-park` suffix.
pub fn construct_package_url(package: &Package, base_url: &str) -> String {
    let title = package.title.trim();
    let park = title.split(" - ").next().unwrap_or(title);
    let park = PARK_NOISE_WORDS.replace_all(park, "");

    let slug = format!("{}-national-park", slugify(park.trim()));
    format!("{}/explore/{}", base_url.trim_end_matches('/'), slug)
}

/// Outcome of an expedition lookup. When nothing matches, `available_parks`
/// carries the park names found in the store so the caller can offer a
/// choice list.
#[derive(Debug, Clone, Default)]
pub struct ExpeditionMatch {
    pub matched: bool,
    pub park_name: Option<String>,
    pub packages: Vec<Package>,
    pub available_parks: Vec<String>,
}

pub struct ExpeditionResolver {
    packages: Arc<dyn PackageStore>,
}

impl ExpeditionResolver {
    pub fn new(packages: Arc<dyn PackageStore>) -> Self {
        Self { packages }
    }

    /// Matches a message (or a bare location string) against the active
    /// expedition packages. Store failures degrade to a no-match result.
    pub async fn match_query(&self, message: &str) -> ExpeditionMatch {
        let all_packages = match self.packages.expedition_packages(None).await {
            Ok(packages) => packages,
            Err(e) => {
                error!(error = %e, "package store lookup failed");
                return ExpeditionMatch::default();
            }
        };
        if all_packages.is_empty() {
            return ExpeditionMatch::default();
        }

        let tokens = extract_query_keywords(message, taxonomy::EXPEDITION_STOP_WORDS);
        debug!(?tokens, total = all_packages.len(), "expedition matching");

        let mut matched = Vec::new();
        let mut park_name = None;
        for package in &all_packages {
            let haystack = format!(
                "{} {} {} {}",
                package.title, package.heading, package.slug, package.region
            )
            .to_lowercase();

            if tokens.iter().any(|token| haystack.contains(token.as_str())) {
                matched.push(package.clone());
                if park_name.is_none() {
                    park_name = Some(display_name(package));
                }
            }
        }

        if !matched.is_empty() {
            return ExpeditionMatch {
                matched: true,
                park_name,
                packages: matched,
                available_parks: Vec::new(),
            };
        }

        ExpeditionMatch {
            matched: false,
            park_name: None,
            packages: Vec::new(),
            available_parks: available_parks(&all_packages),
        }
    }
}

/// Heading if present, falling back to the title.
fn display_name(package: &Package) -> String {
    if package.heading.is_empty() {
        package.title.clone()
    } else {
        package.heading.clone()
    }
}

/// Unique park names across the region/heading/title/location fields of the
/// given packages, stripped of the "National Park" and "Expedition" literals,
/// alphabetically sorted.
fn available_parks(packages: &[Package]) -> Vec<String> {
    let mut parks = BTreeSet::new();
    for package in packages {
        for field in [
            &package.region,
            &package.heading,
            &package.title,
            &package.location,
        ] {
            let cleaned = field
                .replace("National Park", "")
                .replace("Expedition", "")
                .trim()
                .to_string();
            if !cleaned.is_empty() {
                parks.insert(cleaned);
            }
        }
    }
    parks.into_iter().collect()
}
