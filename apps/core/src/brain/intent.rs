//! Intent detection from keyword containment.
//!
//! Deterministic substring matching against the taxonomy. No ML, no stemming.
//! A message can trigger several intents at once; conflict resolution is the
//! orchestrator's job, not this module's.

use serde::{Deserialize, Serialize};

use crate::brain::taxonomy;

/// Per-message intent flags plus any gazetteer locations mentioned.
///
/// Ephemeral: recomputed for every incoming message, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentSignals {
    /// General travel interest (travel phrases or wildlife terms).
    pub travel: bool,
    /// Explicit interest in expedition packages.
    pub expedition: bool,
    /// Interest in blogs, articles, or other educational content.
    pub educational: bool,
    /// Question about AI-based sighting predictions.
    pub predictive_info: bool,
    /// Question about safari gate recommendations.
    pub gate_prediction: bool,
    /// Matched location keywords, in taxonomy order (not message order).
    pub locations: Vec<String>,
}

/// Keyword-containment intent classifier. Always returns a result; an empty
/// message degrades to all-false signals rather than an error.
#[derive(Debug, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, message: &str) -> IntentSignals {
        let text = message.to_lowercase();
        let contains_any = |phrases: &[&str]| phrases.iter().any(|p| text.contains(p));

        let travel = contains_any(taxonomy::TRAVEL_KEYWORDS);
        let wildlife = contains_any(taxonomy::WILDLIFE_KEYWORDS);
        let locations = taxonomy::LOCATION_KEYWORDS
            .iter()
            .filter(|kw| text.contains(*kw))
            .map(|kw| kw.to_string())
            .collect();

        IntentSignals {
            travel: travel || wildlife,
            expedition: contains_any(taxonomy::EXPEDITION_KEYWORDS),
            educational: contains_any(taxonomy::EDUCATIONAL_KEYWORDS),
            predictive_info: contains_any(taxonomy::PREDICTIVE_INFO_KEYWORDS),
            gate_prediction: contains_any(taxonomy::GATE_PREDICTION_KEYWORDS),
            locations,
        }
    }
}
