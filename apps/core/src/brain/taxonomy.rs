//! Keyword taxonomy.
//!
//! Fixed trigger-phrase sets per intent category, matched by case-insensitive
//! substring containment only. Adding a phrase can only widen matching; it
//! never narrows an existing category.

/// Phrases signalling a general intent to travel or book.
pub const TRAVEL_KEYWORDS: &[&str] = &[
    "safari", "trip", "visit", "go to", "travel to", "book", "planning", "tour", "journey",
    "expedition", "adventure", "vacation", "holiday", "see", "spot", "find", "look for",
    "want to go", "interested in",
];

/// Wildlife terms that indicate interest in safari offerings.
pub const WILDLIFE_KEYWORDS: &[&str] = &[
    "tiger", "lion", "elephant", "leopard", "rhino", "bear", "deer", "wildlife", "jungle",
    "forest", "national park", "safari",
];

/// Gazetteer of known destinations. Doubles as the location extractor's
/// vocabulary; matching is plain substring containment.
pub const LOCATION_KEYWORDS: &[&str] = &[
    "ranthambore",
    "corbett",
    "bandhavgarh",
    "kanha",
    "pench",
    "tadoba",
    "kerala",
    "karnataka",
    "madhya pradesh",
    "rajasthan",
    "gir",
    "kaziranga",
    "sundarbans",
    "periyar",
    "nagarhole",
    "bandipur",
    "jim corbett",
    "ranthambore national park",
    "corbett national park",
    "bandhavgarh national park",
    "kanha national park",
    "tadoba national park",
    "pench national park",
    "maasai mara",
    "serengeti",
    "africa",
    "kenya",
    "tanzania",
];

/// Phrases describing trip length preferences.
pub const DURATION_KEYWORDS: &[&str] = &[
    "1 day", "2 day", "3 day", "4 day", "5 day", "week", "long", "short", "overnight", "weekend",
];

/// Phrases describing budget preferences.
pub const BUDGET_KEYWORDS: &[&str] = &[
    "budget", "cheap", "affordable", "economical", "low cost", "expensive", "luxury", "premium",
    "high end",
];

/// Phrases that explicitly signal intent to plan an expedition.
pub const EXPEDITION_KEYWORDS: &[&str] = &[
    "expedition",
    "safari expedition",
    "jungle expedition",
    "plan expedition",
    "do you plan",
    "do you plan jungle",
    "do you plan safari",
];

/// Phrases that signal interest in educational content.
pub const EDUCATIONAL_KEYWORDS: &[&str] = &[
    "blog", "article", "articles", "case study", "podcast", "read about", "learn about",
];

/// Phrases asking about AI-based sighting predictions.
pub const PREDICTIVE_INFO_KEYWORDS: &[&str] = &[
    "ai",
    "predict",
    "prediction",
    "predictive",
    "predictive model",
    "predictive models",
    "sighting",
    "sighting chances",
    "chances of sighting",
    "probability of sighting",
    "model",
    "machine learning",
];

/// Phrases asking which safari gate to pick.
pub const GATE_PREDICTION_KEYWORDS: &[&str] = &[
    "gate prediction",
    "which gate",
    "best gate",
    "gate recommendation",
    "recommend a gate",
    "predict gate",
    "safari gate",
];

/// Stop words dropped when extracting content-search keywords from a message.
pub const CONTENT_STOP_WORDS: &[&str] = &[
    "tell", "me", "about", "the", "a", "an", "in", "blog", "article", "read", "learn", "want",
    "to", "know", "case", "study", "what", "why", "how", "is", "are", "was", "were", "can",
    "could", "would", "should",
];

/// Stop words dropped when matching a message against package fields.
pub const EXPEDITION_STOP_WORDS: &[&str] = &[
    "national", "park", "expedition", "safari", "tell", "me", "about", "the", "a", "an", "in",
];

/// Month names and abbreviations, longest forms first so that a full name
/// wins over its prefix.
pub const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep",
    "oct", "nov", "dec",
];
