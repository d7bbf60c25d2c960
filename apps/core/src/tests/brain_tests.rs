//! Brain Module Tests
//!
//! Intent classification, relevance scoring, and keyword extraction.

use crate::brain::relevance::{extract_query_keywords, relevance_score};
use crate::brain::{taxonomy, IntentClassifier};

#[test]
fn test_expedition_keywords_always_set_expedition_intent() {
    let classifier = IntentClassifier::new();

    for message in [
        "Do you plan jungle safari expedition?",
        "I'd like a safari expedition in May",
        "do you plan anything for families?",
        "Tell me about your Expeditions",
    ] {
        let signals = classifier.classify(message);
        assert!(signals.expedition, "expected expedition intent for {:?}", message);
    }
}

#[test]
fn test_wildlife_terms_set_travel_intent() {
    let classifier = IntentClassifier::new();

    let signals = classifier.classify("Where can I photograph a leopard?");
    assert!(signals.travel);
    assert!(!signals.expedition);
}

#[test]
fn test_gazetteer_locations_are_reported_in_taxonomy_order() {
    let classifier = IntentClassifier::new();

    // "corbett" precedes "jim corbett" in the taxonomy, regardless of the
    // order the words appear in the message.
    let signals = classifier.classify("jim corbett or ranthambore?");
    assert_eq!(signals.locations[0], "ranthambore");
    assert!(signals.locations.contains(&"corbett".to_string()));
    assert!(signals.locations.contains(&"jim corbett".to_string()));
}

#[test]
fn test_overlapping_intents_are_all_reported() {
    let classifier = IntentClassifier::new();

    let signals =
        classifier.classify("Which gate should I book for the Tadoba safari expedition?");
    assert!(signals.gate_prediction);
    assert!(signals.expedition);
    assert!(signals.travel);
    assert!(signals.locations.contains(&"tadoba".to_string()));
}

#[test]
fn test_predictive_info_phrases() {
    let classifier = IntentClassifier::new();

    let signals = classifier.classify("What is the probability of sighting a tiger?");
    assert!(signals.predictive_info);
}

#[test]
fn test_educational_phrases() {
    let classifier = IntentClassifier::new();

    let signals = classifier.classify("Do you have a blog on birding?");
    assert!(signals.educational);
}

#[test]
fn test_relevance_score_counts_each_keyword_per_field() {
    let keywords: Vec<String> = vec!["tiger".to_string(), "tadoba".to_string()];

    let score = relevance_score(
        "Tiger Conservation in Tadoba",
        "Tadoba's tigers are thriving",
        &keywords,
    );
    // Both keywords hit the title (20) and the excerpt (6).
    assert_eq!(score, 26);
}

#[test]
fn test_relevance_score_is_monotonic_when_widening_the_query() {
    let title = "Monsoon birding in Periyar";
    let excerpt = "Hornbills, drongos, and more";

    let mut keywords: Vec<String> = Vec::new();
    let mut previous = relevance_score(title, excerpt, &keywords);
    for word in ["periyar", "hornbills", "birding", "unrelated"] {
        keywords.push(word.to_string());
        let current = relevance_score(title, excerpt, &keywords);
        assert!(current >= previous);
        previous = current;
    }
}

#[test]
fn test_expedition_stop_words_differ_from_content_stop_words() {
    let message = "tell me about the national park safari";

    let content = extract_query_keywords(message, taxonomy::CONTENT_STOP_WORDS);
    let expedition = extract_query_keywords(message, taxonomy::EXPEDITION_STOP_WORDS);

    // The content list keeps domain words; the expedition list drops them.
    assert!(content.contains(&"national".to_string()));
    assert!(content.contains(&"safari".to_string()));
    assert!(!expedition.contains(&"national".to_string()));
    assert!(!expedition.contains(&"safari".to_string()));
}
