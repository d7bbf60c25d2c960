//! Content relevance scoring and query keyword extraction.

/// Scores an article against a keyword set: +10 per keyword found in the
/// title, +3 per keyword found in the excerpt. The same keyword can score in
/// both fields. Pure and deterministic.
pub fn relevance_score(title: &str, excerpt: &str, keywords: &[String]) -> u32 {
    let title = title.to_lowercase();
    let excerpt = excerpt.to_lowercase();

    let mut score = 0;
    for keyword in keywords {
        let keyword = keyword.to_lowercase();
        if title.contains(&keyword) {
            score += 10;
        }
        if excerpt.contains(&keyword) {
            score += 3;
        }
    }
    score
}

/// Splits a message into lower-cased search keywords, dropping stop words and
/// tokens of two characters or fewer.
pub fn extract_query_keywords(message: &str, stop_words: &[&str]) -> Vec<String> {
    message
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.len() > 2 && !stop_words.contains(word))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::taxonomy;

    fn keywords(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_title_match_outweighs_excerpt_match() {
        let score = relevance_score(
            "Tiger Conservation in Tadoba",
            "A field report on conservation work",
            &keywords(&["tiger", "conservation"]),
        );
        // "tiger" in title (10), "conservation" in title and excerpt (10 + 3).
        assert_eq!(score, 23);
    }

    #[test]
    fn test_same_keyword_scores_in_both_fields() {
        let score = relevance_score("Leopards", "leopards at dusk", &keywords(&["leopards"]));
        assert_eq!(score, 13);
    }

    #[test]
    fn test_score_is_monotonic_in_the_keyword_set() {
        let base = keywords(&["tiger"]);
        let wider = keywords(&["tiger", "conservation"]);

        let title = "Tiger Conservation in Tadoba";
        let excerpt = "Notes from the buffer zone";
        assert!(relevance_score(title, excerpt, &wider) >= relevance_score(title, excerpt, &base));
    }

    #[test]
    fn test_no_match_scores_zero() {
        let score = relevance_score("Birding in Kerala", "", &keywords(&["rhino"]));
        assert_eq!(score, 0);
    }

    #[test]
    fn test_keyword_extraction_drops_stop_words_and_short_tokens() {
        let extracted =
            extract_query_keywords("Tell me about tiger conservation", taxonomy::CONTENT_STOP_WORDS);
        assert_eq!(extracted, vec!["tiger", "conservation"]);
    }

    #[test]
    fn test_keyword_extraction_on_stop_words_only() {
        let extracted = extract_query_keywords("tell me about the", taxonomy::CONTENT_STOP_WORDS);
        assert!(extracted.is_empty());
    }
}
