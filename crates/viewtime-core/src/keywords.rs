//! Keyword extraction from video titles and descriptions.

use std::collections::{HashMap, HashSet};

use regex::Regex;

/// Common English stop words filtered out of keyword lists.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "up", "about", "into", "through", "during", "before", "after", "above", "below",
    "between", "among", "this", "that", "these", "those", "i", "me", "my", "myself", "we", "our",
    "ours", "ourselves", "you", "your", "yours", "yourself", "yourselves", "he", "him", "his",
    "himself", "she", "her", "hers", "herself", "it", "its", "itself", "they", "them", "their",
    "theirs", "themselves", "what", "which", "who", "whom", "whose", "am", "is", "are", "was",
    "were", "be", "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing",
    "will", "would", "could", "should", "may", "might", "must", "can", "shall",
];

/// Extracts ranked keywords from free text.
pub struct KeywordExtractor {
    stop_words: HashSet<&'static str>,
    token_re: Regex,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
            token_re: Regex::new(r"[a-zA-Z]{3,}").expect("regex is valid"),
        }
    }

    /// Extract up to `max_keywords` keywords from `text`, ranked by
    /// frequency with first-seen order breaking ties.
    ///
    /// Tokens are lowercased alphabetic runs of length >= 3; stop words
    /// are dropped. Empty or stop-word-only text yields an empty list.
    pub fn extract(&self, text: &str, max_keywords: usize) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let lowered = text.to_lowercase();

        // Count while remembering first-seen order for a stable ranking.
        let mut counts: HashMap<String, u32> = HashMap::new();
        let mut order: Vec<String> = Vec::new();
        for token in self.token_re.find_iter(&lowered) {
            let word = token.as_str();
            if self.stop_words.contains(word) {
                continue;
            }
            match counts.get_mut(word) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(word.to_string(), 1);
                    order.push(word.to_string());
                }
            }
        }

        let mut ranked: Vec<(usize, String, u32)> = order
            .into_iter()
            .enumerate()
            .map(|(idx, word)| {
                let count = counts[&word];
                (idx, word, count)
            })
            .collect();
        ranked.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));

        ranked
            .into_iter()
            .take(max_keywords)
            .map(|(_, word, _)| word)
            .collect()
    }

    /// Extract keywords with counts, for aggregate frequency tables.
    pub fn count(&self, words: &[String]) -> Vec<(String, u32)> {
        let mut counts: HashMap<&str, u32> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();
        for word in words {
            match counts.get_mut(word.as_str()) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(word, 1);
                    order.push(word);
                }
            }
        }

        let mut ranked: Vec<(usize, &str, u32)> = order
            .into_iter()
            .enumerate()
            .map(|(idx, word)| (idx, word, counts[word]))
            .collect();
        ranked.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
        ranked
            .into_iter()
            .map(|(_, word, count)| (word.to_string(), count))
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_basic() {
        let extractor = KeywordExtractor::new();
        let keywords = extractor.extract("Learning Rust programming with Rust examples", 10);
        // "rust" appears twice, should rank first.
        assert_eq!(keywords[0], "rust");
        assert!(keywords.contains(&"learning".to_string()));
        assert!(keywords.contains(&"programming".to_string()));
    }

    #[test]
    fn test_extract_filters_stop_words() {
        let extractor = KeywordExtractor::new();
        let keywords = extractor.extract("the quick and the lazy", 10);
        assert!(!keywords.contains(&"the".to_string()));
        assert!(!keywords.contains(&"and".to_string()));
        assert!(keywords.contains(&"quick".to_string()));
        assert!(keywords.contains(&"lazy".to_string()));
    }

    #[test]
    fn test_extract_drops_short_tokens() {
        let extractor = KeywordExtractor::new();
        let keywords = extractor.extract("go to AI ML mastery", 10);
        // "go", "to", "AI", "ML" are all under three characters.
        assert_eq!(keywords, vec!["mastery".to_string()]);
    }

    #[test]
    fn test_extract_lowercases() {
        let extractor = KeywordExtractor::new();
        let keywords = extractor.extract("RUST Rust rust", 10);
        assert_eq!(keywords, vec!["rust".to_string()]);
    }

    #[test]
    fn test_extract_respects_cap() {
        let extractor = KeywordExtractor::new();
        let keywords = extractor.extract("alpha bravo charlie delta echo", 3);
        assert_eq!(keywords.len(), 3);
    }

    #[test]
    fn test_extract_empty_text() {
        let extractor = KeywordExtractor::new();
        assert!(extractor.extract("", 10).is_empty());
    }

    #[test]
    fn test_extract_ignores_digits_and_punctuation() {
        let extractor = KeywordExtractor::new();
        let keywords = extractor.extract("episode 42: rust-lang!!!", 10);
        assert_eq!(
            keywords,
            vec!["episode".to_string(), "rust".to_string(), "lang".to_string()]
        );
    }

    #[test]
    fn test_count_ranks_by_frequency() {
        let extractor = KeywordExtractor::new();
        let words = vec![
            "gaming".to_string(),
            "music".to_string(),
            "gaming".to_string(),
        ];
        let counts = extractor.count(&words);
        assert_eq!(counts[0], ("gaming".to_string(), 2));
        assert_eq!(counts[1], ("music".to_string(), 1));
    }

    #[test]
    fn test_count_tie_keeps_first_seen_order() {
        let extractor = KeywordExtractor::new();
        let words = vec!["zulu".to_string(), "alpha".to_string()];
        let counts = extractor.count(&words);
        assert_eq!(counts[0].0, "zulu");
        assert_eq!(counts[1].0, "alpha");
    }
}
