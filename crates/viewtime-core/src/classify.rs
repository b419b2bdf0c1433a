//! Provenance classification of watch events.
//!
//! Takeout records carry free-text `details` labels describing how a video
//! was served. Classification is an ordered rule scan: each rule owns a
//! pattern set and a [`ViewSource`]; the first case-insensitive substring
//! match wins. Keeping the rules as data lets the set be tested and
//! extended without touching the aggregation logic.

use crate::models::ViewSource;

/// Detail labels that indicate a recommendation/autoplay surface.
const ALGORITHMIC_PATTERNS: &[&str] = &[
    "Recommended for you",
    "Suggested video",
    "From Google Ads",
    "From your YouTube Mix",
    "Autoplay",
    "Because you watched",
    "Watch Next",
    "Home",
];

/// Detail labels that indicate deliberate navigation.
const INTENTIONAL_PATTERNS: &[&str] = &[
    "From your history",
    "From subscriptions",
    "Searched for",
    "Watch later",
    "Playlist",
    "Channel",
    "Library",
];

/// One classification rule: a pattern set mapping to a source.
#[derive(Debug, Clone)]
pub struct SourceRule {
    pub source: ViewSource,
    pub patterns: &'static [&'static str],
}

/// Ordered rule set classifying detail labels into a [`ViewSource`].
#[derive(Debug, Clone)]
pub struct SourceClassifier {
    rules: Vec<SourceRule>,
}

impl Default for SourceClassifier {
    /// The production rule set: algorithmic patterns are checked before
    /// intentional ones, matching the export's labelling conventions.
    fn default() -> Self {
        Self {
            rules: vec![
                SourceRule {
                    source: ViewSource::Algorithmic,
                    patterns: ALGORITHMIC_PATTERNS,
                },
                SourceRule {
                    source: ViewSource::Intentional,
                    patterns: INTENTIONAL_PATTERNS,
                },
            ],
        }
    }
}

impl SourceClassifier {
    /// Build a classifier from an explicit rule list.
    pub fn new(rules: Vec<SourceRule>) -> Self {
        Self { rules }
    }

    /// Classify a record's detail labels.
    ///
    /// Labels are scanned in order; per label, rules are tried in order
    /// and the first pattern match wins, capturing that label as the
    /// source detail. With no match at all the event defaults to
    /// `algorithmic` with no detail: YouTube's export omits detail for
    /// many algorithmically served views, and that default is preserved
    /// deliberately.
    pub fn classify(&self, detail_labels: &[String]) -> (ViewSource, Option<String>) {
        for label in detail_labels {
            let lowered = label.to_lowercase();
            for rule in &self.rules {
                if rule
                    .patterns
                    .iter()
                    .any(|pattern| lowered.contains(&pattern.to_lowercase()))
                {
                    return (rule.source, Some(label.clone()));
                }
            }
        }
        (ViewSource::Algorithmic, None)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_algorithmic_match() {
        let classifier = SourceClassifier::default();
        let (source, detail) = classifier.classify(&labels(&["Recommended for you"]));
        assert_eq!(source, ViewSource::Algorithmic);
        assert_eq!(detail.as_deref(), Some("Recommended for you"));
    }

    #[test]
    fn test_intentional_match() {
        let classifier = SourceClassifier::default();
        let (source, detail) = classifier.classify(&labels(&["Searched for rust tutorials"]));
        assert_eq!(source, ViewSource::Intentional);
        assert_eq!(detail.as_deref(), Some("Searched for rust tutorials"));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let classifier = SourceClassifier::default();
        let (source, _) = classifier.classify(&labels(&["AUTOPLAY triggered"]));
        assert_eq!(source, ViewSource::Algorithmic);
    }

    #[test]
    fn test_first_label_wins() {
        let classifier = SourceClassifier::default();
        let (source, detail) =
            classifier.classify(&labels(&["From subscriptions", "Autoplay"]));
        assert_eq!(source, ViewSource::Intentional);
        assert_eq!(detail.as_deref(), Some("From subscriptions"));
    }

    #[test]
    fn test_algorithmic_rule_checked_first_within_label() {
        // A label matching both sets resolves to the first rule.
        let classifier = SourceClassifier::default();
        let (source, _) = classifier.classify(&labels(&["Home playlist shelf"]));
        assert_eq!(source, ViewSource::Algorithmic);
    }

    #[test]
    fn test_unlabeled_defaults_to_algorithmic() {
        let classifier = SourceClassifier::default();
        let (source, detail) = classifier.classify(&[]);
        assert_eq!(source, ViewSource::Algorithmic);
        assert!(detail.is_none());
    }

    #[test]
    fn test_unmatched_label_defaults_to_algorithmic() {
        let classifier = SourceClassifier::default();
        let (source, detail) = classifier.classify(&labels(&["Something else entirely"]));
        assert_eq!(source, ViewSource::Algorithmic);
        assert!(detail.is_none());
    }

    #[test]
    fn test_custom_rule_set() {
        let classifier = SourceClassifier::new(vec![SourceRule {
            source: ViewSource::Intentional,
            patterns: &["Deep link"],
        }]);
        let (source, _) = classifier.classify(&labels(&["Deep link from chat"]));
        assert_eq!(source, ViewSource::Intentional);
    }
}
