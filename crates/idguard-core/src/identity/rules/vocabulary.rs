//! Stop words and issuing-authority keywords.
//!
//! A `Vocabulary` is built once from configuration and shared through `Arc`
//! by every extractor that needs it. It is never mutated afterwards.

use std::collections::HashSet;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

use crate::error::{ConfigError, Result};
use crate::models::config::{ExtractionConfig, StopWordMatching};

lazy_static! {
    static ref DEFAULT_VOCABULARY: Arc<Vocabulary> = Arc::new(
        Vocabulary::from_config(&ExtractionConfig::default()).unwrap()
    );
}

/// Immutable word lists used by the name rules and the document classifier.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    stop_words: HashSet<String>,
    stop_word_matching: StopWordMatching,
    identity_keywords: Regex,
    min_name_length: usize,
}

impl Vocabulary {
    /// Build a vocabulary from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        if config.identity_keywords.is_empty() {
            return Err(ConfigError::NoIdentityKeywords.into());
        }

        let mut stop_words = HashSet::with_capacity(config.stop_words.len());
        for word in &config.stop_words {
            let word = word.trim();
            if word.is_empty() {
                return Err(ConfigError::BlankEntry("stop_words").into());
            }
            stop_words.insert(word.to_lowercase());
        }

        let mut alternatives = Vec::with_capacity(config.identity_keywords.len());
        for keyword in &config.identity_keywords {
            let keyword = keyword.trim();
            if keyword.is_empty() {
                return Err(ConfigError::BlankEntry("identity_keywords").into());
            }
            alternatives.push(regex::escape(keyword));
        }

        let identity_keywords = RegexBuilder::new(&alternatives.join("|"))
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            stop_words,
            stop_word_matching: config.stop_word_matching,
            identity_keywords,
            min_name_length: config.min_name_length,
        })
    }

    /// The vocabulary built from default configuration.
    pub fn shared_default() -> Arc<Vocabulary> {
        Arc::clone(&DEFAULT_VOCABULARY)
    }

    /// Whether `word` is a stop word (case-insensitive).
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&word.to_lowercase())
    }

    /// Whether `candidate` contains a stop word, as a substring or as a
    /// whole word depending on configuration.
    pub fn contains_stop_word(&self, candidate: &str) -> bool {
        match self.stop_word_matching {
            StopWordMatching::Substring => {
                let lower = candidate.to_lowercase();
                self.stop_words.iter().any(|w| lower.contains(w.as_str()))
            }
            StopWordMatching::WholeWord => candidate
                .split(|c: char| !(c.is_alphanumeric() || c == '/'))
                .filter(|w| !w.is_empty())
                .any(|w| self.is_stop_word(w)),
        }
    }

    /// First issuing-authority keyword found in `text`, as written there.
    pub fn find_identity_keyword<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.identity_keywords.find(text).map(|m| m.as_str())
    }

    /// Whether `text` mentions an issuing authority.
    pub fn mentions_identity_authority(&self, text: &str) -> bool {
        self.identity_keywords.is_match(text)
    }

    /// Minimum accepted name length, in characters.
    pub fn min_name_length(&self) -> usize {
        self.min_name_length
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        DEFAULT_VOCABULARY.as_ref().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_words_match_substrings_by_default() {
        let vocab = Vocabulary::default();

        assert!(vocab.contains_stop_word("Govt of India"));
        assert!(vocab.contains_stop_word("MALE"));
        // "to" and "son" inside longer names count.
        assert!(vocab.contains_stop_word("Santosh Johnson"));
        assert!(vocab.contains_stop_word("Tony Stark"));
        assert!(!vocab.contains_stop_word("Priya Sharma"));
    }

    #[test]
    fn test_whole_word_stop_words() {
        let config = ExtractionConfig {
            stop_word_matching: StopWordMatching::WholeWord,
            ..ExtractionConfig::default()
        };
        let vocab = Vocabulary::from_config(&config).unwrap();

        assert!(vocab.contains_stop_word("Govt of India"));
        assert!(vocab.contains_stop_word("MALE"));
        assert!(!vocab.contains_stop_word("Santosh Johnson"));
        assert!(!vocab.contains_stop_word("Tony Stark"));
    }

    #[test]
    fn test_identity_keywords_case_insensitive() {
        let vocab = Vocabulary::default();

        assert!(vocab.mentions_identity_authority("issued by UIDAI"));
        assert!(vocab.mentions_identity_authority("Unique Identification Authority"));
        assert!(vocab.mentions_identity_authority("मेरा आधार, मेरी पहचान"));
        assert!(!vocab.mentions_identity_authority("Driving Licence"));
        assert_eq!(vocab.find_identity_keyword("your Aadhaar card"), Some("Aadhaar"));
    }

    #[test]
    fn test_custom_keywords_are_escaped() {
        let config = ExtractionConfig {
            identity_keywords: vec!["e-KYC (v2)".to_string()],
            ..ExtractionConfig::default()
        };
        let vocab = Vocabulary::from_config(&config).unwrap();

        assert!(vocab.mentions_identity_authority("E-KYC (V2) document"));
        assert!(!vocab.mentions_identity_authority("e-KYC v2"));
    }

    #[test]
    fn test_blank_entries_rejected() {
        let config = ExtractionConfig {
            stop_words: vec!["  ".to_string()],
            ..ExtractionConfig::default()
        };
        assert!(Vocabulary::from_config(&config).is_err());

        let config = ExtractionConfig {
            identity_keywords: Vec::new(),
            ..ExtractionConfig::default()
        };
        assert!(Vocabulary::from_config(&config).is_err());
    }
}
