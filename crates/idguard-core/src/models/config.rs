//! Configuration structures for the extraction and masking pipelines.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::pii::RedactionToken;

/// Main configuration for the idguard pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdguardConfig {
    /// Identity field extraction configuration.
    pub extraction: ExtractionConfig,

    /// PII masking configuration.
    pub masking: MaskingConfig,

    /// Presentation configuration for front ends.
    pub output: OutputConfig,
}

/// Identity field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Words that disqualify a name candidate (matched case-insensitively).
    pub stop_words: Vec<String>,

    /// How a stop word is found inside a name candidate.
    pub stop_word_matching: StopWordMatching,

    /// Issuing-authority terms that mark a transcript as an identity document.
    pub identity_keywords: Vec<String>,

    /// Minimum length of an accepted name candidate, in characters.
    pub min_name_length: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            identity_keywords: DEFAULT_IDENTITY_KEYWORDS
                .iter()
                .map(|w| w.to_string())
                .collect(),
            min_name_length: 3,
            stop_word_matching: StopWordMatching::Substring,
        }
    }
}

/// How stop words are matched against a name candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopWordMatching {
    /// A stop word anywhere in the lower-cased candidate rejects it, so
    /// "to" rejects "Santosh".
    #[default]
    Substring,
    /// Only a whole word of the candidate equal to a stop word rejects it.
    WholeWord,
}

/// Temporal, gender, organizational and relational terms that OCR noise
/// tends to put where a name is expected.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "year",
    "yrs",
    "y/o",
    "old",
    "male",
    "female",
    "dob",
    "aadhaar",
    "card",
    "india",
    "gov",
    "government",
    "vid",
    "to",
    "name",
    "of",
    "and",
    "govt",
    "uidai",
    "unique",
    "identification",
    "authority",
    "indian",
    "republic",
    "address",
    "addresses",
    "father",
    "mother",
    "spouse",
    "husband",
    "wife",
    "son",
    "daughter",
];

/// Issuing-authority vocabulary, including the Devanagari spellings of
/// "Aadhaar" and "UIDAI".
pub const DEFAULT_IDENTITY_KEYWORDS: &[&str] = &[
    "aadhaar",
    "uidai",
    "unique identification",
    "आधार",
    "यूआईडीएआई",
];

/// How overlapping redaction patterns are resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskStrategy {
    /// Apply patterns one after another; a later pattern only sees what
    /// earlier ones left unmasked.
    #[default]
    Sequential,
    /// Collect matches of every pattern on the original text, then keep the
    /// leftmost, longest non-overlapping spans.
    LongestMatch,
}

/// PII masking configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskingConfig {
    /// Character the redaction token is built from.
    pub redaction_char: char,

    /// Number of characters in the redaction token.
    pub redaction_width: usize,

    /// Overlap resolution strategy.
    pub strategy: MaskStrategy,
}

impl Default for MaskingConfig {
    fn default() -> Self {
        Self {
            redaction_char: '█',
            redaction_width: 10,
            strategy: MaskStrategy::Sequential,
        }
    }
}

/// Presentation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Show the unmasked transcript for documents that are not identity
    /// documents.
    pub include_raw_text: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            include_raw_text: true,
        }
    }
}

impl IdguardConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        RedactionToken::new(self.masking.redaction_char, self.masking.redaction_width)?;

        if self.extraction.identity_keywords.is_empty() {
            return Err(ConfigError::NoIdentityKeywords.into());
        }
        if self
            .extraction
            .identity_keywords
            .iter()
            .any(|k| k.trim().is_empty())
        {
            return Err(ConfigError::BlankEntry("identity_keywords").into());
        }
        if self.extraction.stop_words.iter().any(|w| w.trim().is_empty()) {
            return Err(ConfigError::BlankEntry("stop_words").into());
        }

        Ok(())
    }
}
