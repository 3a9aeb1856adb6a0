//! Regex-based PII masking.

use std::borrow::Cow;

use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::models::config::{MaskStrategy, MaskingConfig};
use crate::models::document::{PiiCategory, RedactionSummary};

use super::patterns::{MATCHABLE_PUNCTUATION, REDACTION_PATTERNS};

/// Fixed-width placeholder substituted for every redacted span.
///
/// The width never depends on the redacted text, so masked output does not
/// leak the length of what was removed. The fill character must be one no
/// redaction pattern can match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionToken(String);

impl RedactionToken {
    pub fn new(fill: char, width: usize) -> Result<Self> {
        if width == 0 {
            return Err(ConfigError::ZeroRedactionWidth.into());
        }
        let matchable =
            fill.is_alphanumeric() || fill.is_whitespace() || MATCHABLE_PUNCTUATION.contains(fill);
        if matchable {
            return Err(ConfigError::MatchableRedactionChar(fill).into());
        }
        Ok(Self(std::iter::repeat_n(fill, width).collect()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RedactionToken {
    fn default() -> Self {
        Self("█".repeat(10))
    }
}

/// Masked text together with what was redacted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskOutcome {
    pub text: String,
    pub redactions: RedactionSummary,
}

/// Replaces every PII span of a transcript with a redaction token.
///
/// Masking is unconditional: it does not depend on which identity fields
/// were extracted or on the document classification.
#[derive(Debug, Clone, Default)]
pub struct PiiMasker {
    token: RedactionToken,
    strategy: MaskStrategy,
}

impl PiiMasker {
    /// Create a masker with the default token and sequential strategy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a masker from configuration.
    pub fn from_config(config: &MaskingConfig) -> Result<Self> {
        Ok(Self {
            token: RedactionToken::new(config.redaction_char, config.redaction_width)?,
            strategy: config.strategy,
        })
    }

    /// Set the overlap resolution strategy.
    pub fn with_strategy(mut self, strategy: MaskStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn token(&self) -> &RedactionToken {
        &self.token
    }

    /// Mask `text`, returning only the redacted string.
    pub fn mask(&self, text: &str) -> String {
        self.mask_with_summary(text).text
    }

    /// Mask `text` and report how many spans of each category were replaced.
    ///
    /// Passes repeat until one redacts nothing, so masking already masked
    /// text is a no-op. A redaction can expose a new match when OCR glued a
    /// label to a number. Every pass that redacts replaces matchable
    /// characters with token characters, so the loop ends.
    pub fn mask_with_summary(&self, text: &str) -> MaskOutcome {
        let mut outcome = MaskOutcome {
            text: text.to_string(),
            redactions: RedactionSummary::new(),
        };

        loop {
            let pass = match self.strategy {
                MaskStrategy::Sequential => self.mask_sequential(&outcome.text),
                MaskStrategy::LongestMatch => self.mask_longest_match(&outcome.text),
            };
            if pass.redactions.is_empty() {
                break;
            }
            for (category, count) in pass.redactions.iter() {
                outcome.redactions.record(category, count);
            }
            outcome.text = pass.text;
        }

        for (category, count) in outcome.redactions.iter() {
            debug!(%category, count, "redacted spans");
        }

        outcome
    }

    /// Apply each pattern in turn to the partially masked text. A span
    /// consumed by an earlier pattern is invisible to later ones.
    fn mask_sequential(&self, text: &str) -> MaskOutcome {
        let token = self.token.as_str();
        let mut masked = text.to_string();
        let mut redactions = RedactionSummary::new();

        for pattern in REDACTION_PATTERNS.iter() {
            let mut count = 0usize;
            let replaced = pattern.regex.replace_all(&masked, |_: &regex::Captures<'_>| {
                count += 1;
                token
            });

            if let Cow::Owned(next) = replaced {
                masked = next;
            }
            redactions.record(pattern.category, count);
        }

        MaskOutcome {
            text: masked,
            redactions,
        }
    }

    /// Match every pattern against the original text, then keep the
    /// leftmost spans, preferring the longest one at each start. Ties keep
    /// pattern order.
    fn mask_longest_match(&self, text: &str) -> MaskOutcome {
        let mut spans: Vec<(usize, usize, PiiCategory)> = REDACTION_PATTERNS
            .iter()
            .flat_map(|p| {
                p.regex
                    .find_iter(text)
                    .map(move |m| (m.start(), m.end(), p.category))
            })
            .collect();
        spans.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

        let mut masked = String::with_capacity(text.len());
        let mut redactions = RedactionSummary::new();
        let mut cursor = 0;

        for (start, end, category) in spans {
            if start < cursor {
                continue;
            }
            masked.push_str(&text[cursor..start]);
            masked.push_str(self.token.as_str());
            redactions.record(category, 1);
            cursor = end;
        }
        masked.push_str(&text[cursor..]);

        MaskOutcome {
            text: masked,
            redactions,
        }
    }
}

/// Mask PII with the default token and sequential strategy.
pub fn mask_pii(text: &str) -> String {
    PiiMasker::new().mask(text)
}
