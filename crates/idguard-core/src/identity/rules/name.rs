//! Cardholder name extraction.
//!
//! OCR destroys the card layout, so the name is searched for by a chain of
//! independent heuristics tried in a fixed priority order. The first stage
//! whose candidate survives cleanup and validation wins. When every anchored
//! stage fails, two fallbacks look for runs of proper nouns anywhere in the
//! text.
//!
//! False positives are tolerated: the extracted name is shown to the
//! cardholder next to the document image, never acted on automatically.

use std::sync::Arc;

use regex::Regex;

use super::patterns::{
    NAME_AFTER_AUTHORITY, NAME_ALL_CAPS_LEAD, NAME_BEFORE_RELATION, NAME_CARDHOLDER_LABEL,
    NAME_DISALLOWED_CHARS, NAME_LABELED, NAME_LOOSE_TITLE_CASE, NAME_TITLE_CASE_LEAD, TOKEN,
    WHITESPACE_RUN,
};
use super::vocabulary::Vocabulary;
use super::{capitalize, ExtractionMatch, FieldExtractor};

/// One heuristic in the name chain, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameStage {
    /// After a "Name:" or "To" label.
    Labeled,
    /// Title-case words opening the transcript.
    TitleCaseLead,
    /// Upper-case words opening the transcript.
    AllCapsLead,
    /// After the issuing authority header.
    AuthorityContext,
    /// Before a relation marker such as "S/O".
    RelationMarker,
    /// After a "Name of Cardholder" label.
    CardholderLabel,
    /// Longest run of proper-noun tokens.
    ProperNounRun,
    /// Any run of title-case words, returned verbatim.
    LooseTitleCase,
}

impl NameStage {
    /// Every stage in the order it is tried.
    pub const ORDER: [NameStage; 8] = [
        NameStage::Labeled,
        NameStage::TitleCaseLead,
        NameStage::AllCapsLead,
        NameStage::AuthorityContext,
        NameStage::RelationMarker,
        NameStage::CardholderLabel,
        NameStage::ProperNounRun,
        NameStage::LooseTitleCase,
    ];

    /// Pattern for stages anchored on a label, context or position.
    fn pattern(&self) -> Option<&'static Regex> {
        match self {
            NameStage::Labeled => Some(&NAME_LABELED),
            NameStage::TitleCaseLead => Some(&NAME_TITLE_CASE_LEAD),
            NameStage::AllCapsLead => Some(&NAME_ALL_CAPS_LEAD),
            NameStage::AuthorityContext => Some(&NAME_AFTER_AUTHORITY),
            NameStage::RelationMarker => Some(&NAME_BEFORE_RELATION),
            NameStage::CardholderLabel => Some(&NAME_CARDHOLDER_LABEL),
            NameStage::ProperNounRun | NameStage::LooseTitleCase => None,
        }
    }

    /// Confidence attached to a name produced by this stage.
    pub fn confidence(&self) -> f32 {
        match self {
            NameStage::Labeled | NameStage::CardholderLabel => 0.9,
            NameStage::TitleCaseLead | NameStage::AllCapsLead => 0.75,
            NameStage::RelationMarker => 0.7,
            NameStage::AuthorityContext => 0.6,
            NameStage::ProperNounRun => 0.5,
            NameStage::LooseTitleCase => 0.3,
        }
    }
}

/// Name field extractor.
#[derive(Debug, Clone)]
pub struct NameExtractor {
    vocabulary: Arc<Vocabulary>,
}

impl NameExtractor {
    /// Create a name extractor with the default vocabulary.
    pub fn new() -> Self {
        Self::with_vocabulary(Vocabulary::shared_default())
    }

    /// Create a name extractor sharing `vocabulary`.
    pub fn with_vocabulary(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }

    /// Run a single stage. Returns the accepted candidate, if any.
    pub fn run_stage(&self, stage: NameStage, text: &str) -> Option<ExtractionMatch<String>> {
        match stage {
            NameStage::ProperNounRun => self.proper_noun_run(text),
            NameStage::LooseTitleCase => NAME_LOOSE_TITLE_CASE
                .find(text)
                .map(|m| ExtractionMatch::from_regex(m.as_str().to_string(), stage.confidence(), m)),
            anchored => {
                // Only the first match of a stage is considered.
                let pattern = anchored.pattern()?;
                let caps = pattern.captures(text)?;
                let m = caps.get(1).or_else(|| caps.get(0))?;
                self.accept(m.as_str())
                    .map(|name| ExtractionMatch::from_regex(name, anchored.confidence(), m))
            }
        }
    }

    /// Clean and validate an anchored candidate.
    fn accept(&self, raw: &str) -> Option<String> {
        let cleaned = clean_candidate(raw);

        if cleaned.chars().count() < self.vocabulary.min_name_length() {
            return None;
        }
        if self.vocabulary.contains_stop_word(&cleaned) {
            return None;
        }

        if cleaned == cleaned.to_uppercase() {
            Some(recase_upper(&cleaned))
        } else {
            Some(cleaned)
        }
    }

    /// Longest run of two or more proper-noun tokens that contains no stop
    /// word. Single linear pass keeping the best run seen so far.
    fn proper_noun_run(&self, text: &str) -> Option<ExtractionMatch<String>> {
        let mut best: Option<(usize, usize, String)> = None;
        let mut run: Vec<regex::Match<'_>> = Vec::new();

        let tokens = TOKEN.find_iter(text).map(Some).chain(std::iter::once(None));
        for token in tokens {
            match token {
                Some(t) if is_proper_noun(t.as_str()) => run.push(t),
                _ => {
                    if run.len() > 1 {
                        let joined = run.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(" ");
                        let best_len = best.as_ref().map_or(0, |(_, _, b)| b.len());
                        if joined.len() > best_len && !self.vocabulary.contains_stop_word(&joined) {
                            let start = run[0].start();
                            let end = run[run.len() - 1].end();
                            best = Some((start, end, joined));
                        }
                    }
                    run.clear();
                }
            }
        }

        best.map(|(start, end, joined)| {
            let name = joined.split(' ').map(capitalize).collect::<Vec<_>>().join(" ");
            ExtractionMatch::new(name, NameStage::ProperNounRun.confidence(), &text[start..end])
                .with_position(start, end)
        })
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for NameExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        NameStage::ORDER
            .into_iter()
            .find_map(|stage| self.run_stage(stage, text))
    }

    /// Accepted candidate of every stage, in priority order, without
    /// duplicate values.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<Self::Output> = Vec::new();

        for stage in NameStage::ORDER {
            if let Some(found) = self.run_stage(stage, text) {
                if !results.iter().any(|r| r.value == found.value) {
                    results.push(found);
                }
            }
        }

        results
    }
}

/// Extract a name from text with the default vocabulary.
pub fn extract_name(text: &str) -> Option<String> {
    NameExtractor::new().extract(text).map(|m| m.value)
}

/// Replace characters other than letters, whitespace and periods with
/// spaces, then collapse whitespace.
fn clean_candidate(raw: &str) -> String {
    let stripped = NAME_DISALLOWED_CHARS.replace_all(raw, " ");
    WHITESPACE_RUN.replace_all(&stripped, " ").trim().to_string()
}

/// Re-case an all upper-case name word by word, keeping each first
/// character as printed.
fn recase_upper(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => std::iter::once(first)
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `Capital + lowercase*` or `CAPS{2,}`.
fn is_proper_noun(token: &str) -> bool {
    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_uppercase() {
        return false;
    }

    let rest = chars.as_str();
    rest.chars().all(|c| c.is_ascii_lowercase())
        || (!rest.is_empty() && rest.chars().all(|c| c.is_ascii_uppercase()))
}
