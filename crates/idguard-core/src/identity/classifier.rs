//! National-ID document classification.

use std::sync::Arc;

use tracing::trace;

use super::rules::{FieldExtractor, IdNumberExtractor, Vocabulary};

/// Decides whether a transcript plausibly comes from a national ID card.
///
/// A transcript qualifies when it contains an ID number or mentions an
/// issuing-authority keyword. The result only gates presentation; masking
/// runs regardless.
#[derive(Debug, Clone)]
pub struct DocumentClassifier {
    vocabulary: Arc<Vocabulary>,
    id_number: IdNumberExtractor,
}

impl DocumentClassifier {
    pub fn new() -> Self {
        Self::with_vocabulary(Vocabulary::shared_default())
    }

    pub fn with_vocabulary(vocabulary: Arc<Vocabulary>) -> Self {
        Self {
            vocabulary,
            id_number: IdNumberExtractor::new(),
        }
    }

    /// Classify a transcript from scratch.
    pub fn classify(&self, text: &str) -> bool {
        let id_found = self.id_number.extract(text).is_some();
        self.classify_with_id(text, id_found)
    }

    /// Classify reusing an ID number lookup that was already done.
    pub fn classify_with_id(&self, text: &str, id_found: bool) -> bool {
        if id_found {
            return true;
        }

        match self.vocabulary.find_identity_keyword(text) {
            Some(keyword) => {
                trace!(keyword, "identity keyword matched");
                true
            }
            None => false,
        }
    }
}

impl Default for DocumentClassifier {
    fn default() -> Self {
        Self::new()
    }
}
