//! PII redaction module.

mod masker;
pub mod patterns;

pub use masker::{mask_pii, MaskOutcome, PiiMasker, RedactionToken};
pub use patterns::{pattern_for, RedactionPattern, MATCHABLE_PUNCTUATION, REDACTION_PATTERNS};
