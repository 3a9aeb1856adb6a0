//! Identity field extraction module.

mod classifier;
mod extractor;
pub mod rules;

pub use classifier::DocumentClassifier;
pub use extractor::{extract_fields, IdentityExtractor};
