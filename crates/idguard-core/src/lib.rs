//! Core library for identity card OCR transcripts.
//!
//! This crate provides:
//! - Identity field extraction (ID number, name, date of birth, gender)
//! - National-ID document classification
//! - Regex-based PII masking with per-category redaction counts
//! - Configuration and report models shared by the CLI and WASM front ends

pub mod error;
pub mod identity;
pub mod models;
pub mod pii;
pub mod scanner;

pub use error::{IdguardError, Result};
pub use identity::{extract_fields, DocumentClassifier, IdentityExtractor};
pub use models::{
    DocumentReport, ExtractedFields, FieldKind, FieldValue, IdguardConfig, MaskStrategy,
    PiiCategory, RedactionSummary, StopWordMatching,
};
pub use pii::{mask_pii, MaskOutcome, PiiMasker, RedactionToken};
pub use scanner::{DocumentScanner, Presentation};
