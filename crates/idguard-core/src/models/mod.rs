//! Data models shared by the extraction and masking pipelines.

pub mod config;
pub mod document;

pub use config::{
    ExtractionConfig, IdguardConfig, MaskStrategy, MaskingConfig, OutputConfig, StopWordMatching,
};
pub use document::{
    DocumentReport, ExtractedFields, FieldKind, FieldValue, PiiCategory, RedactionSummary,
    NOT_FOUND_LABEL,
};
