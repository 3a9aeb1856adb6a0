//! Document scanner running extraction and masking over one transcript.

use std::time::Instant;

use tracing::info;

use crate::error::Result;
use crate::identity::IdentityExtractor;
use crate::models::config::{IdguardConfig, OutputConfig};
use crate::models::document::{DocumentReport, ExtractedFields};
use crate::pii::PiiMasker;

/// Warning attached to reports of blank transcripts.
pub const EMPTY_TEXT_WARNING: &str = "No text could be extracted";

/// What a front end should show for a scanned document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Presentation<'a> {
    /// Identity document: show the structured fields only.
    Fields(&'a ExtractedFields),
    /// Anything else: the raw transcript (if enabled) and the masked text
    /// (if masking changed anything).
    Text {
        raw: Option<&'a str>,
        masked: Option<&'a str>,
    },
}

/// Runs the identity extractor and the PII masker over transcripts.
///
/// The two pipelines are independent; masking runs whether or not the
/// transcript is classified as an identity document.
#[derive(Debug, Clone, Default)]
pub struct DocumentScanner {
    extractor: IdentityExtractor,
    masker: PiiMasker,
    output: OutputConfig,
}

impl DocumentScanner {
    /// Create a scanner with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scanner from configuration.
    pub fn from_config(config: &IdguardConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            extractor: IdentityExtractor::from_config(&config.extraction)?,
            masker: PiiMasker::from_config(&config.masking)?,
            output: config.output.clone(),
        })
    }

    pub fn extractor(&self) -> &IdentityExtractor {
        &self.extractor
    }

    pub fn masker(&self) -> &PiiMasker {
        &self.masker
    }

    /// Scan one transcript.
    pub fn scan(&self, text: &str) -> DocumentReport {
        let start = Instant::now();
        let mut warnings = Vec::new();

        info!("Scanning {} characters of text", text.chars().count());

        if text.trim().is_empty() {
            warnings.push(EMPTY_TEXT_WARNING.to_string());
        }

        let fields = self.extractor.extract(text);
        for kind in fields.missing() {
            warnings.push(format!("Could not extract {}", kind.label().to_lowercase()));
        }

        let masked = self.masker.mask_with_summary(text);

        let processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "Scan complete in {}ms: identity document: {}, {} redactions",
            processing_time_ms,
            fields.is_identity_document,
            masked.redactions.total()
        );

        DocumentReport {
            fields,
            masked_text: masked.text,
            redactions: masked.redactions,
            warnings,
            processing_time_ms,
        }
    }

    /// Decide what to show for `report`, scanned from `raw_text`.
    pub fn present<'a>(&self, report: &'a DocumentReport, raw_text: &'a str) -> Presentation<'a> {
        if report.fields.is_identity_document {
            return Presentation::Fields(&report.fields);
        }

        Presentation::Text {
            raw: self.output.include_raw_text.then_some(raw_text),
            masked: report.was_masked().then_some(report.masked_text.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::FieldValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scan_identity_card() {
        let text = "Government of India\nName: Priya Sharma\nDOB: 14/03/1992\n\
                    Female\n4821 0937 5566";
        let scanner = DocumentScanner::new();
        let report = scanner.scan(text);

        assert!(report.fields.is_identity_document);
        assert_eq!(report.fields.name, FieldValue::Found("Priya Sharma".to_string()));
        assert!(!report.masked_text.contains("4821"));
        assert!(report.warnings.is_empty());
        assert_eq!(scanner.present(&report, text), Presentation::Fields(&report.fields));
    }

    #[test]
    fn test_scan_other_document() {
        let text = "Invoice for jane@example.com";
        let scanner = DocumentScanner::new();
        let report = scanner.scan(text);

        assert!(!report.fields.is_identity_document);
        assert_eq!(report.warnings.len(), 4);
        assert_eq!(
            scanner.present(&report, text),
            Presentation::Text {
                raw: Some(text),
                masked: Some("Invoice for ██████████"),
            }
        );
    }

    #[test]
    fn test_presentation_without_raw_text() {
        let mut config = IdguardConfig::default();
        config.output.include_raw_text = false;
        let scanner = DocumentScanner::from_config(&config).unwrap();

        let text = "nothing sensitive";
        let report = scanner.scan(text);
        assert_eq!(
            scanner.present(&report, text),
            Presentation::Text {
                raw: None,
                masked: None,
            }
        );
    }

    #[test]
    fn test_blank_transcript() {
        let report = DocumentScanner::new().scan("  \n");

        assert_eq!(report.fields, ExtractedFields::empty());
        assert_eq!(report.masked_text, "  \n");
        assert_eq!(report.warnings[0], EMPTY_TEXT_WARNING);
        assert!(!report.was_masked());
    }

    #[test]
    fn test_invalid_config() {
        let mut config = IdguardConfig::default();
        config.masking.redaction_width = 0;
        assert!(DocumentScanner::from_config(&config).is_err());
    }
}
