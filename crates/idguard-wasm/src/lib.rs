//! WASM bindings for identity card OCR text.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! OCR itself runs on the JavaScript side; these bindings take its transcript.

use wasm_bindgen::prelude::*;

use idguard_core::identity::rules::{normalize_gender, normalize_id_number};
use idguard_core::{DocumentReport, IdguardConfig, Presentation};

/// File name offered when the masked transcript is downloaded.
pub const MASKED_TEXT_FILE_NAME: &str = "masked-text.txt";

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract identity fields from an OCR transcript.
#[wasm_bindgen]
pub fn extract_fields(text: &str) -> Result<JsValue, JsValue> {
    to_js(&idguard_core::extract_fields(text))
}

/// Mask PII in an OCR transcript with the default settings.
#[wasm_bindgen]
pub fn mask_pii(text: &str) -> String {
    idguard_core::mask_pii(text)
}

/// Extract fields and mask in one call.
#[wasm_bindgen]
pub fn scan(text: &str) -> Result<JsValue, JsValue> {
    DocumentScanner::new().scan(text)
}

/// Report with what the result screen should show.
#[derive(serde::Serialize)]
struct ScanResult<'a> {
    #[serde(flatten)]
    report: &'a DocumentReport,
    /// "fields" for identity documents, "text" otherwise.
    view: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_masked_text: Option<&'a str>,
}

/// Document scanner class for browser use.
#[wasm_bindgen]
pub struct DocumentScanner {
    scanner: idguard_core::DocumentScanner,
}

#[wasm_bindgen]
impl DocumentScanner {
    /// Create a scanner with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            scanner: idguard_core::DocumentScanner::new(),
        }
    }

    /// Create a scanner from a JSON configuration string.
    #[wasm_bindgen]
    pub fn from_config_json(json: &str) -> Result<DocumentScanner, JsValue> {
        let config: IdguardConfig =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let scanner = idguard_core::DocumentScanner::from_config(&config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self { scanner })
    }

    /// Scan a transcript.
    #[wasm_bindgen]
    pub fn scan(&self, text: &str) -> Result<JsValue, JsValue> {
        let report = self.scanner.scan(text);

        let output = match self.scanner.present(&report, text) {
            Presentation::Fields(_) => ScanResult {
                report: &report,
                view: "fields",
                raw_text: None,
                display_masked_text: None,
            },
            Presentation::Text { raw, masked } => ScanResult {
                report: &report,
                view: "text",
                raw_text: raw,
                display_masked_text: masked,
            },
        };

        to_js(&output)
    }

    /// Mask a transcript with this scanner's settings.
    #[wasm_bindgen]
    pub fn mask(&self, text: &str) -> String {
        self.scanner.masker().mask(text)
    }

    /// Whether the transcript looks like a national ID card.
    #[wasm_bindgen]
    pub fn is_identity_document(&self, text: &str) -> bool {
        self.scanner.extractor().extract(text).is_identity_document
    }
}

impl Default for DocumentScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Transcript assembled line by line from browser-side OCR.
#[wasm_bindgen]
pub struct OcrTranscript {
    lines: Vec<OcrLine>,
}

struct OcrLine {
    text: String,
    confidence: f32,
}

#[wasm_bindgen]
impl OcrTranscript {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add a recognized line.
    #[wasm_bindgen]
    pub fn add_line(&mut self, text: &str, confidence: f32) {
        self.lines.push(OcrLine {
            text: text.to_string(),
            confidence,
        });
    }

    /// Full transcript, one recognized line per line.
    #[wasm_bindgen]
    pub fn get_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Mean OCR confidence, or 0 for an empty transcript.
    #[wasm_bindgen]
    pub fn mean_confidence(&self) -> f32 {
        if self.lines.is_empty() {
            return 0.0;
        }
        self.lines.iter().map(|l| l.confidence).sum::<f32>() / self.lines.len() as f32
    }

    /// Scan this transcript with default settings.
    #[wasm_bindgen]
    pub fn scan(&self) -> Result<JsValue, JsValue> {
        scan(&self.get_text())
    }
}

impl Default for OcrTranscript {
    fn default() -> Self {
        Self::new()
    }
}

/// Formatting helpers for the result screen.
#[wasm_bindgen]
pub struct IdCardUtils;

#[wasm_bindgen]
impl IdCardUtils {
    /// Format an ID number as `dddd dddd dddd`.
    #[wasm_bindgen]
    pub fn format_id_number(id: &str) -> String {
        normalize_id_number(id)
    }

    /// Capitalize a gender value (`FEMALE` -> `Female`).
    #[wasm_bindgen]
    pub fn format_gender(gender: &str) -> String {
        normalize_gender(gender)
    }

    /// Download name for the masked transcript.
    #[wasm_bindgen]
    pub fn masked_text_file_name() -> String {
        MASKED_TEXT_FILE_NAME.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_mask_pii() {
        assert_eq!(
            mask_pii("Contact me at jane@example.com or 9876543210"),
            "Contact me at ██████████ or ██████████"
        );
    }

    #[wasm_bindgen_test]
    fn test_scanner_from_config() {
        let scanner = DocumentScanner::from_config_json(
            r#"{"masking": {"redaction_char": "*", "redaction_width": 3}}"#,
        )
        .unwrap();
        assert_eq!(scanner.mask("mail a@b.io"), "mail ***");
        assert!(DocumentScanner::from_config_json(r#"{"masking": {"redaction_width": 0}}"#).is_err());
    }

    #[wasm_bindgen_test]
    fn test_transcript_lines() {
        let mut transcript = OcrTranscript::new();
        transcript.add_line("UIDAI", 0.9);
        transcript.add_line("4821 0937 5566", 0.7);

        assert_eq!(transcript.get_text(), "UIDAI\n4821 0937 5566");
        assert!((transcript.mean_confidence() - 0.8).abs() < 1e-6);
        assert!(DocumentScanner::new().is_identity_document(&transcript.get_text()));
    }

    #[wasm_bindgen_test]
    fn test_format_helpers() {
        assert_eq!(IdCardUtils::format_id_number("482109375566"), "4821 0937 5566");
        assert_eq!(IdCardUtils::format_gender("FEMALE"), "Female");
    }
}
