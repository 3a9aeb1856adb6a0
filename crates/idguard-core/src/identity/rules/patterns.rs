//! Common regex patterns for identity field extraction.
//!
//! OCR transcripts of ID cards have no reliable layout, so most patterns
//! look for a label or a context word and capture what follows it. Lazy
//! captures stop at the first terminator; the terminator is consumed but
//! never part of the captured group.
//!
//! Digits are ASCII `[0-9]` and word boundaries are ASCII `(?-u:\b)`, so
//! digits and letters of other scripts never count as part of a field.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // ID number: 12 digits grouped 4-4-4 by spaces or hyphens. OCR often
    // splits the first group after its leading digit.
    pub static ref ID_NUMBER: Regex = Regex::new(
        r"(?-u:\b)([0-9][\s-]?[0-9]{3}[\s-]?[0-9]{4}[\s-]?[0-9]{4})(?-u:\b)"
    ).unwrap();

    pub static ref ID_SEPARATOR: Regex = Regex::new(r"[\s-]").unwrap();

    // Name after a "Name:" / "To" label, up to a newline, a number, a field
    // keyword or the end of text.
    pub static ref NAME_LABELED: Regex = Regex::new(
        r"(?i)(?:Name|To)[:\s]+([A-Z][A-Za-z\s.]{2,}?)(?:\n|[0-9]{2,}|(?-u:\b)(?:DOB|Male|Female|M|F)(?-u:\b)|$)"
    ).unwrap();

    // Two or more title-case words opening the transcript.
    pub static ref NAME_TITLE_CASE_LEAD: Regex = Regex::new(
        r"^([A-Z][a-z]+(?:\s+[A-Z][a-z]+)+)"
    ).unwrap();

    // Two or more upper-case words opening the transcript.
    pub static ref NAME_ALL_CAPS_LEAD: Regex = Regex::new(
        r"^([A-Z]{2,}(?:\s+[A-Z]{2,})+)(?:\n|[0-9]|DOB|$)"
    ).unwrap();

    // Name printed after the issuing authority header.
    pub static ref NAME_AFTER_AUTHORITY: Regex = Regex::new(
        r"(?i)(?:Government of India|Aadhaar|GOVT\.? OF INDIA|UIDAI)[^A-Za-z]*(?-u:\b)([A-Z][A-Za-z\s.]{2,})"
    ).unwrap();

    // Name printed before a relation marker (S/O, D/O, W/O, ...).
    pub static ref NAME_BEFORE_RELATION: Regex = Regex::new(
        r"(?i)([A-Z][A-Za-z\s.]{2,}?)\s*(?:S/?O|D/?O|W/?O|Son/Daughter of|Wife of)(?-u:\b)"
    ).unwrap();

    // "Name of the Cardholder" / "Cardholder's Name" labels.
    pub static ref NAME_CARDHOLDER_LABEL: Regex = Regex::new(
        r"(?i)(?:Name of (?:the )?Cardholder|Cardholder['\s]s? Name)[:\s]*([A-Z][A-Za-z\s.]{2,}?)(?:\n|[0-9]|$)"
    ).unwrap();

    // Any run of two or more title-case words.
    pub static ref NAME_LOOSE_TITLE_CASE: Regex = Regex::new(
        r"[A-Z][a-z]+(?:\s+[A-Z][a-z]+)+"
    ).unwrap();

    // Name cleanup
    pub static ref NAME_DISALLOWED_CHARS: Regex = Regex::new(r"[^A-Za-z\s.]").unwrap();
    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    // Whitespace-delimited token
    pub static ref TOKEN: Regex = Regex::new(r"\S+").unwrap();

    // Date of birth (D/M/Y with one or two digit day and month)
    pub static ref DATE_OF_BIRTH: Regex = Regex::new(
        r"(?-u:\b)([0-9]{1,2}[/\-][0-9]{1,2}[/\-][0-9]{2,4})(?-u:\b)"
    ).unwrap();

    // Gender
    pub static ref GENDER_LABELED: Regex = Regex::new(
        r"(?i)(?:Gender|Sex)[:\s]+(Male|Female|M|F)"
    ).unwrap();

    pub static ref GENDER_STANDALONE: Regex = Regex::new(
        r"(?i)(?-u:\b)(Male|Female|M|F)(?-u:\b)"
    ).unwrap();
}
