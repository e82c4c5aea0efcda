//! Language - cheap pattern-match language identification
//!
//! Just enough to pick the record-store shelf for a page: a handful of
//! orthographic markers, no grammar. Unrecognized text maps to the unknown
//! sentinel, which keeps the scanner from annotating pages it cannot file.

use regex::Regex;
use std::sync::OnceLock;

/// Sentinel language code for unidentifiable text.
pub const UNKNOWN: &str = "??";
pub const SPANISH: &str = "es";
pub const FRENCH: &str = "fr";

static SPANISH_MARKER: OnceLock<Regex> = OnceLock::new();
static FRENCH_MARKER: OnceLock<Regex> = OnceLock::new();

/// Identify the language of `text`, returning a code or [`UNKNOWN`].
pub fn identify(text: &str) -> &'static str {
    if text.is_empty() {
        return UNKNOWN;
    }

    let spanish = SPANISH_MARKER
        .get_or_init(|| Regex::new(r"(?i)ñ").expect("spanish marker is valid"));
    if spanish.is_match(text) {
        return SPANISH;
    }

    let french = FRENCH_MARKER
        .get_or_init(|| Regex::new(r"(?i)\b(est|et)\b").expect("french marker is valid"));
    if french.is_match(text) {
        return FRENCH;
    }

    UNKNOWN
}

// ==================== TESTS ====================
