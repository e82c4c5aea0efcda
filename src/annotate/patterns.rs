//! Shared patterns and class-name constants
//!
//! All regexes used by the annotation engine live here, compiled once behind
//! `OnceLock`. The separator set drives both tokenization and word-identity
//! normalization, so there is exactly one definition of each.

use regex::Regex;
use std::sync::OnceLock;

/// Marker class carried by every annotated word span.
pub const WORD_CLASS: &str = "L2";

/// Paragraphs carrying this class belong to the annotator's own UI and are
/// never re-scanned.
pub const IGNORE_CLASS: &str = "lexicore-ignore";

/// Tags whose inner text is eligible for annotation, in whitelist form.
pub const TEXT_BEARING_TAGS: [&str; 8] = ["h1", "h2", "h3", "h4", "h5", "h6", "article", "p"];

static SEPARATOR: OnceLock<Regex> = OnceLock::new();
static PUNCTUATION: OnceLock<Regex> = OnceLock::new();
static NUMERIC: OnceLock<Regex> = OnceLock::new();

/// A run of whitespace and/or splitting punctuation (slash included, so
/// constructs like `uno/dos` split into two words).
pub fn separator_pattern() -> &'static Regex {
    SEPARATOR.get_or_init(|| {
        Regex::new(r#"[\s/.,:;'"“”?!¿¡<>«»()\[\]]+"#).expect("separator pattern is valid")
    })
}

/// The separator set minus whitespace. Deleted (not captured) when computing
/// a word's identity, so `(palabra)` and `palabra` are the same word.
pub fn punctuation_pattern() -> &'static Regex {
    PUNCTUATION.get_or_init(|| {
        Regex::new(r#"[/.,:;'"“”?!¿¡<>«»()\[\]]+"#).expect("punctuation pattern is valid")
    })
}

/// Any decimal digit. A fragment containing one is not a trackable word.
pub fn numeric_pattern() -> &'static Regex {
    NUMERIC.get_or_init(|| Regex::new(r"\d").expect("numeric pattern is valid"))
}

/// Canonical word form: trimmed, lowercased, punctuation stripped.
///
/// This is the identity key for the word registry. Every place that compares
/// or looks up word text (scanning, reconciliation, click dispatch) must go
/// through this function; a second normalization path would cause silent
/// lookup misses.
pub fn normalize(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    punctuation_pattern().replace_all(&lowered, "").into_owned()
}

// ==================== TESTS ====================
