//! Tokenizer - lossless capturing split of text into word and separator runs
//!
//! Splitting keeps separator runs as their own fragments so that
//! concatenating every produced fragment reproduces the input exactly.
//! Fragments containing a digit are preserved verbatim but flagged as
//! ignorable, so they never become trackable words.

use regex::Matches;

use super::patterns::{numeric_pattern, separator_pattern};

/// One fragment of the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment<'t> {
    /// A word candidate, eligible for registration.
    Word(&'t str),
    /// A run of whitespace/punctuation, re-inserted verbatim.
    Separator(&'t str),
    /// A non-separator fragment containing a digit; preserved but untracked.
    Ignorable(&'t str),
}

impl<'t> Fragment<'t> {
    /// The exact input slice this fragment covers.
    pub fn text(&self) -> &'t str {
        match self {
            Fragment::Word(s) | Fragment::Separator(s) | Fragment::Ignorable(s) => s,
        }
    }

    /// True only for fragments that should be registered as words.
    pub fn is_word(&self) -> bool {
        matches!(self, Fragment::Word(_))
    }
}

/// Split `text` into an ordered, lazy fragment sequence.
///
/// The iterator is finite and restartable (call `tokenize` again), and the
/// concatenation of all `Fragment::text()` values equals `text`.
pub fn tokenize(text: &str) -> Fragments<'_> {
    Fragments {
        text,
        pos: 0,
        separators: separator_pattern().find_iter(text),
        queued_separator: None,
    }
}

/// Iterator state for [`tokenize`].
pub struct Fragments<'t> {
    text: &'t str,
    pos: usize,
    separators: Matches<'static, 't>,
    queued_separator: Option<(usize, usize)>,
}

impl<'t> Iterator for Fragments<'t> {
    type Item = Fragment<'t>;

    fn next(&mut self) -> Option<Fragment<'t>> {
        if let Some((start, end)) = self.queued_separator.take() {
            self.pos = end;
            return Some(Fragment::Separator(&self.text[start..end]));
        }

        match self.separators.next() {
            Some(m) if m.start() > self.pos => {
                // A word candidate sits before this separator run.
                let word = &self.text[self.pos..m.start()];
                self.queued_separator = Some((m.start(), m.end()));
                self.pos = m.start();
                Some(classify(word))
            }
            Some(m) => {
                self.pos = m.end();
                Some(Fragment::Separator(m.as_str()))
            }
            None if self.pos < self.text.len() => {
                let word = &self.text[self.pos..];
                self.pos = self.text.len();
                Some(classify(word))
            }
            None => None,
        }
    }
}

fn classify(fragment: &str) -> Fragment<'_> {
    if numeric_pattern().is_match(fragment) {
        Fragment::Ignorable(fragment)
    } else {
        Fragment::Word(fragment)
    }
}

// ==================== TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn join(text: &str) -> String {
        tokenize(text).map(|f| f.text()).collect()
    }

    fn words(text: &str) -> Vec<&str> {
        tokenize(text)
            .filter(|f| f.is_word())
            .map(|f| f.text())
            .collect()
    }

    #[test]
    fn test_round_trip_is_lossless() {
        let inputs = [
            "",
            "uno",
            "uno dos tres",
            "  leading and trailing  ",
            "¿Cómo estás?",
            "«palabra» (otra) [más]",
            "mixte: français, español; 日本語!",
            "line\nbreaks\tand tabs",
            "...!!!",
            "42 7",
        ];
        for input in inputs {
            assert_eq!(join(input), input, "round trip failed for {:?}", input);
        }
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert_eq!(tokenize("").count(), 0);
    }

    #[test]
    fn test_basic_split() {
        assert_eq!(words("uno dos tres"), vec!["uno", "dos", "tres"]);
    }

    #[test]
    fn test_slash_splits_words() {
        assert_eq!(words("uno/dos"), vec!["uno", "dos"]);
    }

    #[test]
    fn test_separator_runs_are_single_fragments() {
        let fragments: Vec<_> = tokenize("uno , dos").collect();
        assert_eq!(
            fragments,
            vec![
                Fragment::Word("uno"),
                Fragment::Separator(" , "),
                Fragment::Word("dos"),
            ]
        );
    }

    #[test]
    fn test_leading_and_trailing_punctuation() {
        let fragments: Vec<_> = tokenize("¡Hola!").collect();
        assert_eq!(
            fragments,
            vec![
                Fragment::Separator("¡"),
                Fragment::Word("Hola"),
                Fragment::Separator("!"),
            ]
        );
    }

    #[test]
    fn test_embedded_digit_disqualifies_whole_fragment() {
        let fragments: Vec<_> = tokenize("abc1de fg").collect();
        assert_eq!(
            fragments,
            vec![
                Fragment::Ignorable("abc1de"),
                Fragment::Separator(" "),
                Fragment::Word("fg"),
            ]
        );
    }

    #[test]
    fn test_numeric_only_text_has_no_words() {
        assert!(words("42 7").is_empty());
        assert_eq!(join("42 7"), "42 7");
    }

    #[test]
    fn test_restartable() {
        let first: Vec<_> = tokenize("uno dos").collect();
        let second: Vec<_> = tokenize("uno dos").collect();
        assert_eq!(first, second);
    }
}
