//! Statistics - pure value aggregate of per-page word counts
//!
//! Compared by value, serialized for the summary widget. Percentages are
//! rounded whole numbers; an empty page reports 0% rather than a NaN.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_word_count: u32,
    pub unique_word_count: u32,
    pub total_known_word_count: u32,
    pub unique_known_word_count: u32,
}

impl Statistics {
    pub fn new() -> Statistics {
        Statistics::default()
    }

    /// Percentage of all page words (occurrences) that are known.
    pub fn percent_known_page_words(&self) -> u32 {
        percent(self.total_known_word_count, self.total_word_count)
    }

    /// Percentage of distinct words that are known.
    pub fn percent_known_unique_words(&self) -> u32 {
        percent(self.unique_known_word_count, self.unique_word_count)
    }
}

fn percent(known: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(known) * 100.0 / f64::from(total)).round() as u32
}

// ==================== TESTS ====================
