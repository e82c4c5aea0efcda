//! Wire records exchanged with the record store
//!
//! The store speaks JSON arrays of `{id, word, how_well_known}` objects.
//! `how_well_known` stays a plain string on the wire so one unrecognized
//! value cannot poison a whole payload; callers compare against the status
//! class names where it matters.

use serde::{Deserialize, Serialize};

use crate::annotate::word::LearningStatus;
use crate::console::console_error;

/// One saved learning-status record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub word: String,
    pub how_well_known: String,
}

impl WordRecord {
    /// A record marking `word` as known, as sent on create.
    pub fn known(word: impl Into<String>) -> WordRecord {
        WordRecord {
            id: None,
            word: word.into(),
            how_well_known: LearningStatus::Known.as_class().to_string(),
        }
    }

    /// True when the saved status says the word is known.
    pub fn is_known(&self) -> bool {
        self.how_well_known == LearningStatus::Known.as_class()
    }
}

/// Parse a response body into records.
///
/// Non-JSON bodies and JSON that is not a record list are logged and treated
/// as "no records": a backend outage must never take the page down.
pub fn parse_records(body: &str) -> Vec<WordRecord> {
    match serde_json::from_str::<Vec<WordRecord>>(body) {
        Ok(records) => records,
        Err(err) => {
            console_error!("[lexicore] malformed record payload: {err}");
            Vec::new()
        }
    }
}

// ==================== TESTS ====================
