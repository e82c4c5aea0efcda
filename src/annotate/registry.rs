//! WordRegistry - process-wide word pool as an explicit, owned instance
//!
//! Maps normalized text to a single shared `Word`; every page that observes
//! the same text gets the same entity, so status is shared across pages and
//! occurrence sites. The registry is passed to collaborators by handle
//! rather than reached as ambient global state, and `reset` is a first-class
//! lifecycle operation for test isolation and independent re-scans.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::node::Node;
use super::patterns::normalize;
use super::word::{LearningStatus, Word, WordHandle};

#[derive(Debug, Default)]
pub struct WordRegistry {
    words: HashMap<String, WordHandle>,
}

impl WordRegistry {
    pub fn new() -> WordRegistry {
        WordRegistry::default()
    }

    /// Look up the word for `text` (normalizing it first), creating it when
    /// absent. An explicitly given `status` overrides an existing word's
    /// status and re-syncs its occurrences; `None` leaves it untouched
    /// (new words start `Unverified`).
    pub fn lookup_or_create(
        &mut self,
        text: &str,
        status: Option<LearningStatus>,
    ) -> WordHandle {
        self.lookup_or_create_normalized(normalize(text), status)
    }

    /// Like [`lookup_or_create`], keyed by a rendered site's inner text, and
    /// additionally attaching the site as a new occurrence of the word.
    ///
    /// [`lookup_or_create`]: WordRegistry::lookup_or_create
    pub fn register_site(&mut self, site: &Node, status: Option<LearningStatus>) -> WordHandle {
        let word = self.lookup_or_create_normalized(normalize(&site.inner_text()), status);
        word.borrow_mut().add_occurrence(site.clone());
        word
    }

    fn lookup_or_create_normalized(
        &mut self,
        key: String,
        status: Option<LearningStatus>,
    ) -> WordHandle {
        let word = self
            .words
            .entry(key.clone())
            .or_insert_with(|| {
                Rc::new(RefCell::new(Word::new(
                    key,
                    status.unwrap_or(LearningStatus::Unverified),
                )))
            })
            .clone();

        if let Some(status) = status {
            let mut inner = word.borrow_mut();
            if inner.status() != status {
                inner.set_status(status);
            }
        }

        word
    }

    /// Look up without creating. `text` may be raw; it is normalized here.
    pub fn get(&self, text: &str) -> Option<WordHandle> {
        self.words.get(&normalize(text)).cloned()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Clear the whole pool. Occurrence sites are not touched; callers are
    /// expected to have discarded or rebuilt their trees independently.
    pub fn reset(&mut self) {
        self.words.clear();
    }
}

// ==================== TESTS ====================
