//! Word - one distinct vocabulary item and all of its rendered occurrences
//!
//! A word's learning status belongs to the word, not to any single rendered
//! site: flipping the status re-syncs the class list of every occurrence.
//! The sync is total and idempotent, so it can be re-run after any mutation
//! without tracking what changed.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

use super::node::Node;
use super::patterns::WORD_CLASS;

/// Shared handle to a word; the registry and every page map hold the same one.
pub type WordHandle = Rc<RefCell<Word>>;

/// Learning status, shared by all occurrences of a word.
///
/// `Unverified` is the state between scanning and reconciliation with the
/// record store; reconciliation resolves every word to `Known` or `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStatus {
    Unverified,
    Known,
    Unknown,
}

impl LearningStatus {
    pub const ALL: [LearningStatus; 3] = [
        LearningStatus::Unverified,
        LearningStatus::Known,
        LearningStatus::Unknown,
    ];

    /// The CSS class (and wire value) for this status.
    pub fn as_class(self) -> &'static str {
        match self {
            LearningStatus::Unverified => "unverified",
            LearningStatus::Known => "known",
            LearningStatus::Unknown => "unknown",
        }
    }

    /// Inverse of [`as_class`]; unrecognized values yield `None`.
    pub fn from_class(class: &str) -> Option<LearningStatus> {
        LearningStatus::ALL.into_iter().find(|s| s.as_class() == class)
    }
}

/// Owned handle to one armed click listener on an occurrence site.
///
/// Cancelling consumes the binding; taking it out of its `Option` slot makes
/// double-removal structurally impossible.
#[derive(Debug)]
pub struct ClickBinding {
    site: Node,
}

impl ClickBinding {
    fn arm(site: &Node) -> ClickBinding {
        site.set_listening(true);
        ClickBinding { site: site.clone() }
    }

    /// Disarm the listener on the bound site.
    pub fn cancel(self) {
        self.site.set_listening(false);
    }
}

/// One rendered location of a word, with its optional interaction binding.
#[derive(Debug)]
pub struct Occurrence {
    site: Node,
    binding: Option<ClickBinding>,
}

impl Occurrence {
    pub fn site(&self) -> &Node {
        &self.site
    }

    pub fn is_interactive(&self) -> bool {
        self.binding.is_some()
    }
}

/// One distinct vocabulary item appearing anywhere on a page.
#[derive(Debug)]
pub struct Word {
    text: String,
    status: LearningStatus,
    record_id: Option<String>,
    occurrences: Vec<Occurrence>,
}

impl Word {
    /// Construct with already-normalized text. Callers outside the registry
    /// go through `WordRegistry::lookup_or_create` instead.
    pub(crate) fn new(text: String, status: LearningStatus) -> Word {
        Word {
            text,
            status,
            record_id: None,
            occurrences: Vec::new(),
        }
    }

    /// Normalized text, the identity key.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn status(&self) -> LearningStatus {
        self.status
    }

    /// External record-store identifier, once reconciliation assigned one.
    pub fn record_id(&self) -> Option<&String> {
        self.record_id.as_ref()
    }

    pub fn set_record_id(&mut self, id: Option<String>) {
        self.record_id = id;
    }

    pub fn occurrence_count(&self) -> usize {
        self.occurrences.len()
    }

    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    /// Set the status and re-sync every occurrence's classes.
    pub fn set_status(&mut self, status: LearningStatus) {
        self.status = status;
        self.update_css_classes();
    }

    pub fn mark_as_known(&mut self) {
        self.set_status(LearningStatus::Known);
    }

    pub fn mark_as_unknown(&mut self) {
        self.set_status(LearningStatus::Unknown);
    }

    /// Record a new rendered occurrence, in discovery order, and sync.
    pub fn add_occurrence(&mut self, site: Node) {
        self.occurrences.push(Occurrence {
            site,
            binding: None,
        });
        self.update_css_classes();
    }

    /// Arm a click listener on the matching occurrence site(s).
    pub fn add_click_handler(&mut self, site: &Node) {
        for occurrence in &mut self.occurrences {
            if occurrence.site.ptr_eq(site) && occurrence.binding.is_none() {
                occurrence.binding = Some(ClickBinding::arm(&occurrence.site));
            }
        }
    }

    /// Cancel every armed click listener. Safe to call repeatedly.
    pub fn remove_click_handlers(&mut self) {
        for occurrence in &mut self.occurrences {
            if let Some(binding) = occurrence.binding.take() {
                binding.cancel();
            }
        }
    }

    /// True when `site` is an occurrence of this word with an armed listener.
    pub fn listens_on(&self, site: &Node) -> bool {
        self.occurrences
            .iter()
            .any(|o| o.site.ptr_eq(site) && o.binding.is_some())
    }

    /// Total, idempotent visual sync: every occurrence ends with the marker
    /// class plus exactly the current status class.
    pub fn update_css_classes(&self) {
        for occurrence in &self.occurrences {
            let site = &occurrence.site;
            site.add_class(WORD_CLASS);
            site.add_class(self.status.as_class());
            for other in LearningStatus::ALL {
                if other != self.status {
                    site.remove_class(other.as_class());
                }
            }
        }
    }
}

// ==================== TESTS ====================
