//! Page - the per-document scanner and state holder
//!
//! One `Page` per content root. Scanning rewrites every text-bearing element
//! into interleaved separator text nodes and annotated word spans, registers
//! each word with the shared registry, and accumulates running counts.
//! Reconciliation is a separate, explicit step: scan renders everything
//! `Unverified`, and only after the saved-record pass completes are
//! still-unverified words demoted to `Unknown`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::store::datastore::{RecordStore, StoreError};
use crate::store::record::WordRecord;

use super::language;
use super::node::Node;
use super::patterns::{normalize, IGNORE_CLASS, TEXT_BEARING_TAGS};
use super::registry::WordRegistry;
use super::stats::Statistics;
use super::tokenizer::{tokenize, Fragment};
use super::word::{LearningStatus, WordHandle};

/// Where the page is in its lifecycle. Scan and reconcile run synchronously,
/// so the transient phases of the conceptual machine collapse into their
/// completed forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePhase {
    Empty,
    Scanned,
    Reconciled,
    Destroyed,
}

/// Consumer of statistics updates (the summary widget's seam).
pub trait SummaryView {
    fn update(&mut self, stats: &Statistics);
}

pub struct Page {
    lang_code: String,
    root: Option<Node>,
    registry: Rc<RefCell<WordRegistry>>,
    /// Words observed by this page, keyed by normalized text.
    words: HashMap<String, WordHandle>,
    /// First-seen order of normalized keys; drives deterministic iteration.
    order: Vec<String>,
    stats: Statistics,
    summary: Option<Box<dyn SummaryView>>,
    store: Option<Box<dyn RecordStore>>,
    phase: PagePhase,
}

impl Page {
    /// A page over `root`, sharing `registry` with any other pages in the
    /// process. No scanning happens until [`scan`](Page::scan) is called.
    pub fn new(
        lang_code: impl Into<String>,
        root: Option<Node>,
        registry: Rc<RefCell<WordRegistry>>,
    ) -> Page {
        Page {
            lang_code: lang_code.into(),
            root,
            registry,
            words: HashMap::new(),
            order: Vec::new(),
            stats: Statistics::new(),
            summary: None,
            store: None,
            phase: PagePhase::Empty,
        }
    }

    pub fn set_summary(&mut self, summary: Box<dyn SummaryView>) {
        self.summary = Some(summary);
    }

    pub fn set_record_store(&mut self, store: Box<dyn RecordStore>) {
        self.store = Some(store);
    }

    pub fn lang_code(&self) -> &str {
        &self.lang_code
    }

    pub fn phase(&self) -> PagePhase {
        self.phase
    }

    pub fn stats(&self) -> Statistics {
        self.stats
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// The page's word for `text` (normalized here), if it was observed.
    pub fn word(&self, text: &str) -> Option<WordHandle> {
        self.words.get(&normalize(text)).cloned()
    }

    pub fn unique_words(&self) -> usize {
        self.words.len()
    }

    // -------------------- scanning --------------------

    /// Walk the root, annotate every text-bearing element, and accumulate
    /// counts. A page without a root, or with an unidentified language,
    /// stays `Empty`. Re-scanning starts the page counts from zero.
    pub fn scan(&mut self) {
        let Some(root) = self.root.clone() else {
            return;
        };
        if self.lang_code == language::UNKNOWN {
            return;
        }

        self.words.clear();
        self.order.clear();
        self.stats = Statistics::new();

        // Detach the root and work inside a wrapper, then put it back where
        // it was; mirrors the out-of-document rewrite of live DOM scanners.
        let original_parent = root.parent();
        root.detach();
        let container = Node::element("div");
        container.append_child(&root);

        let eligible: Vec<Node> = container
            .descendants()
            .into_iter()
            .filter(is_text_bearing)
            .collect();

        for element in eligible {
            // Rewriting an ancestor (e.g. an article) detaches the elements
            // inside it; skip those so no word is counted twice.
            if !element.has_ancestor(&container) {
                continue;
            }
            self.annotate_element(&element);
        }

        root.detach();
        if let Some(parent) = original_parent {
            parent.append_child(&root);
        }

        self.phase = PagePhase::Scanned;
        self.update_summary();
    }

    fn annotate_element(&mut self, element: &Node) {
        let text = element.inner_text();
        let trimmed = text.trim();

        let mut fragments = Vec::new();
        for fragment in tokenize(trimmed) {
            match fragment {
                Fragment::Separator(text) | Fragment::Ignorable(text) => {
                    fragments.push(Node::text(text));
                }
                Fragment::Word(text) => fragments.push(self.annotate_word(text)),
            }
        }

        element.replace_children(fragments);
    }

    /// Wrap one word fragment in a span, register it, and count it.
    fn annotate_word(&mut self, text: &str) -> Node {
        let span = Node::element("span");
        span.append_child(&Node::text(text));

        let word = self.registry.borrow_mut().register_site(&span, None);

        let key = word.borrow().text().to_string();
        let is_new = !self.words.contains_key(&key);
        let is_known = word.borrow().status() == LearningStatus::Known;

        self.stats.total_word_count += 1;
        if is_new {
            self.stats.unique_word_count += 1;
            self.order.push(key.clone());
        }
        if is_known {
            self.stats.total_known_word_count += 1;
        }
        if is_new && is_known {
            self.stats.unique_known_word_count += 1;
        }

        word.borrow_mut().add_click_handler(&span);
        self.words.insert(key, word);

        span
    }

    // -------------------- interaction --------------------

    /// Dispatch a click on a rendered site. Sites without an armed listener
    /// are inert, so clicking an already-known word does nothing.
    pub fn handle_click(&mut self, site: &Node) -> Result<Vec<WordRecord>, StoreError> {
        let clicked = self
            .order
            .iter()
            .filter_map(|key| self.words.get(key))
            .find(|word| word.borrow().listens_on(site))
            .cloned();

        match clicked {
            Some(word) => self.mark_as_known(&word),
            None => Ok(Vec::new()),
        }
    }

    /// Flip a word to known: one status transition, one persistence request.
    ///
    /// Already-known words resolve trivially with no request; the guard
    /// inspects only the word's current in-memory status.
    pub fn mark_as_known(&mut self, word: &WordHandle) -> Result<Vec<WordRecord>, StoreError> {
        if word.borrow().status() == LearningStatus::Known {
            return Ok(Vec::new());
        }

        let occurrence_count = {
            let mut inner = word.borrow_mut();
            inner.mark_as_known();
            inner.remove_click_handlers();
            inner.occurrence_count() as u32
        };

        self.stats.total_known_word_count += occurrence_count;
        self.stats.unique_known_word_count += 1;
        self.update_summary();

        let Some(store) = self.store.as_deref() else {
            return Ok(Vec::new());
        };

        let (text, record_id) = {
            let inner = word.borrow();
            (inner.text().to_string(), inner.record_id().cloned())
        };

        let records = match record_id {
            Some(id) => store.update_record(&self.lang_code, &id, LearningStatus::Known)?,
            None => store.create_record(&self.lang_code, &text)?,
        };

        if let Some(first) = records.first() {
            let mut inner = word.borrow_mut();
            inner.set_record_id(first.id.clone());
            if let Some(status) = LearningStatus::from_class(&first.how_well_known) {
                inner.set_status(status);
            }
        }

        Ok(records)
    }

    // -------------------- reconciliation --------------------

    /// Fetch saved records for this page's language and fold them in.
    /// Requires a configured record store; configuration errors propagate,
    /// transport failures arrive here as an empty record set.
    pub fn reconcile(&mut self) -> Result<(), StoreError> {
        let records = match self.store.as_deref() {
            Some(store) => store.get_records(&self.lang_code)?,
            None => Vec::new(),
        };
        self.apply_saved_records(&records);
        Ok(())
    }

    /// Fold externally saved records into page state, then demote every
    /// still-unverified word to unknown. Record words are normalized with
    /// the same function as page words, so decorated or cased payloads
    /// still match.
    pub fn apply_saved_records(&mut self, records: &[WordRecord]) {
        for record in records {
            let key = normalize(&record.word);
            let Some(word) = self.words.get(&key) else {
                continue;
            };

            word.borrow_mut().set_record_id(record.id.clone());

            let already_known = word.borrow().status() == LearningStatus::Known;
            if record.is_known() && !already_known {
                self.stats.total_known_word_count += word.borrow().occurrence_count() as u32;
                self.stats.unique_known_word_count += 1;
                word.borrow_mut().mark_as_known();
            }
        }

        for key in &self.order {
            if let Some(word) = self.words.get(key) {
                let mut inner = word.borrow_mut();
                if inner.status() == LearningStatus::Unverified {
                    inner.mark_as_unknown();
                }
            }
        }

        self.phase = PagePhase::Reconciled;
        self.update_summary();
    }

    // -------------------- teardown --------------------

    /// Release the owned summary view. Safe to call any number of times.
    pub fn destroy(&mut self) {
        self.summary = None;
        self.phase = PagePhase::Destroyed;
    }

    fn update_summary(&mut self) {
        if let Some(summary) = self.summary.as_mut() {
            summary.update(&self.stats);
        }
    }
}

fn is_text_bearing(node: &Node) -> bool {
    let Some(tag) = node.tag() else {
        return false;
    };
    if !TEXT_BEARING_TAGS.contains(&tag.as_str()) {
        return false;
    }
    // The annotator's own paragraphs opt out of scanning.
    !(tag == "p" && node.has_class(IGNORE_CLASS))
}
