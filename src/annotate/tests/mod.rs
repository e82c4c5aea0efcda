//! Scenario-level tests for the annotation engine: full scans, click flow,
//! and reconciliation against a mock record store.


use std::cell::RefCell;
use std::rc::Rc;

use crate::annotate::node::Node;
use crate::annotate::page::{Page, SummaryView};
use crate::annotate::registry::WordRegistry;
use crate::annotate::stats::Statistics;
use crate::annotate::word::LearningStatus;
use crate::store::datastore::{RecordStore, StoreError};
use crate::store::record::WordRecord;

/// A paragraph holding one text node.
pub fn paragraph(text: &str) -> Node {
    let p = Node::element("p");
    p.append_child(&Node::text(text));
    p
}

pub fn fresh_registry() -> Rc<RefCell<WordRegistry>> {
    Rc::new(RefCell::new(WordRegistry::new()))
}

pub fn scanned_page(root: &Node, lang: &str) -> Page {
    let mut page = Page::new(lang, Some(root.clone()), fresh_registry());
    page.scan();
    page
}

/// Render a node to HTML-ish markup for exact-output assertions.
pub fn html(node: &Node) -> String {
    if let Some(text) = node.text_content() {
        return text;
    }
    let tag = node.tag().unwrap_or_default();
    let classes = node.classes();
    let class_attr = if classes.is_empty() {
        String::new()
    } else {
        format!(r#" class="{}""#, classes.join(" "))
    };
    format!("<{tag}{class_attr}>{}</{tag}>", inner_html(node))
}

/// The markup of a node's children only.
pub fn inner_html(node: &Node) -> String {
    node.children().iter().map(html).collect()
}

/// Summary view that records every statistics update it receives.
#[derive(Clone, Default)]
pub struct RecordingSummary {
    pub updates: Rc<RefCell<Vec<Statistics>>>,
}

impl SummaryView for RecordingSummary {
    fn update(&mut self, stats: &Statistics) {
        self.updates.borrow_mut().push(*stats);
    }
}

/// Record store double: canned `get_records` payload, call log, optional
/// missing-credentials failure.
#[derive(Clone, Default)]
pub struct MockStore {
    pub state: Rc<RefCell<MockStoreState>>,
}

#[derive(Default)]
pub struct MockStoreState {
    pub saved: Vec<WordRecord>,
    pub create_reply: Vec<WordRecord>,
    pub fail_auth: bool,
    pub gets: Vec<String>,
    pub creates: Vec<(String, String)>,
    pub updates: Vec<(String, String, LearningStatus)>,
}

impl MockStore {
    pub fn with_saved(records: Vec<WordRecord>) -> MockStore {
        let store = MockStore::default();
        store.state.borrow_mut().saved = records;
        store
    }

    fn check_auth(&self) -> Result<(), StoreError> {
        if self.state.borrow().fail_auth {
            Err(StoreError::MissingAuthToken)
        } else {
            Ok(())
        }
    }
}

impl RecordStore for MockStore {
    fn get_records(&self, lang_code: &str) -> Result<Vec<WordRecord>, StoreError> {
        self.check_auth()?;
        let mut state = self.state.borrow_mut();
        state.gets.push(lang_code.to_string());
        Ok(state.saved.clone())
    }

    fn create_record(&self, lang_code: &str, word: &str) -> Result<Vec<WordRecord>, StoreError> {
        self.check_auth()?;
        let mut state = self.state.borrow_mut();
        state
            .creates
            .push((lang_code.to_string(), word.to_string()));
        Ok(state.create_reply.clone())
    }

    fn update_record(
        &self,
        lang_code: &str,
        record_id: &str,
        status: LearningStatus,
    ) -> Result<Vec<WordRecord>, StoreError> {
        self.check_auth()?;
        let mut state = self.state.borrow_mut();
        state
            .updates
            .push((lang_code.to_string(), record_id.to_string(), status));
        Ok(Vec::new())
    }
}
