//! WASM bindings - the JS-facing annotation facade
//!
//! Content trees, saved records, and statistics all cross the boundary as
//! serde values; network access stays on the JS side (fetch the records,
//! then feed them to `applySavedRecords`). Native embedders skip this module
//! and drive `Page`/`DataStore` directly.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use std::cell::RefCell;
use std::rc::Rc;

use crate::annotate::language;
use crate::annotate::node::{Node, NodeSpec};
use crate::annotate::page::Page;
use crate::annotate::registry::WordRegistry;
use crate::annotate::stats::Statistics;
use crate::store::record::WordRecord;

/// Result of an annotation pass: the rewritten tree plus current counts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateResult {
    pub tree: NodeSpec,
    pub stats: Statistics,
    pub lang_code: String,
}

/// Identify the language of raw text ("es", "fr", or "??").
#[wasm_bindgen(js_name = identifyLanguage)]
pub fn identify_language(text: &str) -> String {
    language::identify(text).to_string()
}

/// PageAnnotator - stateful annotation facade over one page at a time
///
/// Owns the process-wide word registry, so repeated `annotate` calls share
/// word identity (and learning status) across scans until `reset`.
#[wasm_bindgen]
pub struct PageAnnotator {
    registry: Rc<RefCell<WordRegistry>>,
    page: Option<Page>,
}

impl Default for PageAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl PageAnnotator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PageAnnotator {
        PageAnnotator {
            registry: Rc::new(RefCell::new(WordRegistry::new())),
            page: None,
        }
    }

    /// Annotate a serialized content tree.
    ///
    /// # Arguments
    /// * `document` - Node tree (`{tag?, text?, classes?, children?}`)
    /// * `lang_code` - Optional language code; detected from the tree's text
    ///   when omitted. An unidentified language leaves the tree untouched.
    #[wasm_bindgen]
    pub fn annotate(
        &mut self,
        document: JsValue,
        lang_code: Option<String>,
    ) -> Result<JsValue, JsValue> {
        let spec: NodeSpec = serde_wasm_bindgen::from_value(document)
            .map_err(|e| JsValue::from_str(&format!("Invalid document tree: {e}")))?;
        let root = Node::from_spec(&spec);

        let lang = lang_code
            .unwrap_or_else(|| language::identify(&root.inner_text()).to_string());

        let mut page = Page::new(&lang, Some(root), self.registry.clone());
        page.scan();
        self.page = Some(page);

        self.result()
    }

    /// Fold saved `{id, word, how_well_known}` records into the current
    /// page; still-unverified words are demoted to unknown afterwards.
    #[wasm_bindgen(js_name = applySavedRecords)]
    pub fn apply_saved_records(&mut self, records: JsValue) -> Result<JsValue, JsValue> {
        let records: Vec<WordRecord> = serde_wasm_bindgen::from_value(records)
            .map_err(|e| JsValue::from_str(&format!("Invalid records: {e}")))?;

        let page = self
            .page
            .as_mut()
            .ok_or_else(|| JsValue::from_str("No annotated page"))?;
        page.apply_saved_records(&records);

        self.result()
    }

    /// Mark a word (raw or normalized text) as known.
    #[wasm_bindgen(js_name = markKnown)]
    pub fn mark_known(&mut self, word: &str) -> Result<JsValue, JsValue> {
        let page = self
            .page
            .as_mut()
            .ok_or_else(|| JsValue::from_str("No annotated page"))?;

        if let Some(handle) = page.word(word) {
            page.mark_as_known(&handle)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
        }

        self.result()
    }

    /// Current page statistics.
    #[wasm_bindgen]
    pub fn stats(&self) -> Result<JsValue, JsValue> {
        let stats = self.page.as_ref().map(Page::stats).unwrap_or_default();
        serde_wasm_bindgen::to_value(&stats)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Drop the current page and clear the word registry.
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        if let Some(page) = self.page.as_mut() {
            page.destroy();
        }
        self.page = None;
        self.registry.borrow_mut().reset();
    }

    fn result(&self) -> Result<JsValue, JsValue> {
        let page = self
            .page
            .as_ref()
            .ok_or_else(|| JsValue::from_str("No annotated page"))?;
        let tree = page
            .root()
            .map(Node::to_spec)
            .unwrap_or_default();

        let result = AnnotateResult {
            tree,
            stats: page.stats(),
            lang_code: page.lang_code().to_string(),
        };
        serde_wasm_bindgen::to_value(&result)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }
}

// ==================== TESTS ====================


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn annotates_a_simple_paragraph() {
        let mut annotator = PageAnnotator::new();
        let tree = NodeSpec::element("p", vec![NodeSpec::text("mañana dos")]);
        let document = serde_wasm_bindgen::to_value(&tree).expect("serializes");

        let result = annotator
            .annotate(document, None)
            .expect("annotates");
        assert!(!result.is_null());
    }
}
