//! LexiCore: Word Annotation + Learning Status Engine
//!
//! A Rust/WASM implementation of a per-word language-learning annotator:
//! it walks a rendered content tree, splits text into word and separator
//! fragments, deduplicates repeated words into shared entities with one
//! occurrence per rendered site, and keeps every occurrence's classes in
//! sync with the word's learning status as it changes.
//!
//! # Architecture
//!
//! ## Annotation engine (`annotate/`)
//! - `patterns.rs` - Shared regexes, normalization, marker classes
//! - `tokenizer.rs` - Lossless capturing split into word/separator fragments
//! - `node.rs` - Minimal render-target tree + serde boundary form
//! - `word.rs` - Word entity: status, occurrences, click bindings, class sync
//! - `registry.rs` - Explicit word pool mapping normalized text to one entity
//! - `page.rs` - Per-document scanner, counts, mark-known, reconciliation
//! - `stats.rs` - Count aggregate with percentage derivations
//! - `language.rs` - Pattern-match language identification
//!
//! ## Record store boundary (`store/`)
//! - `record.rs` - `{id, word, how_well_known}` wire records
//! - `transport.rs` - Injected HTTP seam (request/response values)
//! - `datastore.rs` - Store engine over a `StoreProfile` capability trait
//! - `fieldbook.rs` - Fieldbook backend profile + config source
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { PageAnnotator } from 'lexicore';
//!
//! await init();
//! const annotator = new PageAnnotator();
//!
//! // Annotate a serialized content tree; language is detected when omitted.
//! const result = annotator.annotate(tree, null);
//! console.log(result.stats);     // { totalWordCount, uniqueWordCount, ... }
//! console.log(result.langCode);  // "es"
//!
//! // Fold in saved records fetched by the host, then re-render.
//! const updated = annotator.applySavedRecords(records);
//!
//! // User clicked a word span.
//! annotator.markKnown("palabra");
//! ```

pub mod annotate;
pub mod store;

pub(crate) mod console;
pub mod wasm;

pub use annotate::*;
pub use store::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("lexicore v{}", env!("CARGO_PKG_VERSION"))
}
