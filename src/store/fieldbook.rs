//! Fieldbook - the concrete record-store backend profile
//!
//! Records live in a Fieldbook book, one sheet per language code. The three
//! credentials (book id, API key, API secret) come from a [`ConfigSource`],
//! the embedding's key-value config (localStorage in the browser). The auth
//! token only materializes when all three values are present; otherwise the
//! engine rejects before building a request.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use super::datastore::StoreProfile;

pub const BASE_URL: &str = "https://api.fieldbook.com/v1";

pub const CONFIG_BOOK: &str = "lexicore-fieldbook-book";
pub const CONFIG_KEY: &str = "lexicore-fieldbook-key";
pub const CONFIG_SECRET: &str = "lexicore-fieldbook-secret";

/// Key-value configuration the embedding supplies.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// In-process [`ConfigSource`], for tests and for embeddings that pass
/// credentials in directly.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfig {
    values: std::collections::HashMap<String, String>,
}

impl MemoryConfig {
    pub fn new() -> MemoryConfig {
        MemoryConfig::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl ConfigSource for MemoryConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Fieldbook profile over any config source.
pub struct Fieldbook<C: ConfigSource> {
    config: C,
}

impl<C: ConfigSource> Fieldbook<C> {
    pub fn new(config: C) -> Fieldbook<C> {
        Fieldbook { config }
    }
}

impl<C: ConfigSource> StoreProfile for Fieldbook<C> {
    fn base_url(&self) -> &str {
        BASE_URL
    }

    fn url(&self, path: &str) -> String {
        let book = self.config.get(CONFIG_BOOK).unwrap_or_default();
        format!("{}/{}/{}", self.base_url(), book, path)
    }

    fn auth_token(&self) -> Option<String> {
        // The book id is not part of the token but a request without it
        // cannot be addressed, so treat it as a required credential too.
        let _book = self.config.get(CONFIG_BOOK)?;
        let key = self.config.get(CONFIG_KEY)?;
        let secret = self.config.get(CONFIG_SECRET)?;
        Some(BASE64.encode(format!("{key}:{secret}")))
    }
}

// ==================== TESTS ====================
