//! DataStore - the record-store client engine
//!
//! The original design had an abstract base that threw unless subclassed
//! with the required methods present. Here that contract is compile-time:
//! [`StoreProfile`] is the capability interface a concrete backend must
//! implement (auth token + URL scheme), and [`DataStore`] is the one engine
//! that drives any profile over an injected [`Transport`].
//!
//! Error policy: a missing auth token fails fast, before any request is
//! built. Transport failures, non-2xx responses, and malformed bodies are
//! logged and softened to an empty record list so a backend outage degrades
//! to "nothing saved yet" instead of breaking the page.

use thiserror::Error;

use crate::annotate::word::LearningStatus;
use crate::console::console_error;

use super::record::{parse_records, WordRecord};
use super::transport::{HttpRequest, Method, Transport};

/// Configuration error surfaced before any network traffic.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("missing auth token; record store credentials are not configured")]
    MissingAuthToken,
}

/// What a concrete record-store backend must provide.
pub trait StoreProfile {
    fn base_url(&self) -> &str;

    /// Basic-auth token, or `None` when credentials are not configured.
    fn auth_token(&self) -> Option<String>;

    /// Resource URL for a path segment (usually a language code).
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url(), path)
    }
}

/// Object-safe store interface the page consumes.
pub trait RecordStore {
    /// Fetch every saved record for a language.
    fn get_records(&self, lang_code: &str) -> Result<Vec<WordRecord>, StoreError>;

    /// Create a known-word record; returns the created record(s).
    fn create_record(&self, lang_code: &str, word: &str) -> Result<Vec<WordRecord>, StoreError>;

    /// Update the status of an existing record by id.
    fn update_record(
        &self,
        lang_code: &str,
        record_id: &str,
        status: LearningStatus,
    ) -> Result<Vec<WordRecord>, StoreError>;
}

/// Record-store engine over a profile and a transport.
pub struct DataStore<P: StoreProfile> {
    profile: P,
    transport: Box<dyn Transport>,
}

impl<P: StoreProfile> DataStore<P> {
    pub fn new(profile: P, transport: Box<dyn Transport>) -> DataStore<P> {
        DataStore { profile, transport }
    }

    pub fn profile(&self) -> &P {
        &self.profile
    }

    fn request(
        &self,
        method: Method,
        url: String,
        body: Option<String>,
    ) -> Result<Vec<WordRecord>, StoreError> {
        let token = self.profile.auth_token().ok_or(StoreError::MissingAuthToken)?;

        let mut headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("Authorization".to_string(), format!("Basic {token}")),
        ];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        let request = HttpRequest {
            method,
            url,
            headers,
            body,
        };

        match self.transport.send(&request) {
            Ok(response) if response.is_success() => Ok(parse_records(&response.body)),
            Ok(response) => {
                console_error!(
                    "[lexicore] {} {} returned status {}",
                    request.method.as_str(),
                    request.url,
                    response.status
                );
                Ok(Vec::new())
            }
            Err(err) => {
                console_error!("[lexicore] {err}");
                Ok(Vec::new())
            }
        }
    }
}

impl<P: StoreProfile> RecordStore for DataStore<P> {
    fn get_records(&self, lang_code: &str) -> Result<Vec<WordRecord>, StoreError> {
        self.request(Method::Get, self.profile.url(lang_code), None)
    }

    fn create_record(&self, lang_code: &str, word: &str) -> Result<Vec<WordRecord>, StoreError> {
        let body = serde_json::json!({
            "word": word,
            "how_well_known": LearningStatus::Known.as_class(),
        });
        self.request(
            Method::Post,
            self.profile.url(lang_code),
            Some(body.to_string()),
        )
    }

    fn update_record(
        &self,
        lang_code: &str,
        record_id: &str,
        status: LearningStatus,
    ) -> Result<Vec<WordRecord>, StoreError> {
        let body = serde_json::json!({ "how_well_known": status.as_class() });
        let url = format!("{}/{}", self.profile.url(lang_code), record_id);
        self.request(Method::Patch, url, Some(body.to_string()))
    }
}

// ==================== TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::transport::{HttpResponse, TransportError};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct TestProfile {
        token: Option<String>,
    }

    impl StoreProfile for TestProfile {
        fn base_url(&self) -> &str {
            "https://records.test/v1"
        }

        fn auth_token(&self) -> Option<String> {
            self.token.clone()
        }
    }

    /// Records every request and replays canned outcomes in order.
    /// Clones share state, so a test can keep one handle and box the other.
    #[derive(Clone, Default)]
    struct MockTransport {
        state: Rc<RefCell<MockState>>,
    }

    #[derive(Default)]
    struct MockState {
        requests: Vec<HttpRequest>,
        outcomes: Vec<Result<HttpResponse, TransportError>>,
    }

    impl MockTransport {
        fn replying(outcomes: Vec<Result<HttpResponse, TransportError>>) -> MockTransport {
            let mock = MockTransport::default();
            mock.state.borrow_mut().outcomes = outcomes;
            mock
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.state.borrow().requests.clone()
        }
    }

    impl Transport for MockTransport {
        fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            let mut state = self.state.borrow_mut();
            state.requests.push(request.clone());
            if state.outcomes.is_empty() {
                return Ok(HttpResponse::ok("[]"));
            }
            state.outcomes.remove(0)
        }
    }

    fn store(token: Option<&str>, transport: &MockTransport) -> DataStore<TestProfile> {
        let profile = TestProfile {
            token: token.map(String::from),
        };
        DataStore::new(profile, Box::new(transport.clone()))
    }

    #[test]
    fn test_missing_token_short_circuits() {
        let transport = MockTransport::replying(vec![]);
        let engine = store(None, &transport);

        let result = engine.get_records("es");

        assert_eq!(result, Err(StoreError::MissingAuthToken));
        assert!(transport.requests().is_empty(), "no request issued");
    }

    #[test]
    fn test_get_records_request_shape() {
        let transport = MockTransport::replying(vec![Ok(HttpResponse::ok(
            r#"[{"id":"r1","word":"es","how_well_known":"known"}]"#,
        ))]);
        let engine = store(Some("dG9rZW4="), &transport);

        let records = engine.get_records("es").expect("configured");

        assert_eq!(records.len(), 1);
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].url, "https://records.test/v1/es");
        assert_eq!(requests[0].header("Authorization"), Some("Basic dG9rZW4="));
        assert_eq!(requests[0].header("Accept"), Some("application/json"));
        assert_eq!(requests[0].body, None);
    }

    #[test]
    fn test_create_record_posts_known_body() {
        let transport = MockTransport::replying(vec![]);
        let engine = store(Some("t"), &transport);

        engine.create_record("es", "palabra").expect("configured");

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].url, "https://records.test/v1/es");
        assert_eq!(requests[0].header("Content-Type"), Some("application/json"));
        let body: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().expect("has body")).expect("json");
        assert_eq!(body["word"], "palabra");
        assert_eq!(body["how_well_known"], "known");
    }

    #[test]
    fn test_update_record_patches_by_id() {
        let transport = MockTransport::replying(vec![]);
        let engine = store(Some("t"), &transport);

        engine
            .update_record("es", "r42", LearningStatus::Known)
            .expect("configured");

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Patch);
        assert_eq!(requests[0].url, "https://records.test/v1/es/r42");
    }

    #[test]
    fn test_transport_failure_softens_to_empty() {
        let transport = MockTransport::replying(vec![Err(TransportError {
            url: "https://records.test/v1/es".into(),
            reason: "connection refused".into(),
        })]);
        let engine = store(Some("t"), &transport);

        assert_eq!(engine.get_records("es"), Ok(Vec::new()));
    }

    #[test]
    fn test_non_2xx_softens_to_empty() {
        let transport = MockTransport::replying(vec![Ok(HttpResponse {
            status: 503,
            body: "unavailable".into(),
        })]);
        let engine = store(Some("t"), &transport);

        assert_eq!(engine.get_records("es"), Ok(Vec::new()));
    }

    #[test]
    fn test_malformed_body_softens_to_empty() {
        let transport = MockTransport::replying(vec![Ok(HttpResponse::ok("not json"))]);
        let engine = store(Some("t"), &transport);

        assert_eq!(engine.get_records("es"), Ok(Vec::new()));
    }
}
