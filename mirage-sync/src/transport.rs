//! Transport layer abstraction.
//!
//! Defines the request interface the store façades consume. A transport
//! owns the HTTP specifics (verbs, base URL, authentication); the core
//! hands it paths and bodies and receives parsed documents back.

use async_trait::async_trait;
use mirage_model::{Document, WriteRequest};
use serde_json::Value;
use thiserror::Error;

/// A transport failure, opaque to the core: status codes and payloads are
/// carried through to the consumer but never interpreted here.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("http status {status}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// Response body, when it could be captured as JSON.
        body: Option<Value>,
    },

    /// The response body could not be decoded as a document.
    #[error("decode error: {0}")]
    Decode(String),
}

/// The request interface consumed by the store façades.
///
/// Paths follow the collection/member/nested convention (`widgets`,
/// `widgets/1`, `users/42/purchased-widgets`) with the query string already
/// attached; pagination cursors are passed back verbatim.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches a document.
    async fn get(&self, path: &str) -> Result<Document, TransportError>;

    /// Creates a resource.
    async fn post(&self, path: &str, body: &WriteRequest) -> Result<Document, TransportError>;

    /// Updates a resource.
    async fn patch(&self, path: &str, body: &WriteRequest) -> Result<Document, TransportError>;

    /// Deletes a resource.
    async fn delete(&self, path: &str) -> Result<(), TransportError>;
}

/// A mock transport for testing.
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// A request the mock transport received.
    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedRequest {
        /// HTTP verb.
        pub method: &'static str,
        /// Path as handed to the transport, query string included.
        pub path: String,
        /// Serialized body for writes.
        pub body: Option<Value>,
    }

    /// Queue-backed transport: responses are served in FIFO order across
    /// all verbs, and every request is recorded for assertions.
    #[derive(Debug, Default)]
    pub struct MockTransport {
        responses: Mutex<VecDeque<Result<Document, TransportError>>>,
        requests: Mutex<Vec<RecordedRequest>>,
    }

    impl MockTransport {
        /// Creates a mock with an empty response queue.
        pub fn new() -> Self {
            Self::default()
        }

        /// Queues a successful document response.
        pub fn queue_document(&self, document: Document) {
            self.responses.lock().unwrap().push_back(Ok(document));
        }

        /// Queues a failure.
        pub fn queue_error(&self, error: TransportError) {
            self.responses.lock().unwrap().push_back(Err(error));
        }

        /// All requests received so far, in order.
        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }

        fn record(&self, method: &'static str, path: &str, body: Option<Value>) {
            self.requests.lock().unwrap().push(RecordedRequest {
                method,
                path: path.to_string(),
                body,
            });
        }

        fn next_response(&self) -> Result<Document, TransportError> {
            self.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
                Err(TransportError::Network("no mock response queued".to_string()))
            })
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn get(&self, path: &str) -> Result<Document, TransportError> {
            self.record("GET", path, None);
            self.next_response()
        }

        async fn post(&self, path: &str, body: &WriteRequest) -> Result<Document, TransportError> {
            self.record("POST", path, serde_json::to_value(body).ok());
            self.next_response()
        }

        async fn patch(&self, path: &str, body: &WriteRequest) -> Result<Document, TransportError> {
            self.record("PATCH", path, serde_json::to_value(body).ok());
            self.next_response()
        }

        async fn delete(&self, path: &str) -> Result<(), TransportError> {
            self.record("DELETE", path, None);
            self.next_response().map(|_| ())
        }
    }
}
