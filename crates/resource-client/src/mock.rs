//! # Mock Client & Testing Guide
//!
//! [`MockClient`] implements [`ResourceClient`](crate::client::ResourceClient)
//! entirely in memory. Tests queue *expectations* (the next calls the code
//! under test is allowed to make, with their canned responses) and can later
//! [`verify`](MockClient::verify) that all of them were consumed. Every call
//! is also recorded, so tests can assert on exactly what was sent — including
//! the serialized body of a partial update.
//!
//! ## When to use the mock vs a wiremock server
//!
//! | Feature        | MockClient                  | wiremock                 |
//! |----------------|-----------------------------|--------------------------|
//! | Speed          | Instant (in-memory)         | Fast (real HTTP)         |
//! | Asserts on     | Calls + serialized bodies   | Requests on the wire     |
//! | Error injection| Trivial (`return_err`)      | Status codes only        |
//! | Use case       | Logic *around* the client   | The REST client itself   |
//!
//! ## Gated responses
//!
//! An `update` expectation can be **gated**: the mock records the call, then
//! holds the response until the test opens the [`Gate`]. This lets tests pin
//! two commits in flight and resolve them in either order, deterministically:
//!
//! ```ignore
//! let mut mock = MockClient::<Game>::new();
//! let (exp, first) = mock.expect_update("1").gated();
//! exp.return_ok(game_v1);
//! let (exp, second) = mock.expect_update("1").gated();
//! exp.return_ok(game_v2);
//!
//! // ...issue both edits...
//! second.open(); // the newer commit resolves first
//! first.open();  // the older one resolves stale
//! ```

use crate::client::ResourceClient;
use crate::error::ClientError;
use crate::resource::RemoteResource;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// Which operation a recorded call hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Create,
    FetchAll,
    FetchOne,
    Update,
    Delete,
}

/// One call received by the mock, with the body it carried (serialized the
/// same way the REST client would serialize it).
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub op: CallKind,
    pub id: Option<String>,
    pub body: Option<serde_json::Value>,
}

/// Opens a gated response. Dropping the gate without calling [`Gate::open`]
/// releases the response too; the gate exists to control *when*.
pub struct Gate(oneshot::Sender<()>);

impl Gate {
    pub fn open(self) {
        let _ = self.0.send(());
    }
}

enum Expectation<T: RemoteResource> {
    Create {
        response: Result<T, ClientError>,
    },
    FetchAll {
        response: Result<Vec<T>, ClientError>,
    },
    FetchOne {
        id: String,
        response: Result<T, ClientError>,
    },
    Update {
        id: String,
        gate: Option<oneshot::Receiver<()>>,
        response: Result<T, ClientError>,
    },
    Delete {
        id: String,
        response: Result<(), ClientError>,
    },
}

impl<T: RemoteResource> Expectation<T> {
    fn kind(&self) -> CallKind {
        match self {
            Expectation::Create { .. } => CallKind::Create,
            Expectation::FetchAll { .. } => CallKind::FetchAll,
            Expectation::FetchOne { .. } => CallKind::FetchOne,
            Expectation::Update { .. } => CallKind::Update,
            Expectation::Delete { .. } => CallKind::Delete,
        }
    }
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// An expectation-based test double for [`ResourceClient`].
///
/// Cheap to clone; clones share the same expectation queue and call log, so a
/// test can hand one clone to the code under test and keep another for
/// assertions.
pub struct MockClient<T: RemoteResource> {
    expectations: Expectations<T>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl<T: RemoteResource> Clone for MockClient<T> {
    fn clone(&self) -> Self {
        Self {
            expectations: self.expectations.clone(),
            calls: self.calls.clone(),
        }
    }
}

impl<T: RemoteResource> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RemoteResource> MockClient<T> {
    /// Creates a mock with no expectations. Any call panics until one is set.
    pub fn new() -> Self {
        Self {
            expectations: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Expects a `create` call.
    pub fn expect_create(&mut self) -> CreateExpectation<T> {
        CreateExpectation {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `fetch_all` call.
    pub fn expect_fetch_all(&mut self) -> FetchAllExpectation<T> {
        FetchAllExpectation {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `fetch_one` call for `id`.
    pub fn expect_fetch_one(&mut self, id: impl Into<String>) -> FetchOneExpectation<T> {
        FetchOneExpectation {
            id: id.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `update` call for `id`.
    pub fn expect_update(&mut self, id: impl Into<String>) -> UpdateExpectation<T> {
        UpdateExpectation {
            id: id.into(),
            gate: None,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `delete` call for `id`.
    pub fn expect_delete(&mut self, id: impl Into<String>) -> DeleteExpectation<T> {
        DeleteExpectation {
            id: id.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Panics if any expectation was never consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    fn record(&self, op: CallKind, id: Option<&str>, body: Option<serde_json::Value>) {
        self.calls.lock().unwrap().push(RecordedCall {
            op,
            id: id.map(str::to_string),
            body,
        });
    }

    fn next_expectation(&self, op: CallKind) -> Expectation<T> {
        match self.expectations.lock().unwrap().pop_front() {
            Some(expectation) if expectation.kind() == op => expectation,
            Some(expectation) => panic!(
                "Expectation mismatch: got {op:?} call, expected {:?}",
                expectation.kind()
            ),
            None => panic!("Unexpected {op:?} call: no expectations queued"),
        }
    }
}

#[async_trait]
impl<T: RemoteResource> ResourceClient<T> for MockClient<T> {
    async fn create(&self, record: T::Create) -> Result<T, ClientError> {
        let body = serde_json::to_value(&record).ok();
        self.record(CallKind::Create, None, body);
        match self.next_expectation(CallKind::Create) {
            Expectation::Create { response } => response,
            _ => unreachable!(),
        }
    }

    async fn fetch_all(&self) -> Result<Vec<T>, ClientError> {
        self.record(CallKind::FetchAll, None, None);
        match self.next_expectation(CallKind::FetchAll) {
            Expectation::FetchAll { response } => response,
            _ => unreachable!(),
        }
    }

    async fn fetch_one(&self, id: &str) -> Result<T, ClientError> {
        self.record(CallKind::FetchOne, Some(id), None);
        match self.next_expectation(CallKind::FetchOne) {
            Expectation::FetchOne { id: expected, response } => {
                assert_eq!(expected, id, "fetch_one id mismatch");
                response
            }
            _ => unreachable!(),
        }
    }

    async fn update(&self, id: &str, patch: T::Patch) -> Result<T, ClientError> {
        let body = serde_json::to_value(&patch).ok();
        self.record(CallKind::Update, Some(id), body);
        match self.next_expectation(CallKind::Update) {
            Expectation::Update {
                id: expected,
                gate,
                response,
            } => {
                assert_eq!(expected, id, "update id mismatch");
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                response
            }
            _ => unreachable!(),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        self.record(CallKind::Delete, Some(id), None);
        match self.next_expectation(CallKind::Delete) {
            Expectation::Delete { id: expected, response } => {
                assert_eq!(expected, id, "delete id mismatch");
                response
            }
            _ => unreachable!(),
        }
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectation<T: RemoteResource> {
    expectations: Expectations<T>,
}

impl<T: RemoteResource> CreateExpectation<T> {
    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    pub fn return_err(self, err: ClientError) {
        self.push(Err(err));
    }

    fn push(self, response: Result<T, ClientError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Create { response });
    }
}

/// Builder for `fetch_all` expectations.
pub struct FetchAllExpectation<T: RemoteResource> {
    expectations: Expectations<T>,
}

impl<T: RemoteResource> FetchAllExpectation<T> {
    pub fn return_ok(self, values: Vec<T>) {
        self.push(Ok(values));
    }

    pub fn return_err(self, err: ClientError) {
        self.push(Err(err));
    }

    fn push(self, response: Result<Vec<T>, ClientError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::FetchAll { response });
    }
}

/// Builder for `fetch_one` expectations.
pub struct FetchOneExpectation<T: RemoteResource> {
    id: String,
    expectations: Expectations<T>,
}

impl<T: RemoteResource> FetchOneExpectation<T> {
    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    pub fn return_err(self, err: ClientError) {
        self.push(Err(err));
    }

    fn push(self, response: Result<T, ClientError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::FetchOne {
                id: self.id,
                response,
            });
    }
}

/// Builder for `update` expectations.
pub struct UpdateExpectation<T: RemoteResource> {
    id: String,
    gate: Option<oneshot::Receiver<()>>,
    expectations: Expectations<T>,
}

impl<T: RemoteResource> UpdateExpectation<T> {
    /// Holds the response until the returned [`Gate`] is opened. The call is
    /// still recorded immediately.
    pub fn gated(mut self) -> (Self, Gate) {
        let (sender, receiver) = oneshot::channel();
        self.gate = Some(receiver);
        (self, Gate(sender))
    }

    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    pub fn return_err(self, err: ClientError) {
        self.push(Err(err));
    }

    fn push(self, response: Result<T, ClientError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Update {
                id: self.id,
                gate: self.gate,
                response,
            });
    }
}

/// Builder for `delete` expectations.
pub struct DeleteExpectation<T: RemoteResource> {
    id: String,
    expectations: Expectations<T>,
}

impl<T: RemoteResource> DeleteExpectation<T> {
    pub fn return_ok(self) {
        self.push(Ok(()));
    }

    pub fn return_err(self, err: ClientError) {
        self.push(Err(err));
    }

    fn push(self, response: Result<(), ClientError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Delete {
                id: self.id,
                response,
            });
    }
}
