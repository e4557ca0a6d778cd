//! # Mock Framework
//!
//! Utilities for testing session clients in isolation.
//!
//! A [`MockClient`] stands in for a running [`SessionActor`](crate::framework::SessionActor):
//! it answers requests from a queue of scripted expectations instead of real
//! session state. Use the `expect_*` builders to script behavior, hand
//! [`MockClient::client`] to the code under test, then call
//! [`MockClient::verify`] to assert every expectation was consumed.

use crate::framework::{SessionEntity, SessionClient, SessionRequest, FrameworkError};
use tokio::sync::mpsc;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One scripted request/response pair.
///
/// The stored ids are not matched against the incoming request yet; the
/// queue order is the contract.
#[allow(dead_code)]
enum Expectation<T: SessionEntity> {
    Open {
        response: Result<(), FrameworkError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Amend {
        id: T::Id,
        response: Result<T::AmendResult, FrameworkError>,
    },
    Submit {
        id: T::Id,
        response: Result<T::SubmitResult, FrameworkError>,
    },
    Close {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
}

/// A mock session client with expectation tracking.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<DraftSession>::new();
/// mock.expect_open().return_ok();
/// mock.expect_get("T1".to_string()).return_ok(Some(session));
///
/// let client = DraftClient::new(mock.client());
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: SessionEntity> {
    client: SessionClient<T>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: SessionEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<SessionRequest<T>>(100);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Background task answers each request from the expectation queue.
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (SessionRequest::Open { respond_to, .. }, Some(Expectation::Open { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (SessionRequest::Get { respond_to, .. }, Some(Expectation::Get { response, .. })) => {
                        let _ = respond_to.send(response);
                    }
                    (SessionRequest::Amend { respond_to, .. }, Some(Expectation::Amend { response, .. })) => {
                        let _ = respond_to.send(response);
                    }
                    (SessionRequest::Submit { respond_to, .. }, Some(Expectation::Submit { response, .. })) => {
                        let _ = respond_to.send(response);
                    }
                    (SessionRequest::Close { respond_to, .. }, Some(Expectation::Close { response, .. })) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: SessionClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> SessionClient<T> {
        self.client.clone()
    }

    /// Expects an `open` operation.
    pub fn expect_open(&mut self) -> OpenExpectationBuilder<T> {
        OpenExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `amend` operation.
    pub fn expect_amend(&mut self, id: T::Id) -> AmendExpectationBuilder<T> {
        AmendExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `submit` operation.
    pub fn expect_submit(&mut self, id: T::Id) -> SubmitExpectationBuilder<T> {
        SubmitExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `close` operation.
    pub fn expect_close(&mut self, id: T::Id) -> CloseExpectationBuilder<T> {
        CloseExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

impl<T: SessionEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `open` expectations.
pub struct OpenExpectationBuilder<T: SessionEntity> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: SessionEntity> OpenExpectationBuilder<T> {
    pub fn return_ok(self) {
        self.expectations.lock().unwrap().push_back(Expectation::Open { response: Ok(()) });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations.lock().unwrap().push_back(Expectation::Open { response: Err(error) });
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: SessionEntity> {
    id: T::Id,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: SessionEntity> GetExpectationBuilder<T> {
    pub fn return_ok(self, value: Option<T>) {
        self.expectations.lock().unwrap().push_back(Expectation::Get {
            id: self.id,
            response: Ok(value),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations.lock().unwrap().push_back(Expectation::Get {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `amend` expectations.
pub struct AmendExpectationBuilder<T: SessionEntity> {
    id: T::Id,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: SessionEntity> AmendExpectationBuilder<T> {
    pub fn return_ok(self, result: T::AmendResult) {
        self.expectations.lock().unwrap().push_back(Expectation::Amend {
            id: self.id,
            response: Ok(result),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations.lock().unwrap().push_back(Expectation::Amend {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `submit` expectations.
pub struct SubmitExpectationBuilder<T: SessionEntity> {
    id: T::Id,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: SessionEntity> SubmitExpectationBuilder<T> {
    pub fn return_ok(self, result: T::SubmitResult) {
        self.expectations.lock().unwrap().push_back(Expectation::Submit {
            id: self.id,
            response: Ok(result),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations.lock().unwrap().push_back(Expectation::Submit {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `close` expectations.
pub struct CloseExpectationBuilder<T: SessionEntity> {
    id: T::Id,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: SessionEntity> CloseExpectationBuilder<T> {
    pub fn return_ok(self) {
        self.expectations.lock().unwrap().push_back(Expectation::Close {
            id: self.id,
            response: Ok(()),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations.lock().unwrap().push_back(Expectation::Close {
            id: self.id,
            response: Err(error),
        });
    }
}
