//! # Mock Collections
//!
//! Test doubles for the document store.
//!
//! [`MockCollection`] hands out a real [`CollectionClient`] whose requests
//! are answered from a queue of scripted expectations instead of a live
//! [`Collection`](super::Collection) task. Tests use it to simulate hosted
//! storage succeeding or failing deterministically — e.g. the order write
//! failing after a captured payment, or the favorite-flag update being
//! rejected.
//!
//! ```ignore
//! let mut mock = MockCollection::<Dish>::new();
//! mock.expect_create().return_ok("dish_1".to_string());
//! let client = DishClient::new(mock.client());
//! // drive the code under test...
//! mock.verify();
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use super::core::{CollectionClient, Record, StoreError, StoreRequest};

/// A scripted response for one expected request.
enum Expectation<T: Record> {
    Get {
        response: Result<Option<T>, StoreError>,
    },
    Create {
        response: Result<T::Id, StoreError>,
    },
    List {
        response: Result<Vec<T>, StoreError>,
    },
    Update {
        response: Result<T, StoreError>,
    },
    Delete {
        response: Result<(), StoreError>,
    },
    Action {
        response: Result<T::ActionResult, StoreError>,
    },
}

impl<T: Record> Expectation<T> {
    fn kind(&self) -> &'static str {
        match self {
            Expectation::Get { .. } => "Get",
            Expectation::Create { .. } => "Create",
            Expectation::List { .. } => "List",
            Expectation::Update { .. } => "Update",
            Expectation::Delete { .. } => "Delete",
            Expectation::Action { .. } => "Action",
        }
    }
}

/// A mock collection with expectation tracking.
///
/// Expectations are consumed in FIFO order; a request that does not match
/// the next expectation panics the responder task, which surfaces in the
/// test as a channel error.
pub struct MockCollection<T: Record> {
    client: CollectionClient<T>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Record> MockCollection<T>
where
    T::Id: Send,
    T::CreateParams: Send,
    T::UpdateParams: Send,
    T::Action: Send,
    T::ActionResult: Send,
{
    /// Creates a mock with no expectations queued.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = {
                    let mut exps = expectations_clone
                        .lock()
                        .unwrap_or_else(|poisoned| poisoned.into_inner());
                    exps.pop_front()
                };

                match (request, expectation) {
                    (StoreRequest::Get { respond_to, .. }, Some(Expectation::Get { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::List { respond_to, .. },
                        Some(Expectation::List { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Update { respond_to, .. },
                        Some(Expectation::Update { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Delete { respond_to, .. },
                        Some(Expectation::Delete { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Action { respond_to, .. },
                        Some(Expectation::Action { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (request, expectation) => {
                        let got = match request {
                            StoreRequest::Get { .. } => "Get",
                            StoreRequest::Create { .. } => "Create",
                            StoreRequest::List { .. } => "List",
                            StoreRequest::Update { .. } => "Update",
                            StoreRequest::Delete { .. } => "Delete",
                            StoreRequest::Action { .. } => "Action",
                        };
                        panic!(
                            "mock collection: got {} but expected {}",
                            got,
                            expectation.map(|e| e.kind()).unwrap_or("nothing"),
                        );
                    }
                }
            }
        });

        Self {
            client: CollectionClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client wired to this mock.
    pub fn client(&self) -> CollectionClient<T> {
        self.client.clone()
    }

    fn push(&self, expectation: Expectation<T>) {
        self.expectations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(expectation);
    }

    /// Expects a `get` request.
    pub fn expect_get(&mut self) -> ResponseBuilder<'_, T, Option<T>> {
        ResponseBuilder {
            mock: self,
            wrap: |response| Expectation::Get { response },
        }
    }

    /// Expects a `create` request.
    pub fn expect_create(&mut self) -> ResponseBuilder<'_, T, T::Id> {
        ResponseBuilder {
            mock: self,
            wrap: |response| Expectation::Create { response },
        }
    }

    /// Expects a `list` request.
    pub fn expect_list(&mut self) -> ResponseBuilder<'_, T, Vec<T>> {
        ResponseBuilder {
            mock: self,
            wrap: |response| Expectation::List { response },
        }
    }

    /// Expects an `update` request.
    pub fn expect_update(&mut self) -> ResponseBuilder<'_, T, T> {
        ResponseBuilder {
            mock: self,
            wrap: |response| Expectation::Update { response },
        }
    }

    /// Expects a `delete` request.
    pub fn expect_delete(&mut self) -> ResponseBuilder<'_, T, ()> {
        ResponseBuilder {
            mock: self,
            wrap: |response| Expectation::Delete { response },
        }
    }

    /// Expects an `action` request.
    pub fn expect_action(&mut self) -> ResponseBuilder<'_, T, T::ActionResult> {
        ResponseBuilder {
            mock: self,
            wrap: |response| Expectation::Action { response },
        }
    }

    /// Panics if any queued expectation was never consumed.
    pub fn verify(&self) {
        let exps = self
            .expectations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

impl<T: Record> Default for MockCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal step of an expectation: pick `return_ok` or `return_err`.
pub struct ResponseBuilder<'a, T: Record, R> {
    mock: &'a MockCollection<T>,
    wrap: fn(Result<R, StoreError>) -> Expectation<T>,
}

impl<'a, T: Record, R> ResponseBuilder<'a, T, R> {
    pub fn return_ok(self, value: R) {
        self.mock.push((self.wrap)(Ok(value)));
    }

    pub fn return_err(self, error: StoreError) {
        self.mock.push((self.wrap)(Err(error)));
    }
}
