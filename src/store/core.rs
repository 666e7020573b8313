//! # Document Store Core
//!
//! Generic building blocks for the hosted-storage stand-in.
//!
//! The real product keeps its `dishes` and `orders` collections in a hosted
//! document database. This module reproduces the slice of that service the
//! storefront consumes: generated ids, get/list, partial update, idempotent
//! delete, and record-specific actions. Each [`Collection`] runs in its own
//! Tokio task and processes requests sequentially, so collection state needs
//! no locks; callers reach it through a cloneable [`CollectionClient`].
//!
//! ## Key Types
//!
//! - [`Record`]: the trait a document type implements to live in a collection.
//! - [`Collection`]: the actor owning one collection's records.
//! - [`CollectionClient`]: the message-passing handle used by the rest of the
//!   crate.
//! - [`StoreError`]: transport and boundary-validation errors.

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Contract a document type satisfies to be managed by a [`Collection`].
///
/// Associated types keep every operation payload tied to its record type: a
/// `Dish` collection only accepts `DishCreate`/`DishUpdate` payloads, and the
/// compiler rejects anything else.
///
/// Validation belongs in [`Record::from_create_params`] and
/// [`Record::on_update`] — malformed records are rejected at the storage
/// boundary instead of propagating inward.
#[async_trait]
pub trait Record: Clone + Send + Sync + 'static {
    /// Unique identifier, assigned by the collection on create.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Payload required to create a new record.
    type CreateParams: Send + Sync + Debug;

    /// Payload for a partial update of an existing record.
    type UpdateParams: Send + Sync + Debug;

    /// Record-specific operations outside the CRUD set.
    type Action: Send + Sync + Debug;

    /// Result type returned by [`Record::handle_action`].
    type ActionResult: Send + Sync + Debug;

    /// Builds the full record from its assigned id and the create payload.
    ///
    /// Returning `Err` rejects the write; nothing is stored.
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, String>;

    /// Called once when the store stamps the record at write time.
    ///
    /// The default keeps records that carry no timestamp untouched.
    fn on_persist(&mut self, _created_at_ms: u64) {}

    /// Applies a partial update. Returning `Err` leaves the record unmodified.
    async fn on_update(&mut self, update: Self::UpdateParams) -> Result<(), String>;

    /// Handles a record-specific action.
    async fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, String>;
}

/// Errors produced by the store transport and its boundary validation.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum StoreError {
    #[error("Collection closed")]
    Closed,
    #[error("Collection dropped response channel")]
    Dropped,
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Rejected: {0}")]
    Rejected(String),
}

/// One-shot response channel carried inside every [`StoreRequest`].
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Ordering applied by [`CollectionClient::list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    /// Oldest record first (write order).
    Insertion,
    /// Most recently written record first.
    NewestFirst,
}

/// Request message sent to a [`Collection`].
///
/// The variants map to the hosted document API the storefront consumes:
/// create-with-generated-id, get, list-with-ordering, partial update, delete,
/// plus an `Action` escape hatch for record-specific operations (e.g. the
/// persisted favorite flag on a dish).
#[derive(Debug)]
pub enum StoreRequest<T: Record> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        order: ListOrder,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::UpdateParams,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

/// A stored record plus the write-order sequence number used for listing.
struct Entry<T> {
    seq: u64,
    record: T,
}

/// The actor owning one collection of records.
///
/// Requests are processed strictly in arrival order inside a single task, so
/// two mutations are never interleaved — the same guarantee the storefront
/// relies on from the hosted service.
pub struct Collection<T: Record> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    entries: HashMap<T::Id, Entry<T>>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
    next_seq: u64,
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

impl<T: Record> Collection<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, CollectionClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let collection = Self {
            receiver,
            entries: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
            next_seq: 0,
        };
        let client = CollectionClient::new(sender);
        (collection, client)
    }

    /// Runs the collection's event loop until every client is dropped.
    pub async fn run(mut self) {
        let record_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(record_type, "Collection started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Create { params, respond_to } => {
                    debug!(record_type, ?params, "Create");
                    let id = (self.next_id_fn)();

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut record) => {
                            record.on_persist(now_ms());
                            self.next_seq += 1;
                            self.entries.insert(
                                id.clone(),
                                Entry {
                                    seq: self.next_seq,
                                    record,
                                },
                            );
                            info!(record_type, %id, size = self.entries.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(record_type, error = %e, "Create rejected");
                            let _ = respond_to.send(Err(StoreError::Rejected(e)));
                        }
                    }
                }
                StoreRequest::Get { id, respond_to } => {
                    let record = self.entries.get(&id).map(|e| e.record.clone());
                    let found = record.is_some();
                    debug!(record_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(record));
                }
                StoreRequest::List { order, respond_to } => {
                    let mut entries: Vec<(u64, T)> = self
                        .entries
                        .values()
                        .map(|e| (e.seq, e.record.clone()))
                        .collect();
                    entries.sort_by_key(|(seq, _)| *seq);
                    if order == ListOrder::NewestFirst {
                        entries.reverse();
                    }
                    debug!(record_type, ?order, count = entries.len(), "List");
                    let records = entries.into_iter().map(|(_, r)| r).collect();
                    let _ = respond_to.send(Ok(records));
                }
                StoreRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(record_type, %id, ?update, "Update");
                    if let Some(entry) = self.entries.get_mut(&id) {
                        if let Err(e) = entry.record.on_update(update).await {
                            warn!(record_type, %id, error = %e, "Update rejected");
                            let _ = respond_to.send(Err(StoreError::Rejected(e)));
                            continue;
                        }
                        info!(record_type, %id, "Updated");
                        let _ = respond_to.send(Ok(entry.record.clone()));
                    } else {
                        warn!(record_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
                StoreRequest::Delete { id, respond_to } => {
                    // Deleting an absent record reports success: the end state
                    // is the same either way.
                    let removed = self.entries.remove(&id).is_some();
                    if removed {
                        info!(record_type, %id, size = self.entries.len(), "Deleted");
                    } else {
                        debug!(record_type, %id, "Delete of absent record");
                    }
                    let _ = respond_to.send(Ok(()));
                }
                StoreRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(record_type, %id, ?action, "Action");
                    if let Some(entry) = self.entries.get_mut(&id) {
                        let result = entry
                            .record
                            .handle_action(action)
                            .await
                            .map_err(StoreError::Rejected);
                        match &result {
                            Ok(_) => info!(record_type, %id, "Action ok"),
                            Err(e) => warn!(record_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(record_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(record_type, size = self.entries.len(), "Shutdown");
    }
}

/// A type-safe, cloneable handle to a [`Collection`].
#[derive(Clone)]
pub struct CollectionClient<T: Record> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: Record> CollectionClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T::Id, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Create { params, respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Get { id, respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    pub async fn list(&self, order: ListOrder) -> Result<Vec<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::List { order, respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    pub async fn update(&self, id: T::Id, update: T::UpdateParams) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Update {
                id,
                update,
                respond_to,
            })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Delete { id, respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Action {
                id,
                action,
                respond_to,
            })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    // --- Minimal record for exercising the engine ---

    #[derive(Clone, Debug, PartialEq)]
    struct DailySpecial {
        id: String,
        title: String,
        discount_pct: u8,
        announced: bool,
        created_at_ms: u64,
    }

    #[derive(Debug)]
    struct SpecialCreate {
        title: String,
        discount_pct: u8,
    }

    #[derive(Debug)]
    struct SpecialUpdate {
        title: Option<String>,
    }

    #[derive(Debug)]
    enum SpecialAction {
        Announce,
    }

    #[async_trait]
    impl Record for DailySpecial {
        type Id = String;
        type CreateParams = SpecialCreate;
        type UpdateParams = SpecialUpdate;
        type Action = SpecialAction;
        type ActionResult = bool;

        fn from_create_params(id: String, params: SpecialCreate) -> Result<Self, String> {
            if params.title.is_empty() {
                return Err("title is required".to_string());
            }
            Ok(Self {
                id,
                title: params.title,
                discount_pct: params.discount_pct,
                announced: false,
                created_at_ms: 0,
            })
        }

        fn on_persist(&mut self, created_at_ms: u64) {
            self.created_at_ms = created_at_ms;
        }

        async fn on_update(&mut self, update: SpecialUpdate) -> Result<(), String> {
            if let Some(title) = update.title {
                self.title = title;
            }
            Ok(())
        }

        async fn handle_action(&mut self, action: SpecialAction) -> Result<bool, String> {
            match action {
                SpecialAction::Announce => {
                    if self.announced {
                        Ok(false)
                    } else {
                        self.announced = true;
                        Ok(true)
                    }
                }
            }
        }
    }

    fn spawn_specials() -> CollectionClient<DailySpecial> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || {
            let id = counter.fetch_add(1, Ordering::SeqCst);
            format!("special_{}", id)
        };
        let (collection, client) = Collection::new(16, next_id);
        tokio::spawn(collection.run());
        client
    }

    #[tokio::test]
    async fn create_get_update_action_roundtrip() {
        let client = spawn_specials();

        let id = client
            .create(SpecialCreate {
                title: "Taco Tuesday".into(),
                discount_pct: 20,
            })
            .await
            .unwrap();

        let special = client.get(id.clone()).await.unwrap().unwrap();
        assert_eq!(special.title, "Taco Tuesday");
        assert!(special.created_at_ms > 0, "store must stamp the record");

        let changed = client
            .perform_action(id.clone(), SpecialAction::Announce)
            .await
            .unwrap();
        assert!(changed);
        let changed_again = client
            .perform_action(id.clone(), SpecialAction::Announce)
            .await
            .unwrap();
        assert!(!changed_again);

        let updated = client
            .update(
                id.clone(),
                SpecialUpdate {
                    title: Some("Taco Wednesday".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Taco Wednesday");
    }

    #[tokio::test]
    async fn create_rejects_invalid_payload() {
        let client = spawn_specials();
        let result = client
            .create(SpecialCreate {
                title: String::new(),
                discount_pct: 10,
            })
            .await;
        assert_eq!(
            result,
            Err(StoreError::Rejected("title is required".to_string()))
        );
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let client = spawn_specials();
        let id = client
            .create(SpecialCreate {
                title: "Soup Day".into(),
                discount_pct: 5,
            })
            .await
            .unwrap();

        client.delete(id.clone()).await.unwrap();
        assert!(client.get(id.clone()).await.unwrap().is_none());

        // Second delete of the same id still succeeds.
        client.delete(id).await.unwrap();
        client.delete("never_existed".to_string()).await.unwrap();
    }

    #[tokio::test]
    async fn list_orders_by_write_time() {
        let client = spawn_specials();
        for title in ["first", "second", "third"] {
            client
                .create(SpecialCreate {
                    title: title.into(),
                    discount_pct: 0,
                })
                .await
                .unwrap();
        }

        let oldest_first = client.list(ListOrder::Insertion).await.unwrap();
        let titles: Vec<&str> = oldest_first.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["first", "second", "third"]);

        let newest_first = client.list(ListOrder::NewestFirst).await.unwrap();
        let titles: Vec<&str> = newest_first.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["third", "second", "first"]);
    }
}
