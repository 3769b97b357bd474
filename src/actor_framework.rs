use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use crate::storage::{self, Storage};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, DTOs, and Actions)
// =============================================================================

/// Failures of the actor plumbing itself, independent of any domain.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;
    type Error: std::error::Error + From<FrameworkError> + Send + Sync + 'static;

    /// Storage key the collection is mirrored under.
    const STORAGE_KEY: &'static str;
    /// Name of the collection field inside the persisted state.
    const COLLECTION: &'static str;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and creation parameters
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), Self::Error> { Ok(()) }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;
    fn on_delete(&self) -> Result<(), Self::Error> { Ok(()) }

    // --- Action Handler ---

    /// Handle a custom domain-specific action
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;

    /// Whether an empty persisted collection should be replaced by the seed.
    fn reseed_when_empty() -> bool { false }
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, E>>;

/// A boxed predicate evaluated inside the actor.
pub struct Filter<T>(Box<dyn Fn(&T) -> bool + Send>);

impl<T> Filter<T> {
    pub fn new(predicate: impl Fn(&T) -> bool + Send + 'static) -> Self {
        Self(Box::new(predicate))
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.0)(item)
    }
}

impl<T> Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter(..)")
    }
}

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    List {
        respond_to: Response<Vec<T>, T::Error>,
    },
    Query {
        filter: Filter<T>,
        respond_to: Response<Vec<T>, T::Error>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<Option<T>, T::Error>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<bool, T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<Option<T::ActionResult>, T::Error>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns one insertion-ordered collection and mirrors it to storage after
/// every mutation. Unknown ids are no-ops: `None` for update and action,
/// `false` for delete.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: IndexMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
    storage: Arc<dyn Storage>,
}

impl<T: Entity> ResourceActor<T> {
    /// Creates the actor, restoring its collection from `storage` or falling
    /// back to `seed` when nothing usable is persisted.
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
        storage: Arc<dyn Storage>,
        seed: Vec<T>,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let store = Self::hydrate(storage.as_ref(), seed);
        let actor = Self {
            receiver,
            store,
            next_id_fn: Box::new(next_id_fn),
            storage,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    fn hydrate(storage: &dyn Storage, seed: Vec<T>) -> IndexMap<T::Id, T> {
        let persisted = match storage::load_collection::<T>(storage, T::STORAGE_KEY, T::COLLECTION) {
            Ok(persisted) => persisted,
            Err(e) => {
                warn!(store = T::STORAGE_KEY, error = %e, "Ignoring unreadable persisted state");
                None
            }
        };
        let items = match persisted {
            Some(items) if !(items.is_empty() && T::reseed_when_empty()) => {
                debug!(store = T::STORAGE_KEY, count = items.len(), "Restored persisted state");
                items
            }
            _ => seed,
        };
        items.into_iter().map(|item| (item.id().clone(), item)).collect()
    }

    fn generate_id(&self) -> T::Id {
        loop {
            let id = (self.next_id_fn)();
            if !self.store.contains_key(&id) {
                return id;
            }
        }
    }

    fn persist(&self) {
        let items: Vec<&T> = self.store.values().collect();
        if let Err(e) = storage::save_collection(self.storage.as_ref(), T::STORAGE_KEY, T::COLLECTION, &items) {
            warn!(store = T::STORAGE_KEY, error = %e, "Failed to persist state");
        }
    }

    #[instrument(name = "resource_actor", skip(self), fields(store = T::STORAGE_KEY))]
    pub async fn run(mut self) {
        info!(count = self.store.len(), "Actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let items = self.store.values().cloned().collect();
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Query { filter, respond_to } => {
                    let items = self.store.values().filter(|item| filter.matches(item)).cloned().collect();
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, patch));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let _ = respond_to.send(self.handle_action(id, action));
                }
            }
        }
        info!("Actor stopped");
    }

    fn handle_create(&mut self, params: T::CreateParams) -> Result<T, T::Error> {
        let id = self.generate_id();
        let mut item = T::from_create_params(id.clone(), params)?;
        item.on_create()?;
        self.store.insert(id.clone(), item.clone());
        self.persist();
        info!(id = %id, "Item created");
        Ok(item)
    }

    fn handle_update(&mut self, id: T::Id, patch: T::Patch) -> Result<Option<T>, T::Error> {
        let Some(item) = self.store.get_mut(&id) else {
            debug!(id = %id, "Update for unknown item ignored");
            return Ok(None);
        };
        item.on_update(patch)?;
        let updated = item.clone();
        self.persist();
        Ok(Some(updated))
    }

    fn handle_delete(&mut self, id: T::Id) -> Result<bool, T::Error> {
        let Some(item) = self.store.get(&id) else {
            debug!(id = %id, "Delete for unknown item ignored");
            return Ok(false);
        };
        item.on_delete()?;
        self.store.shift_remove(&id);
        self.persist();
        info!(id = %id, "Item deleted");
        Ok(true)
    }

    fn handle_action(&mut self, id: T::Id, action: T::Action) -> Result<Option<T::ActionResult>, T::Error> {
        let Some(item) = self.store.get_mut(&id) else {
            debug!(id = %id, "Action for unknown item ignored");
            return Ok(None);
        };
        let result = item.handle_action(action)?;
        self.persist();
        Ok(Some(result))
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R, T::Error>) -> ResourceRequest<T>,
    ) -> Result<R, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(build(respond_to)).await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T, T::Error> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, T::Error> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn list(&self) -> Result<Vec<T>, T::Error> {
        self.request(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn query(&self, predicate: impl Fn(&T) -> bool + Send + 'static) -> Result<Vec<T>, T::Error> {
        let filter = Filter::new(predicate);
        self.request(|respond_to| ResourceRequest::Query { filter, respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<Option<T>, T::Error> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<bool, T::Error> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Result<Option<T::ActionResult>, T::Error> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to }).await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use serde::Deserialize;
    use std::sync::atomic::{AtomicU64, Ordering};

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        body: String,
        pinned: bool,
    }

    #[derive(Debug)]
    struct NoteCreate {
        body: String,
    }

    #[derive(Debug)]
    struct NotePatch {
        body: Option<String>,
    }

    #[derive(Debug)]
    enum NoteAction {
        Pin,
    }

    #[derive(Debug, Error)]
    enum NoteError {
        #[error("Actor communication error: {0}")]
        ActorCommunicationError(#[from] FrameworkError),
        #[error("Pinned notes cannot be deleted")]
        Pinned,
    }

    impl Entity for Note {
        type Id = String;
        type CreateParams = NoteCreate;
        type Patch = NotePatch;
        type Action = NoteAction;
        type ActionResult = bool;
        type Error = NoteError;

        const STORAGE_KEY: &'static str = "note-storage";
        const COLLECTION: &'static str = "notes";

        fn id(&self) -> &String { &self.id }

        fn from_create_params(id: String, params: NoteCreate) -> Result<Self, NoteError> {
            Ok(Self { id, body: params.body, pinned: false })
        }

        fn on_update(&mut self, patch: NotePatch) -> Result<(), NoteError> {
            if let Some(body) = patch.body {
                self.body = body;
            }
            Ok(())
        }

        fn on_delete(&self) -> Result<(), NoteError> {
            if self.pinned { Err(NoteError::Pinned) } else { Ok(()) }
        }

        fn handle_action(&mut self, action: NoteAction) -> Result<bool, NoteError> {
            match action {
                NoteAction::Pin => {
                    let changed = !self.pinned;
                    self.pinned = true;
                    Ok(changed)
                }
            }
        }
    }

    fn counter_ids() -> impl Fn() -> String + Send + Sync + 'static {
        let counter = Arc::new(AtomicU64::new(1));
        move || format!("note_{}", counter.fetch_add(1, Ordering::SeqCst))
    }

    fn spawn_notes(storage: Arc<dyn Storage>, seed: Vec<Note>) -> ResourceClient<Note> {
        let (actor, client) = ResourceActor::new(10, counter_ids(), storage, seed);
        tokio::spawn(actor.run());
        client
    }

    fn seeded(id: &str) -> Note {
        Note { id: id.to_string(), body: "seed".to_string(), pinned: false }
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_resource_actor_with_actions() {
        let client = spawn_notes(Arc::new(MemoryStorage::new()), vec![]);

        let note = client.create(NoteCreate { body: "hello".into() }).await.unwrap();
        assert_eq!(note.id, "note_1");

        let changed = client.perform_action(note.id.clone(), NoteAction::Pin).await.unwrap();
        assert_eq!(changed, Some(true));
        let changed_again = client.perform_action(note.id.clone(), NoteAction::Pin).await.unwrap();
        assert_eq!(changed_again, Some(false));

        let stored = client.get(note.id.clone()).await.unwrap().unwrap();
        assert!(stored.pinned);

        // Hook rejection leaves the item in place
        let result = client.delete(note.id.clone()).await;
        assert!(matches!(result, Err(NoteError::Pinned)));
        assert_eq!(client.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_generated_ids_skip_existing_ones() {
        let client = spawn_notes(Arc::new(MemoryStorage::new()), vec![seeded("note_1"), seeded("note_2")]);

        let note = client.create(NoteCreate { body: "fresh".into() }).await.unwrap();
        assert_eq!(note.id, "note_3");

        let ids: Vec<String> = client.list().await.unwrap().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["note_1", "note_2", "note_3"]);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_noops() {
        let client = spawn_notes(Arc::new(MemoryStorage::new()), vec![seeded("a")]);

        let updated = client.update("missing".into(), NotePatch { body: Some("x".into()) }).await.unwrap();
        assert!(updated.is_none());
        assert!(!client.delete("missing".into()).await.unwrap());
        assert!(client.perform_action("missing".into(), NoteAction::Pin).await.unwrap().is_none());
        assert_eq!(client.list().await.unwrap(), vec![seeded("a")]);
    }

    #[tokio::test]
    async fn test_query_and_delete_keep_order() {
        let client = spawn_notes(Arc::new(MemoryStorage::new()), vec![seeded("a"), seeded("b"), seeded("c")]);
        client.perform_action("c".into(), NoteAction::Pin).await.unwrap();

        assert!(client.delete("a".into()).await.unwrap());
        let unpinned = client.query(|n: &Note| !n.pinned).await.unwrap();
        assert_eq!(unpinned, vec![seeded("b")]);
    }

    #[tokio::test]
    async fn test_state_survives_restart() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());

        let first = spawn_notes(storage.clone(), vec![seeded("seed")]);
        first.create(NoteCreate { body: "kept".into() }).await.unwrap();
        first.delete("seed".into()).await.unwrap();
        drop(first);

        let second = spawn_notes(storage, vec![seeded("seed")]);
        let bodies: Vec<String> = second.list().await.unwrap().into_iter().map(|n| n.body).collect();
        assert_eq!(bodies, vec!["kept"]);
    }

    #[tokio::test]
    async fn test_unreadable_state_falls_back_to_seed() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        storage.set_item(Note::STORAGE_KEY, "garbage").unwrap();

        let client = spawn_notes(storage, vec![seeded("seed")]);
        assert_eq!(client.list().await.unwrap(), vec![seeded("seed")]);
    }

    #[tokio::test]
    async fn test_closed_actor_reports_framework_error() {
        let (actor, client) = ResourceActor::<Note>::new(1, counter_ids(), Arc::new(MemoryStorage::new()), vec![]);
        drop(actor);
        let result = client.list().await;
        assert!(matches!(result, Err(NoteError::ActorCommunicationError(FrameworkError::ActorClosed))));
    }
}
