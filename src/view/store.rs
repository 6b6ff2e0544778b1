//! User store - the view-model behind the user list
//!
//! Owns the in-memory copy of every user, the search query, and the last
//! storage failure. All writes go through the repository and are followed by
//! a commit and a reload, so the cached list only ever reflects storage as of
//! the most recent completed fetch.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::domain::user::{User, UserFields, UserId, UserRepository};
use crate::domain::DomainError;

use super::debounce::Debouncer;
use super::state::{Observable, SubscriptionId};

/// Repository call that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    Fetch,
    Insert,
    Update,
    Delete,
    Save,
}

impl std::fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Fetch => "load users",
            Self::Insert => "add user",
            Self::Update => "update user",
            Self::Delete => "delete user",
            Self::Save => "save changes",
        };
        f.write_str(name)
    }
}

/// A storage error caught by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageFailure {
    pub operation: StoreOperation,
    pub message: String,
}

impl std::fmt::Display for StorageFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to {}: {}", self.operation, self.message)
    }
}

pub struct UserStore {
    repository: Arc<dyn UserRepository>,
    users: Observable<Vec<User>>,
    search_text: String,
    settled_search: Observable<String>,
    last_error: Observable<Option<StorageFailure>>,
    debouncer: Debouncer<String>,
}

impl std::fmt::Debug for UserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserStore")
            .field("users", &self.len())
            .field("search_text", &self.search_text)
            .field("last_error", &self.last_error())
            .field("debouncer", &self.debouncer)
            .finish()
    }
}

impl UserStore {
    /// Create an empty store; call `fetch_all` to populate it
    pub fn new(repository: Arc<dyn UserRepository>, debounce: Duration) -> Self {
        let settled_search = Observable::new(String::new());
        let publish = settled_search.clone();

        Self {
            repository,
            users: Observable::new(Vec::new()),
            search_text: String::new(),
            settled_search,
            last_error: Observable::new(None),
            debouncer: Debouncer::new(debounce, move |text: String| publish.set(text)),
        }
    }

    /// Create a store and load it from the repository
    pub async fn load(repository: Arc<dyn UserRepository>, debounce: Duration) -> Self {
        let mut store = Self::new(repository, debounce);
        store.fetch_all().await;
        store
    }

    // Reads

    /// Every cached user, in storage order
    pub fn all_users(&self) -> Vec<User> {
        self.users.get()
    }

    /// Users matching the current search text, in storage order.
    ///
    /// Always reflects the latest query, whether or not the debounced
    /// notification has fired yet.
    pub fn filtered_users(&self) -> Vec<User> {
        let query = self.search_text.as_str();
        self.users.with(|users| {
            users
                .iter()
                .filter(|user| user.matches(query))
                .cloned()
                .collect()
        })
    }

    pub fn is_empty(&self) -> bool {
        self.users.with(|users| users.is_empty())
    }

    pub fn len(&self) -> usize {
        self.users.with(|users| users.len())
    }

    pub fn find(&self, id: &UserId) -> Option<User> {
        self.users
            .with(|users| users.iter().find(|user| user.id() == id).cloned())
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Search text as of the last debounced notification
    pub fn settled_search(&self) -> String {
        self.settled_search.get()
    }

    pub fn last_error(&self) -> Option<StorageFailure> {
        self.last_error.get()
    }

    // Subscriptions

    pub fn subscribe_users(
        &self,
        callback: impl Fn(&Vec<User>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.users.subscribe(callback)
    }

    /// Fires once typing pauses, with the settled search text
    pub fn subscribe_search(
        &self,
        callback: impl Fn(&String) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.settled_search.subscribe(callback)
    }

    pub fn subscribe_errors(
        &self,
        callback: impl Fn(&Option<StorageFailure>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.last_error.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.users.unsubscribe(id)
            || self.settled_search.unsubscribe(id)
            || self.last_error.unsubscribe(id)
    }

    // Search

    /// Update the query immediately and schedule the debounced notification
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.search_text {
            return;
        }

        self.search_text = text.clone();
        self.debouncer.push(text);
    }

    /// Deliver a pending search notification without waiting
    pub fn flush_search(&mut self) {
        self.debouncer.flush();
    }

    // Writes

    /// Replace the cache with the repository's contents.
    ///
    /// On failure the previous cache is kept as-is.
    pub async fn fetch_all(&mut self) {
        match self.reload().await {
            Ok(()) => self.clear_error(),
            Err(e) => self.report(StoreOperation::Fetch, e),
        }
    }

    /// Create a user from already-validated fields and save
    pub async fn add_user(&mut self, fields: UserFields) {
        match self.repository.insert(fields).await {
            Ok(user) => {
                debug!(id = %user.id(), "Staged new user");
                self.save().await;
            }
            Err(e) => self.report(StoreOperation::Insert, e),
        }
    }

    /// Overwrite an existing user's five fields and save.
    ///
    /// The id is kept. If the save fails the cached user keeps its previous
    /// values.
    pub async fn update_user(&mut self, existing: &User, fields: UserFields) {
        let mut updated = existing.clone();
        updated.apply(fields);

        match self.repository.update(&updated).await {
            Ok(()) => {
                debug!(id = %updated.id(), "Staged user update");
                self.save().await;
            }
            Err(e) => self.report(StoreOperation::Update, e),
        }
    }

    pub async fn delete(&mut self, user: &User) {
        match self.repository.delete(user).await {
            Ok(()) => {
                debug!(id = %user.id(), "Staged user deletion");
                self.save().await;
            }
            Err(e) => self.report(StoreOperation::Delete, e),
        }
    }

    /// Commit staged writes, then reload.
    ///
    /// A failed commit is rolled back and the cache is reloaded from what is
    /// actually stored, so no half-applied change stays visible.
    pub async fn save(&mut self) {
        match self.repository.commit().await {
            Ok(()) => self.fetch_all().await,
            Err(e) => {
                self.report(StoreOperation::Save, e);

                if let Err(e) = self.repository.rollback().await {
                    warn!(error = %e, "Failed to roll back staged user changes");
                }

                if let Err(e) = self.reload().await {
                    warn!(error = %e, "Failed to reload users after a failed save");
                }
            }
        }
    }

    async fn reload(&mut self) -> Result<(), DomainError> {
        let users = self.repository.fetch_all().await?;
        debug!(count = users.len(), "Loaded users");
        self.users.set(users);
        Ok(())
    }

    fn report(&self, operation: StoreOperation, e: DomainError) {
        error!(operation = %operation, error = %e, "User storage operation failed");
        self.last_error.set(Some(StorageFailure {
            operation,
            message: e.to_string(),
        }));
    }

    fn clear_error(&self) {
        if self.last_error.with(Option::is_some) {
            self.last_error.set(None);
        }
    }
}
