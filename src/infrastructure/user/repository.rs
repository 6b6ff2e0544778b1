//! In-memory user repository implementation

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{User, UserFields, UserId, UserRepository};
use crate::domain::DomainError;

use super::changeset::ChangeSet;

/// In-memory implementation of UserRepository
///
/// Useful for previews and tests. Data is lost when the process terminates.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
    pending: Arc<RwLock<ChangeSet>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial committed users
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
            pending: Arc::new(RwLock::new(ChangeSet::default())),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn fetch_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.read().await.clone())
    }

    async fn insert(&self, fields: UserFields) -> Result<User, DomainError> {
        let user = User::new(UserId::generate(), fields);
        self.pending.write().await.insert(user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        self.pending.write().await.update(user.clone());
        Ok(())
    }

    async fn delete(&self, user: &User) -> Result<(), DomainError> {
        self.pending.write().await.delete(*user.id());
        Ok(())
    }

    async fn commit(&self) -> Result<(), DomainError> {
        let mut pending = self.pending.write().await;
        let mut users = self.users.write().await;

        *users = pending.apply(&users)?;
        pending.clear();

        Ok(())
    }

    async fn rollback(&self) -> Result<(), DomainError> {
        self.pending.write().await.clear();
        Ok(())
    }

    async fn has_changes(&self) -> bool {
        !self.pending.read().await.is_empty()
    }
}
