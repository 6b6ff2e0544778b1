//! User repository trait

use async_trait::async_trait;

use super::entity::{User, UserFields};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Persistence boundary for users.
///
/// Writes are staged: `insert`, `update` and `delete` only become visible
/// to `fetch_all` once `commit` succeeds. `rollback` discards whatever is
/// staged.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All committed users, in storage order
    async fn fetch_all(&self) -> Result<Vec<User>, DomainError>;

    /// Stage a new user; the repository assigns its id
    async fn insert(&self, fields: UserFields) -> Result<User, DomainError>;

    /// Stage new field values for an existing user
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    /// Stage removal of a user
    async fn delete(&self, user: &User) -> Result<(), DomainError>;

    /// Apply every staged change atomically
    async fn commit(&self) -> Result<(), DomainError>;

    /// Drop every staged change
    async fn rollback(&self) -> Result<(), DomainError>;

    /// Whether anything is staged
    async fn has_changes(&self) -> bool;
}
