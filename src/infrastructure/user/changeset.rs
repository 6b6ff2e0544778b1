//! Staged writes shared by the user repository implementations

use crate::domain::user::{User, UserId};
use crate::domain::DomainError;

#[derive(Debug, Clone)]
enum Change {
    Insert(User),
    Update(User),
    Delete(UserId),
}

/// Ordered list of pending writes, applied all-or-nothing on commit
#[derive(Debug, Default)]
pub(crate) struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    pub fn insert(&mut self, user: User) {
        self.changes.push(Change::Insert(user));
    }

    pub fn update(&mut self, user: User) {
        self.changes.push(Change::Update(user));
    }

    pub fn delete(&mut self, id: UserId) {
        self.changes.push(Change::Delete(id));
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn clear(&mut self) {
        self.changes.clear();
    }

    /// Apply the staged writes on top of `committed`, in staging order.
    ///
    /// Returns the new user list; `committed` is untouched, so a failure
    /// part-way through leaves no trace.
    pub fn apply(&self, committed: &[User]) -> Result<Vec<User>, DomainError> {
        let mut users = committed.to_vec();

        for change in &self.changes {
            match change {
                Change::Insert(user) => {
                    if users.iter().any(|u| u.id() == user.id()) {
                        return Err(DomainError::conflict(format!(
                            "User '{}' already exists",
                            user.id()
                        )));
                    }
                    users.push(user.clone());
                }
                Change::Update(user) => {
                    let slot = users
                        .iter_mut()
                        .find(|u| u.id() == user.id())
                        .ok_or_else(|| {
                            DomainError::not_found(format!("User '{}' not found", user.id()))
                        })?;
                    *slot = user.clone();
                }
                Change::Delete(id) => {
                    let index = users.iter().position(|u| u.id() == id).ok_or_else(|| {
                        DomainError::not_found(format!("User '{}' not found", id))
                    })?;
                    users.remove(index);
                }
            }
        }

        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserField;

    fn user(name: &str) -> User {
        User::blank(UserId::generate()).with_field(UserField::FirstName, name)
    }

    #[test]
    fn test_apply_preserves_order() {
        let a = user("a");
        let b = user("b");
        let c = user("c");

        let mut changes = ChangeSet::default();
        changes.insert(c.clone());

        let result = changes.apply(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(result, vec![a, b, c]);
    }

    #[test]
    fn test_apply_update_in_place() {
        let a = user("a");
        let b = user("b");
        let renamed = b.clone().with_field(UserField::FirstName, "bee");

        let mut changes = ChangeSet::default();
        changes.update(renamed.clone());

        let result = changes.apply(&[a.clone(), b]).unwrap();
        assert_eq!(result, vec![a, renamed]);
    }

    #[test]
    fn test_apply_insert_then_delete_same_batch() {
        let a = user("a");

        let mut changes = ChangeSet::default();
        changes.insert(a.clone());
        changes.delete(*a.id());

        let result = changes.apply(&[]).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_apply_update_missing_fails() {
        let mut changes = ChangeSet::default();
        changes.update(user("ghost"));

        let result = changes.apply(&[]);
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[test]
    fn test_apply_delete_missing_fails_without_partial_result() {
        let a = user("a");
        let committed = vec![a.clone()];

        let mut changes = ChangeSet::default();
        changes.delete(*a.id());
        changes.delete(*a.id());

        assert!(changes.apply(&committed).is_err());
        assert_eq!(committed, vec![a]);
    }

    #[test]
    fn test_clear() {
        let mut changes = ChangeSet::default();
        changes.insert(user("a"));
        assert!(!changes.is_empty());

        changes.clear();
        assert!(changes.is_empty());
    }
}
