//! Text rendering of the user list

use std::fmt;

use crate::domain::user::{User, UserId};

use super::store::UserStore;

pub const NO_USERS: &str = "No users yet";
pub const USER_NOT_FOUND: &str = "User not found";

/// One row of the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub id: UserId,
    pub full_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id(),
            full_name: user.full_name(),
            phone: user.phone().map(str::to_string),
            email: user.email().map(str::to_string),
        }
    }
}

/// What the list screen shows for the store's current state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// The directory has no users at all
    Empty,
    /// A search is active and nothing matches it
    NotFound,
    Rows(Vec<UserRow>),
}

impl ListView {
    pub fn from_store(store: &UserStore) -> Self {
        if store.is_empty() {
            return Self::Empty;
        }

        let rows: Vec<UserRow> = store.filtered_users().iter().map(UserRow::from).collect();

        if rows.is_empty() && !store.search_text().is_empty() {
            Self::NotFound
        } else {
            Self::Rows(rows)
        }
    }
}

impl fmt::Display for ListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => writeln!(f, "{}", NO_USERS),
            Self::NotFound => writeln!(f, "{}", USER_NOT_FOUND),
            Self::Rows(rows) => {
                for row in rows {
                    writeln!(f, "{}  [{}]", row.full_name.trim(), row.id)?;
                    if let Some(phone) = &row.phone {
                        writeln!(f, "    {}", phone)?;
                    }
                    if let Some(email) = &row.email {
                        writeln!(f, "    {}", email)?;
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{UserField, UserFields};
    use crate::infrastructure::user::InMemoryUserRepository;
    use std::sync::Arc;
    use std::time::Duration;

    fn ivan() -> UserFields {
        UserFields {
            phone: "+79991234567".to_string(),
            first_name: "Иван".to_string(),
            last_name: "Иванов".to_string(),
            middle_name: "Иванович".to_string(),
            email: "ivan@example.com".to_string(),
        }
    }

    async fn store_with(users: Vec<User>) -> UserStore {
        UserStore::load(
            Arc::new(InMemoryUserRepository::with_users(users)),
            Duration::from_millis(300),
        )
        .await
    }

    #[tokio::test]
    async fn test_empty_directory() {
        let mut store = store_with(vec![]).await;
        assert_eq!(ListView::from_store(&store), ListView::Empty);

        // Searching an empty directory still shows the empty state
        store.set_search_text("x");
        assert_eq!(ListView::from_store(&store).to_string(), "No users yet\n");
    }

    #[tokio::test]
    async fn test_not_found() {
        let mut store = store_with(vec![User::new(UserId::generate(), ivan())]).await;

        store.set_search_text("xyz");
        assert_eq!(ListView::from_store(&store), ListView::NotFound);
        assert_eq!(ListView::from_store(&store).to_string(), "User not found\n");
    }

    #[tokio::test]
    async fn test_rows_render_present_fields_only() {
        let full = User::new(UserId::generate(), ivan());
        let partial = User::blank(UserId::generate()).with_field(UserField::FirstName, "Anna");
        let store = store_with(vec![full.clone(), partial.clone()]).await;

        let view = ListView::from_store(&store);
        let ListView::Rows(rows) = &view else {
            panic!("expected rows, got {:?}", view);
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].full_name, "Иванов Иван Иванович");
        assert_eq!(rows[1].phone, None);

        let text = view.to_string();
        let expected = format!(
            "Иванов Иван Иванович  [{}]\n    +79991234567\n    ivan@example.com\nAnna  [{}]\n",
            full.id(),
            partial.id()
        );
        assert_eq!(text, expected);
    }
}
