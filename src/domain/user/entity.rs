//! User entity and related types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Opaque, stable user identifier assigned by the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its textual form
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|e| DomainError::invalid_id(format!("'{}': {}", value, e)))
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the five editable user fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    Phone,
    FirstName,
    LastName,
    MiddleName,
    Email,
}

impl UserField {
    /// Fields in form order
    pub const ALL: [UserField; 5] = [
        Self::Phone,
        Self::FirstName,
        Self::LastName,
        Self::MiddleName,
        Self::Email,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Phone => "Phone",
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::MiddleName => "Middle name",
            Self::Email => "Email",
        }
    }
}

impl std::fmt::Display for UserField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw values for the five user fields, as typed into a form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFields {
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub email: String,
}

impl UserFields {
    pub fn get(&self, field: UserField) -> &str {
        match field {
            UserField::Phone => &self.phone,
            UserField::FirstName => &self.first_name,
            UserField::LastName => &self.last_name,
            UserField::MiddleName => &self.middle_name,
            UserField::Email => &self.email,
        }
    }

    pub fn set(&mut self, field: UserField, value: impl Into<String>) {
        let value = value.into();
        match field {
            UserField::Phone => self.phone = value,
            UserField::FirstName => self.first_name = value,
            UserField::LastName => self.last_name = value,
            UserField::MiddleName => self.middle_name = value,
            UserField::Email => self.email = value,
        }
    }
}

/// A user record.
///
/// Every field is optional at rest: records written through the form always
/// carry all five, but records loaded from storage may not. An absent field
/// is distinct from an empty string and survives storage round trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
}

impl User {
    /// Create a user with all five fields present
    pub fn new(id: UserId, fields: UserFields) -> Self {
        let mut user = Self::blank(id);
        user.apply(fields);
        user
    }

    /// Create a user with every field absent
    pub fn blank(id: UserId) -> Self {
        Self {
            id,
            first_name: None,
            last_name: None,
            middle_name: None,
            phone: None,
            email: None,
        }
    }

    /// Builder-style setter for a single field
    pub fn with_field(mut self, field: UserField, value: impl Into<String>) -> Self {
        *self.slot_mut(field) = Some(value.into());
        self
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn middle_name(&self) -> Option<&str> {
        self.middle_name.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn field(&self, field: UserField) -> Option<&str> {
        match field {
            UserField::Phone => self.phone(),
            UserField::FirstName => self.first_name(),
            UserField::LastName => self.last_name(),
            UserField::MiddleName => self.middle_name(),
            UserField::Email => self.email(),
        }
    }

    /// Current values as form input; absent fields become empty strings
    pub fn fields(&self) -> UserFields {
        let mut fields = UserFields::default();
        for field in UserField::ALL {
            fields.set(field, self.field(field).unwrap_or_default());
        }
        fields
    }

    /// "Last First Middle", with absent parts rendered empty
    pub fn full_name(&self) -> String {
        format!(
            "{} {} {}",
            self.last_name().unwrap_or_default(),
            self.first_name().unwrap_or_default(),
            self.middle_name().unwrap_or_default()
        )
    }

    /// Case-insensitive substring match against the five fields.
    ///
    /// Absent fields never match. An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }

        let needle = query.to_lowercase();

        UserField::ALL.iter().any(|field| {
            self.field(*field)
                .is_some_and(|value| value.to_lowercase().contains(&needle))
        })
    }

    // Mutators

    /// Overwrite all five fields
    pub fn apply(&mut self, fields: UserFields) {
        self.phone = Some(fields.phone);
        self.first_name = Some(fields.first_name);
        self.last_name = Some(fields.last_name);
        self.middle_name = Some(fields.middle_name);
        self.email = Some(fields.email);
    }

    fn slot_mut(&mut self, field: UserField) -> &mut Option<String> {
        match field {
            UserField::Phone => &mut self.phone,
            UserField::FirstName => &mut self.first_name,
            UserField::LastName => &mut self.last_name,
            UserField::MiddleName => &mut self.middle_name,
            UserField::Email => &mut self.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ivan() -> UserFields {
        UserFields {
            phone: "+79991234567".to_string(),
            first_name: "Иван".to_string(),
            last_name: "Иванов".to_string(),
            middle_name: "Иванович".to_string(),
            email: "ivan@example.com".to_string(),
        }
    }

    #[test]
    fn test_user_id_parse_roundtrip() {
        let id = UserId::generate();
        let parsed = UserId::parse(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_user_id_invalid() {
        assert!(UserId::parse("").is_err());
        assert!(UserId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn test_user_creation() {
        let user = User::new(UserId::generate(), ivan());

        assert_eq!(user.first_name(), Some("Иван"));
        assert_eq!(user.last_name(), Some("Иванов"));
        assert_eq!(user.middle_name(), Some("Иванович"));
        assert_eq!(user.phone(), Some("+79991234567"));
        assert_eq!(user.email(), Some("ivan@example.com"));
        assert_eq!(user.fields(), ivan());
    }

    #[test]
    fn test_blank_user_fields_are_empty_strings() {
        let user = User::blank(UserId::generate()).with_field(UserField::FirstName, "Anna");

        let fields = user.fields();
        assert_eq!(fields.first_name, "Anna");
        assert_eq!(fields.phone, "");
        assert!(user.phone().is_none());
    }

    #[test]
    fn test_full_name() {
        let user = User::new(UserId::generate(), ivan());
        assert_eq!(user.full_name(), "Иванов Иван Иванович");

        let partial = User::blank(UserId::generate()).with_field(UserField::FirstName, "Anna");
        assert_eq!(partial.full_name(), " Anna ");
    }

    #[test]
    fn test_matches_case_insensitive() {
        let user = User::blank(UserId::generate()).with_field(UserField::FirstName, "Anna");

        assert!(user.matches("ann"));
        assert!(user.matches("ANN"));
        assert!(!user.matches("bob"));
    }

    #[test]
    fn test_matches_cyrillic_case_insensitive() {
        let user = User::new(UserId::generate(), ivan());
        assert!(user.matches("иван"));
        assert!(user.matches("ИВАНОВИЧ"));
    }

    #[test]
    fn test_absent_fields_never_match() {
        let user = User::blank(UserId::generate());
        assert!(!user.matches("a"));
        assert!(user.matches(""));
    }

    #[test]
    fn test_apply_keeps_id() {
        let mut user = User::blank(UserId::generate());
        let id = *user.id();

        user.apply(ivan());
        assert_eq!(*user.id(), id);
        assert_eq!(user.fields(), ivan());
    }

    #[test]
    fn test_serialization_omits_absent_fields() {
        let user = User::blank(UserId::generate())
            .with_field(UserField::Email, "")
            .with_field(UserField::FirstName, "Anna");

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("phone"));
        assert!(json.contains("\"email\":\"\""));

        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
        assert_eq!(back.email(), Some(""));
        assert!(back.phone().is_none());
    }

    #[test]
    fn test_user_fields_get_set() {
        let mut fields = UserFields::default();
        for field in UserField::ALL {
            fields.set(field, field.label());
        }
        assert_eq!(fields.get(UserField::MiddleName), "Middle name");
        assert_eq!(fields.email, "Email");
    }
}
