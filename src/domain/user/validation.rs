//! User field validation
//!
//! Pure predicates over raw input. Nothing is trimmed or case-folded;
//! callers pass exactly what was typed.

use once_cell::sync::Lazy;
use regex::Regex;

use super::entity::{UserField, UserFields};

/// Optional leading '+', then 10 to 15 ASCII digits
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9]{10,15}$").unwrap());

/// Latin or Cyrillic letters, whitespace and hyphens
static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\p{Cyrillic}\s\-]+$").unwrap());

/// Deliberately loose: something@something.something with no whitespace
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").unwrap());

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && NAME_PATTERN.is_match(name)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Run the predicate that applies to `field`
pub fn is_valid_field(field: UserField, value: &str) -> bool {
    match field {
        UserField::Phone => is_valid_phone(value),
        UserField::FirstName | UserField::LastName | UserField::MiddleName => is_valid_name(value),
        UserField::Email => is_valid_email(value),
    }
}

/// True only when all five fields pass
pub fn is_form_valid(fields: &UserFields) -> bool {
    is_valid_phone(&fields.phone)
        && is_valid_name(&fields.first_name)
        && is_valid_name(&fields.last_name)
        && is_valid_name(&fields.middle_name)
        && is_valid_email(&fields.email)
}

/// Per-field validity flags.
///
/// The default is all-valid, which is what a form shows before its first
/// submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldValidity {
    pub phone: bool,
    pub first_name: bool,
    pub last_name: bool,
    pub middle_name: bool,
    pub email: bool,
}

impl Default for FieldValidity {
    fn default() -> Self {
        Self {
            phone: true,
            first_name: true,
            last_name: true,
            middle_name: true,
            email: true,
        }
    }
}

impl FieldValidity {
    /// Evaluate every field from scratch
    pub fn check(fields: &UserFields) -> Self {
        Self {
            phone: is_valid_phone(&fields.phone),
            first_name: is_valid_name(&fields.first_name),
            last_name: is_valid_name(&fields.last_name),
            middle_name: is_valid_name(&fields.middle_name),
            email: is_valid_email(&fields.email),
        }
    }

    pub fn get(&self, field: UserField) -> bool {
        match field {
            UserField::Phone => self.phone,
            UserField::FirstName => self.first_name,
            UserField::LastName => self.last_name,
            UserField::MiddleName => self.middle_name,
            UserField::Email => self.email,
        }
    }

    pub fn all_valid(&self) -> bool {
        UserField::ALL.iter().all(|field| self.get(*field))
    }

    /// Fields whose flag is false, in form order
    pub fn invalid_fields(&self) -> Vec<UserField> {
        UserField::ALL
            .into_iter()
            .filter(|field| !self.get(*field))
            .collect()
    }
}
