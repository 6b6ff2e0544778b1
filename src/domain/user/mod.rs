//! User domain
//!
//! This module provides the user entity, field validation, and the
//! repository trait the view layer writes through.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserField, UserFields, UserId};
pub use repository::UserRepository;
pub use validation::{
    is_form_valid, is_valid_email, is_valid_field, is_valid_name, is_valid_phone, FieldValidity,
};

#[cfg(test)]
pub use repository::MockUserRepository;
