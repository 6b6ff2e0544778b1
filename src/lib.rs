//! User Directory
//!
//! A small local directory of user records with:
//! - Field-level validation for phone, names and email
//! - A view-model with debounced, case-insensitive search
//! - A form layer that blocks saving until every field passes
//! - Pluggable storage (in-memory or a JSON file) with transactional commits

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod view;

pub use config::AppConfig;
pub use domain::user::{User, UserField, UserFields, UserId, UserRepository};
pub use domain::DomainError;
pub use view::{UserForm, UserStore};
