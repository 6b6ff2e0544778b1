//! User infrastructure module
//!
//! Repository implementations for the user directory: an in-memory store
//! for previews and tests, and a JSON file store for durable data.

mod changeset;
mod json_file;
mod repository;

pub use json_file::JsonFileUserRepository;
pub use repository::InMemoryUserRepository;
