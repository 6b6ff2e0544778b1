//! Storage infrastructure - backend selection

mod factory;

pub use factory::{RepositoryFactory, StorageConfig, StorageType};
