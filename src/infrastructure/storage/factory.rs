//! Repository factory for runtime storage selection

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::config::StorageSettings;
use crate::domain::user::UserRepository;
use crate::domain::DomainError;
use crate::infrastructure::user::{InMemoryUserRepository, JsonFileUserRepository};

/// Supported storage types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for previews/testing)
    InMemory,
    /// Single JSON document on disk
    JsonFile,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "json" | "file" | "json-file" | "json_file" => Some(Self::JsonFile),
            _ => None,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// In-memory storage configuration
    InMemory,
    /// JSON file storage at the given path
    JsonFile(PathBuf),
}

impl StorageConfig {
    /// Creates an in-memory storage configuration
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Creates a JSON file storage configuration
    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        Self::JsonFile(path.into())
    }

    /// Resolves the configured backend name
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, DomainError> {
        match StorageType::from_str(&settings.backend) {
            Some(StorageType::InMemory) => Ok(Self::in_memory()),
            Some(StorageType::JsonFile) => Ok(Self::json_file(&settings.path)),
            None => Err(DomainError::configuration(format!(
                "Unknown storage backend '{}'",
                settings.backend
            ))),
        }
    }

    /// Returns the storage type
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::JsonFile(_) => StorageType::JsonFile,
        }
    }
}

/// Factory for creating user repositories
#[derive(Debug)]
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Creates a repository based on the configuration
    pub fn create(config: &StorageConfig) -> Arc<dyn UserRepository> {
        match config {
            StorageConfig::InMemory => {
                info!("Using in-memory user storage");
                Arc::new(InMemoryUserRepository::new())
            }
            StorageConfig::JsonFile(path) => {
                info!(path = %path.display(), "Using JSON file user storage");
                Arc::new(JsonFileUserRepository::open(path))
            }
        }
    }
}
