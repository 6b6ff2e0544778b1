//! JSON file backed user repository
//!
//! The whole directory lives in one JSON document. Commits write a sibling
//! temp file and rename it over the original, so a failed commit never
//! leaves a half-written document behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::user::{User, UserFields, UserId, UserRepository};
use crate::domain::DomainError;

use super::changeset::ChangeSet;

const DOCUMENT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Document {
    version: u32,
    #[serde(default)]
    users: Vec<User>,
}

/// User repository persisted to a single JSON file
#[derive(Debug)]
pub struct JsonFileUserRepository {
    path: PathBuf,
    pending: Mutex<ChangeSet>,
}

impl JsonFileUserRepository {
    /// Open a repository at `path`. The file is created on first commit.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pending: Mutex::new(ChangeSet::default()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_users(&self) -> Result<Vec<User>, DomainError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(DomainError::storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        let document: Document = serde_json::from_slice(&bytes).map_err(|e| {
            DomainError::storage(format!("Failed to parse {}: {}", self.path.display(), e))
        })?;

        if document.version != DOCUMENT_VERSION {
            return Err(DomainError::storage(format!(
                "Unsupported document version {} in {}",
                document.version,
                self.path.display()
            )));
        }

        Ok(document.users)
    }

    async fn write_users(&self, users: Vec<User>) -> Result<(), DomainError> {
        let document = Document {
            version: DOCUMENT_VERSION,
            users,
        };

        let json = serde_json::to_vec_pretty(&document)
            .map_err(|e| DomainError::internal(format!("Failed to serialize users: {}", e)))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let tmp = self.temp_path();

        tokio::fs::write(&tmp, &json).await.map_err(|e| {
            DomainError::storage(format!("Failed to write {}: {}", tmp.display(), e))
        })?;

        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(DomainError::storage(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            )));
        }

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl UserRepository for JsonFileUserRepository {
    async fn fetch_all(&self) -> Result<Vec<User>, DomainError> {
        self.read_users().await
    }

    async fn insert(&self, fields: UserFields) -> Result<User, DomainError> {
        let user = User::new(UserId::generate(), fields);
        self.pending.lock().await.insert(user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        self.pending.lock().await.update(user.clone());
        Ok(())
    }

    async fn delete(&self, user: &User) -> Result<(), DomainError> {
        self.pending.lock().await.delete(*user.id());
        Ok(())
    }

    async fn commit(&self) -> Result<(), DomainError> {
        let mut pending = self.pending.lock().await;

        if pending.is_empty() {
            return Ok(());
        }

        let committed = self.read_users().await?;
        let users = pending.apply(&committed)?;
        let count = users.len();

        self.write_users(users).await?;
        pending.clear();

        debug!(path = %self.path.display(), users = count, "Committed user directory");

        Ok(())
    }

    async fn rollback(&self) -> Result<(), DomainError> {
        self.pending.lock().await.clear();
        Ok(())
    }

    async fn has_changes(&self) -> bool {
        !self.pending.lock().await.is_empty()
    }
}
