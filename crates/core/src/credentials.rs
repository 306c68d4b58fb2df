//! Bearer credential storage
//!
//! The credential is an opaque token owned by durable storage, written on
//! login/registration, read on every outgoing request, and deleted on logout
//! or when the backend rejects it. The trait keeps the owner swappable: a
//! file under the user's data directory for desktop embeddings, an in-memory
//! store for tests and ephemeral sessions.

use crate::error::CoreError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Durable owner of the bearer credential
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read the stored token, if any
    async fn get(&self) -> Result<Option<String>, CoreError>;

    /// Persist a token, replacing any previous one
    async fn set(&self, token: &str) -> Result<(), CoreError>;

    /// Remove the stored token; removing an absent token is not an error
    async fn clear(&self) -> Result<(), CoreError>;
}

/// In-process credential store
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: RwLock<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self) -> Result<Option<String>, CoreError> {
        Ok(self.token.read().await.clone())
    }

    async fn set(&self, token: &str) -> Result<(), CoreError> {
        *self.token.write().await = Some(token.to_owned());
        Ok(())
    }

    async fn clear(&self) -> Result<(), CoreError> {
        *self.token.write().await = None;
        Ok(())
    }
}

/// Credential store backed by a single file
///
/// The file holds the raw token and nothing else; its absence means no
/// credential.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Well-known credential location under the platform data directory
    pub fn default_path() -> Result<PathBuf, CoreError> {
        dirs::data_dir()
            .map(|dir| dir.join("edupredict").join("credential"))
            .ok_or_else(|| CoreError::internal_error("no platform data directory available"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self) -> Result<Option<String>, CoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token.to_owned()))
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, token: &str) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, token).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), CoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub CredentialStore {}

        #[async_trait]
        impl CredentialStore for CredentialStore {
            async fn get(&self) -> Result<Option<String>, CoreError>;
            async fn set(&self, token: &str) -> Result<(), CoreError>;
            async fn clear(&self) -> Result<(), CoreError>;
        }
    }
}
