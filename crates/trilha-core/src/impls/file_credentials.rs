//! File-backed credential store.
//!
//! Persists the one token string at a fixed path so the CLI rehydrates the
//! session across process restarts. File I/O goes through `spawn_blocking`
//! to keep the executor free.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::CredentialError;
use crate::ports::credentials::CredentialStore;

pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

fn io_err(e: impl std::fmt::Display) -> CredentialError {
    CredentialError(e.to_string())
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<String>, CredentialError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || match std::fs::read_to_string(&path) {
            Ok(raw) => {
                let token = raw.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token.to_string()))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_err(e)),
        })
        .await
        .map_err(io_err)?
    }

    async fn store(&self, token: &str) -> Result<(), CredentialError> {
        let path = self.path.clone();
        let token = token.to_string();
        tokio::task::spawn_blocking(move || {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
            std::fs::write(&path, token).map_err(io_err)
        })
        .await
        .map_err(io_err)?
    }

    async fn clear(&self) -> Result<(), CredentialError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_err(e)),
        })
        .await
        .map_err(io_err)?
    }
}
