use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write session file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove session file {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode session file: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    token: String,
}

/// The durable slot holding the bearer token between runs.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored token. A missing, unreadable or corrupt file reads as no token.
    pub async fn load(&self) -> Option<String> {
        match fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice::<SessionFile>(&bytes) {
                Ok(file) if !file.token.is_empty() => Some(file.token),
                Ok(_) => None,
                Err(err) => {
                    error!("failed to parse session file: {err}");
                    None
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                error!("failed to read session file: {err}");
                None
            }
        }
    }

    pub async fn save(&self, token: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| StorageError::Write {
                    path: self.path.clone(),
                    source,
                })?;
        }
        let payload = serde_json::to_vec_pretty(&SessionFile {
            token: token.to_string(),
        })?;
        fs::write(&self.path, payload)
            .await
            .map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })
    }

    pub async fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => {
                warn!("failed to remove session file: {source}");
                Err(StorageError::Remove {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }
}
