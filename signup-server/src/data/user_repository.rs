use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::domain::error::DomainError;
use crate::domain::user::User;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn append(&self, user: User) -> Result<User, DomainError>;
    async fn list(&self) -> Result<Vec<User>, DomainError>;
}

/// Record store kept as a pretty-printed JSON array in a single file.
///
/// Appends go through `write_lock`, so one process never interleaves two
/// read-modify-write cycles. Other processes sharing the file are not
/// coordinated.
pub struct JsonFileUserRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileUserRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the raw array. A missing file or anything that is not a JSON
    /// array counts as empty.
    async fn load_records(&self) -> Result<Vec<Value>, DomainError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                error!(path = %self.path.display(), "failed to read user store: {}", e);
                return Err(DomainError::Storage(e.to_string()));
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(records)) => Ok(records),
            Ok(_) | Err(_) => {
                if !raw.trim().is_empty() {
                    warn!(path = %self.path.display(), "user store is not a JSON array, starting over");
                }
                Ok(Vec::new())
            }
        }
    }

    async fn store_records(&self, records: &[Value]) -> Result<(), DomainError> {
        let body = serde_json::to_string_pretty(records)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let tmp = self.temp_path();
        let written = async {
            fs::write(&tmp, body.as_bytes()).await?;
            fs::rename(&tmp, &self.path).await
        }
        .await;

        if let Err(e) = written {
            error!(path = %self.path.display(), "failed to write user store: {}", e);
            if let Err(cleanup) = fs::remove_file(&tmp).await
                && cleanup.kind() != std::io::ErrorKind::NotFound
            {
                warn!(path = %tmp.display(), "failed to remove temp file: {}", cleanup);
            }
            return Err(DomainError::Storage(e.to_string()));
        }
        Ok(())
    }

    /// Writes land here first and are renamed over the store.
    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

#[async_trait]
impl UserRepository for JsonFileUserRepository {
    async fn append(&self, user: User) -> Result<User, DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load_records().await?;
        let record = serde_json::to_value(&user).map_err(|e| DomainError::Internal(e.to_string()))?;
        records.push(record);
        self.store_records(&records).await?;

        info!(email = %user.email, users = records.len(), "user appended");
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let records = self.load_records().await?;
        Ok(records
            .into_iter()
            .filter_map(|record| serde_json::from_value(record).ok())
            .collect())
    }
}
