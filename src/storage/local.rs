//! Directory-backed `ObjectStorage`.

use super::ObjectStorage;
use crate::error::{Result, VisitReportError};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.split('/').any(|part| part == "..") {
            return Err(VisitReportError::Storage(format!("invalid key: {}", key)));
        }
        Ok(self.root.join(key))
    }
}

impl ObjectStorage for LocalStorage {
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(tokio::fs::try_exists(self.object_path(key)?).await?)
    }

    async fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        let path = self.object_path(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, data).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.object_path(key)?;
        tokio::fs::read(&path)
            .await
            .map_err(|e| VisitReportError::Storage(format!("{}: {}", key, e)))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.object_path(key)?;
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| VisitReportError::Storage(format!("{}: {}", key, e)))
    }

    async fn signed_url(&self, key: &str, ttl: Duration) -> Result<String> {
        let path = self.object_path(key)?;
        if !tokio::fs::try_exists(&path).await? {
            return Err(VisitReportError::Storage(format!(
                "cannot sign missing object: {}",
                key
            )));
        }
        let expires = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| VisitReportError::Storage(format!("clock error: {}", e)))?
            .as_secs()
            + ttl.as_secs();
        Ok(format!("file://{}?expires={}", path.display(), expires))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_traversal_keys() {
        let storage = LocalStorage::new("/tmp/storage");
        assert!(storage.object_path("../etc/passwd").is_err());
        assert!(storage.object_path("a/../../b").is_err());
        assert!(storage.object_path("").is_err());
        assert!(storage.object_path("visitas/v1/foto.jpg").is_ok());
    }
}
