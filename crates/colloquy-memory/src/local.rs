use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::storage::FileStorage;

/// Filesystem-backed storage rooted at a configured directory.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str, name: &str) -> PathBuf {
        let mut full = self.root.clone();
        if !path.is_empty() {
            full.push(path);
        }
        full.push(name);
        full
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn check_exists(&self, path: &str, name: &str) -> Result<bool> {
        Ok(tokio::fs::try_exists(self.resolve(path, name)).await?)
    }

    async fn read(&self, name: &str, path: &str) -> Result<String> {
        let full = self.resolve(path, name);
        match tokio::fs::read_to_string(&full).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", full.display())),
        }
    }

    async fn write(&self, content: &str, name: &str, path: &str) -> Result<()> {
        let full = self.resolve(path, name);
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        tokio::fs::write(&full, content)
            .await
            .with_context(|| format!("failed to write {}", full.display()))
    }

    async fn delete(&self, name: &str, path: &str) -> Result<()> {
        let full = self.resolve(path, name);
        match tokio::fs::remove_file(&full).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to delete {}", full.display())),
        }
    }
}
