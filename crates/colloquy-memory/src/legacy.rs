use std::path::{Path, PathBuf};

use crate::local::LocalFileStorage;
use crate::manager::MemoryManager;
use std::sync::Arc;

/// Direct-filesystem memory manager for local-only deployments.
///
/// Same contract as [`MemoryManager`], no storage abstraction to configure:
/// point it at a directory and go.
pub struct LocalMemoryManager {
    inner: MemoryManager,
    root: PathBuf,
}

impl LocalMemoryManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let storage = Arc::new(LocalFileStorage::new(root.clone()));
        Self {
            inner: MemoryManager::new(storage),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn read_memory(&self, thread_id: Option<&str>, default: &str) -> String {
        self.inner.read_memory(thread_id, default).await
    }

    pub async fn write_memory(&self, thread_id: Option<&str>, content: &str) -> bool {
        self.inner.write_memory(thread_id, content).await
    }

    pub async fn maintain_memory(
        &self,
        thread_id: Option<&str>,
        new_content: &str,
        max_words: usize,
    ) -> bool {
        self.inner
            .maintain_memory(thread_id, new_content, max_words)
            .await
    }

    pub async fn delete_memory(&self, thread_id: Option<&str>) -> bool {
        self.inner.delete_memory(thread_id).await
    }
}
