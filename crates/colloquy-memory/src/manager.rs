use std::sync::Arc;

use crate::storage::FileStorage;

const MEMORY_FILE_NAME: &str = "memory.md";

/// Storage-abstracted read/write/truncate of a per-thread rolling summary.
///
/// Every operation degrades gracefully: conversation flow must never crash
/// because memory storage is temporarily unavailable, so failures surface as
/// the caller-supplied default (reads) or `false` (mutations) and are logged.
pub struct MemoryManager {
    storage: Arc<dyn FileStorage>,
    root: String,
}

impl MemoryManager {
    pub fn new(storage: Arc<dyn FileStorage>) -> Self {
        Self::with_root(storage, "memory")
    }

    pub fn with_root(storage: Arc<dyn FileStorage>, root: impl Into<String>) -> Self {
        Self {
            storage,
            root: root.into(),
        }
    }

    fn location(&self, thread_id: Option<&str>) -> String {
        match thread_id {
            Some(thread_id) => format!("{}/{}", self.root, thread_id),
            None => self.root.clone(),
        }
    }

    /// Current memory context, or `default` when absent or unreadable.
    pub async fn read_memory(&self, thread_id: Option<&str>, default: &str) -> String {
        match self
            .storage
            .read(MEMORY_FILE_NAME, &self.location(thread_id))
            .await
        {
            Ok(content) if !content.is_empty() => content,
            Ok(_) => default.to_string(),
            Err(e) => {
                tracing::error!(?thread_id, "failed to read memory: {e:#}");
                default.to_string()
            }
        }
    }

    /// Replace the memory context wholesale.
    pub async fn write_memory(&self, thread_id: Option<&str>, content: &str) -> bool {
        match self
            .storage
            .write(content, MEMORY_FILE_NAME, &self.location(thread_id))
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(?thread_id, "failed to write memory: {e:#}");
                false
            }
        }
    }

    /// Append `new_content` and trim the result to the last `max_words`
    /// whitespace-delimited tokens.
    ///
    /// NOT idempotent under repeated identical calls: each call appends the
    /// text again. Callers own de-duplication of retried updates.
    pub async fn maintain_memory(
        &self,
        thread_id: Option<&str>,
        new_content: &str,
        max_words: usize,
    ) -> bool {
        let location = self.location(thread_id);
        let current = match self.storage.read(MEMORY_FILE_NAME, &location).await {
            Ok(content) => content,
            Err(e) => {
                tracing::error!(?thread_id, "failed to read memory for maintenance: {e:#}");
                return false;
            }
        };

        let combined = format!("{} {}", current, new_content);
        let words: Vec<&str> = combined.split_whitespace().collect();
        let start = words.len().saturating_sub(max_words);
        let trimmed = words[start..].join(" ");

        match self
            .storage
            .write(&trimmed, MEMORY_FILE_NAME, &location)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(?thread_id, "failed to write maintained memory: {e:#}");
                false
            }
        }
    }

    /// Drop the memory context entirely.
    pub async fn delete_memory(&self, thread_id: Option<&str>) -> bool {
        match self
            .storage
            .delete(MEMORY_FILE_NAME, &self.location(thread_id))
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(?thread_id, "failed to delete memory: {e:#}");
                false
            }
        }
    }
}
