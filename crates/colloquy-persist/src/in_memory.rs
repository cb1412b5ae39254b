use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::Result;
use crate::models::Message;
use crate::repository::ChatHistoryRepository;

/// Process-local history store for tests, demos and single-node deployments.
///
/// Memory summaries are kept beside the transcript, not in it, so
/// `get_thread_messages` only ever returns the visible conversation.
#[derive(Default)]
pub struct InMemoryHistoryRepository {
    threads: RwLock<HashMap<String, Vec<Message>>>,
    memories: RwLock<HashMap<String, Vec<Message>>>,
}

impl InMemoryHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thread_count(&self) -> usize {
        self.threads.read().len()
    }

    /// Memory-summary rows recorded for a thread, oldest first.
    pub fn thread_memories(&self, thread_id: &str) -> Vec<Message> {
        self.memories
            .read()
            .get(thread_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatHistoryRepository for InMemoryHistoryRepository {
    async fn get_thread_messages(&self, thread_id: &str) -> Result<Vec<Message>> {
        let threads = self.threads.read();
        let mut messages = threads.get(thread_id).cloned().unwrap_or_default();
        messages.sort_by_key(|m| m.created_at);
        Ok(messages)
    }

    async fn add_message(&self, message: Message) -> Result<String> {
        let id = message.id.clone();
        self.threads
            .write()
            .entry(message.thread_id.clone())
            .or_default()
            .push(message);
        Ok(id)
    }

    async fn add_memory(&self, message: Message) -> Result<String> {
        let id = message.id.clone();
        self.memories
            .write()
            .entry(message.thread_id.clone())
            .or_default()
            .push(message);
        Ok(id)
    }
}
