use async_trait::async_trait;

use crate::error::Result;
use crate::models::Message;

/// Chat history store the dispatcher reads and writes around each turn.
///
/// Every call is a possibly-failing async boundary; callers decide whether a
/// failure is fatal (reads feeding a content-filter check) or recoverable
/// (post-response writes).
#[async_trait]
pub trait ChatHistoryRepository: Send + Sync {
    /// All messages of a thread in chronological order.
    async fn get_thread_messages(&self, thread_id: &str) -> Result<Vec<Message>>;

    /// Append a user/assistant message, returning its id.
    async fn add_message(&self, message: Message) -> Result<String>;

    /// Append a memory-summary message, returning its id.
    async fn add_memory(&self, message: Message) -> Result<String>;
}
