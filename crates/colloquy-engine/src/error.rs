use thiserror::Error;

/// Dispatch error taxonomy.
///
/// Everything here is fatal for the request it occurs in and crosses the
/// orchestration boundary unchanged; recoverable conditions (persistence and
/// memory-storage failures) are absorbed where they happen and surface only
/// through logs.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Carries the original, non-normalized workflow name so callers can
    /// diagnose typos.
    #[error("Conversation flow not found: {0}")]
    FlowNotFound(String),

    /// A persisted message in the thread was previously content-filtered;
    /// the caller should start a new thread.
    #[error("Thread {thread_id} contains a content-filtered message")]
    ContentFilter { thread_id: String },

    #[error("Conversation flow '{flow}' failed: {source}")]
    Invocation {
        flow: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Persistence error: {0}")]
    Persistence(String),
}

pub type Result<T> = std::result::Result<T, ChatError>;
