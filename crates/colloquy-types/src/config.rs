use serde::{Deserialize, Serialize};

/// Tunables injected into the dispatcher at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Character length of each streamed content chunk.
    pub chunk_size: usize,
    /// How many trailing messages feed the reconstructed memory string.
    pub history_limit: usize,
    /// Per-message content prefix length used in the memory string.
    pub history_content_chars: usize,
    /// Word ceiling enforced by the memory manager's maintain operation.
    pub memory_max_words: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_size: 100,
            history_limit: 10,
            history_content_chars: 200,
            memory_max_words: 200,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }

    pub fn history_content_chars(mut self, history_content_chars: usize) -> Self {
        self.history_content_chars = history_content_chars;
        self
    }

    pub fn memory_max_words(mut self, memory_max_words: usize) -> Self {
        self.memory_max_words = memory_max_words;
        self
    }
}
