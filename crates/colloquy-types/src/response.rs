use serde::{Deserialize, Serialize};

/// Canonical response shape every invocation path converges to.
///
/// Immutable once returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub thread_id: String,
    pub message_id: String,
    pub agent_response: String,
    #[serde(default)]
    pub token_count: u32,
    #[serde(default)]
    pub max_token_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followup_questions: Option<Vec<String>>,
}

impl ChatResponse {
    pub fn new(thread_id: impl Into<String>, agent_response: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            message_id: uuid::Uuid::new_v4().to_string(),
            agent_response: agent_response.into(),
            token_count: 0,
            max_token_count: 0,
            memory_summary: None,
            topic: None,
            event_type: None,
            followup_questions: None,
        }
    }

    pub fn with_memory_summary(mut self, summary: impl Into<String>) -> Self {
        self.memory_summary = Some(summary.into());
        self
    }

    pub fn with_token_counts(mut self, token_count: u32, max_token_count: u32) -> Self {
        self.token_count = token_count;
        self.max_token_count = max_token_count;
        self
    }
}

/// Discriminator for streamed response chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkType {
    Content,
    Final,
    Error,
}

/// One element of a streamed response.
///
/// Exactly one chunk per stream has `is_final = true` and it is the last one
/// emitted. `content` is present only on `Content` chunks; token counts only
/// on the `Final` chunk; `error` only on `Error` chunks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponseChunk {
    pub thread_id: String,
    pub message_id: String,
    pub chunk_type: ChunkType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_token_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub is_final: bool,
}

impl ChatResponseChunk {
    pub fn content(
        thread_id: impl Into<String>,
        message_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            thread_id: thread_id.into(),
            message_id: message_id.into(),
            chunk_type: ChunkType::Content,
            content: Some(content.into()),
            token_count: None,
            max_token_count: None,
            error: None,
            is_final: false,
        }
    }

    /// Terminal metadata chunk built from the full response.
    pub fn final_chunk(response: &ChatResponse) -> Self {
        Self {
            thread_id: response.thread_id.clone(),
            message_id: response.message_id.clone(),
            chunk_type: ChunkType::Final,
            content: None,
            token_count: Some(response.token_count),
            max_token_count: Some(response.max_token_count),
            error: None,
            is_final: true,
        }
    }

    /// Terminal error chunk; the stream never continues after it.
    pub fn error(
        thread_id: impl Into<String>,
        message_id: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            thread_id: thread_id.into(),
            message_id: message_id.into(),
            chunk_type: ChunkType::Error,
            content: None,
            token_count: None,
            max_token_count: None,
            error: Some(error.into()),
            is_final: true,
        }
    }
}
