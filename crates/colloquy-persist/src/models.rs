use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Database-agnostic persisted message.
///
/// Messages are append-only: a thread's ordered rows reconstruct its
/// conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub thread_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub role: MessageRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_filter_results: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
    MemoryAssistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::MemoryAssistant => "memory_assistant",
        }
    }
}

impl Message {
    pub fn new(
        thread_id: impl Into<String>,
        user_id: Option<String>,
        role: MessageRole,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            thread_id: thread_id.into(),
            user_id,
            role,
            content: content.into(),
            tool_calls: None,
            content_filter_results: None,
            created_at: Utc::now(),
        }
    }

    pub fn user(
        thread_id: impl Into<String>,
        user_id: Option<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::new(thread_id, user_id, MessageRole::User, content)
    }

    pub fn assistant(
        thread_id: impl Into<String>,
        user_id: Option<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::new(thread_id, user_id, MessageRole::Assistant, content)
    }

    pub fn memory(
        thread_id: impl Into<String>,
        user_id: Option<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::new(thread_id, user_id, MessageRole::MemoryAssistant, content)
    }

    pub fn with_content_filter_results(mut self, results: serde_json::Value) -> Self {
        self.content_filter_results = Some(results);
        self
    }

    /// Whether this message was flagged by a content filter.
    ///
    /// A null or empty blob counts as unflagged.
    pub fn is_content_filtered(&self) -> bool {
        match &self.content_filter_results {
            None => false,
            Some(serde_json::Value::Null) => false,
            Some(serde_json::Value::Object(map)) => !map.is_empty(),
            Some(serde_json::Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }
}
