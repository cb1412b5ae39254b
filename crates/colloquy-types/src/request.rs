use serde::{Deserialize, Serialize};

/// Inbound chat request routed to a conversation flow.
///
/// `thread_memory` and `thread_chat_history` are scratch fields: they arrive
/// empty and are populated by the dispatcher before the flow runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    pub user_prompt: String,
    #[serde(default)]
    pub topic: Option<Topic>,
    pub conversation_flow: String,
    #[serde(default = "default_memory_record")]
    pub memory_record: bool,
    #[serde(default)]
    pub thread_memory: String,
    #[serde(default)]
    pub thread_chat_history: Vec<HistoryEntry>,
}

fn default_memory_record() -> bool {
    true
}

impl ChatRequest {
    pub fn new(user_prompt: impl Into<String>, conversation_flow: impl Into<String>) -> Self {
        Self {
            thread_id: None,
            user_id: None,
            user_name: None,
            user_prompt: user_prompt.into(),
            topic: None,
            conversation_flow: conversation_flow.into(),
            memory_record: true,
            thread_memory: String::new(),
            thread_chat_history: Vec::new(),
        }
    }

    pub fn with_thread_id(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self.user_name = Some(user_name.into());
        self
    }

    pub fn with_topic(mut self, topic: Topic) -> Self {
        self.topic = Some(topic);
        self
    }

    pub fn with_memory_record(mut self, memory_record: bool) -> Self {
        self.memory_record = memory_record;
        self
    }

    /// Convert a comma-delimited single-string topic into a trimmed list.
    ///
    /// Idempotent: an already-normalized list is left untouched.
    pub fn normalize_topic(&mut self) {
        if let Some(Topic::One(raw)) = &self.topic {
            let topics: Vec<String> = raw
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
            self.topic = Some(Topic::Many(topics));
        }
    }

    /// Topic list as the flow sees it (empty if no topic was supplied).
    pub fn topics(&self) -> Vec<String> {
        match &self.topic {
            Some(Topic::One(raw)) => raw
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            Some(Topic::Many(list)) => list.clone(),
            None => Vec::new(),
        }
    }
}

/// Topic selector: a single comma-delimited string or an explicit list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Topic {
    One(String),
    Many(Vec<String>),
}

/// One reconstructed turn of a thread's conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
}

impl HistoryEntry {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}
