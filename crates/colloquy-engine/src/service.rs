use std::sync::Arc;

use crate::builder::ChatServiceBuilder;
use crate::error::{ChatError, Result};
use crate::flow::{ConversationFlow, FlowContext};
use crate::invoke::invoke_flow;
use crate::registry::FlowRegistry;
use colloquy_memory::MemoryManager;
use colloquy_persist::{ChatHistoryRepository, Message};
use colloquy_types::{ChatRequest, ChatResponse, EngineConfig, HistoryEntry};

/// Session orchestrator: the top-level coordinator between an inbound chat
/// request and the pool of conversation flows.
///
/// Per request the pipeline is: resolve/create the thread id, reconstruct
/// recent history into the request's memory string, resolve and invoke the
/// flow, normalize its reply, persist the exchange. Terminal on the first
/// failure; a request that fails before invocation never persists anything.
pub struct ChatService {
    pub(crate) registry: Arc<FlowRegistry>,
    pub(crate) repository: Option<Arc<dyn ChatHistoryRepository>>,
    pub(crate) memory: Option<Arc<MemoryManager>>,
    pub(crate) config: EngineConfig,
}

impl ChatService {
    /// Create a builder for fluent construction
    pub fn builder() -> ChatServiceBuilder {
        ChatServiceBuilder::new()
    }

    pub(crate) fn new_with_config(
        registry: Arc<FlowRegistry>,
        repository: Option<Arc<dyn ChatHistoryRepository>>,
        memory: Option<Arc<MemoryManager>>,
        config: EngineConfig,
    ) -> Self {
        Self {
            registry,
            repository,
            memory,
            config,
        }
    }

    pub fn registry(&self) -> &FlowRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub(crate) fn flow_context(&self) -> FlowContext {
        FlowContext {
            config: self.config.clone(),
            memory: self.memory.clone(),
        }
    }

    /// Dispatch one request end to end and return the canonical response.
    pub async fn get_chat_response(&self, request: ChatRequest) -> Result<ChatResponse> {
        let (request, flow) = self.prepare(request).await?;
        self.dispatch_prepared(request, flow).await
    }

    /// Thread resolution, history reconstruction and flow resolution: the
    /// shared front half of both the plain and the streaming paths.
    pub(crate) async fn prepare(
        &self,
        mut request: ChatRequest,
    ) -> Result<(ChatRequest, Arc<dyn ConversationFlow>)> {
        if request.user_prompt.trim().is_empty() {
            return Err(ChatError::Configuration(
                "user_prompt must not be empty".to_string(),
            ));
        }
        if request.conversation_flow.trim().is_empty() {
            return Err(ChatError::Configuration(
                "conversation_flow must not be empty".to_string(),
            ));
        }

        let thread_id = request
            .thread_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        request.thread_id = Some(thread_id.clone());
        request.normalize_topic();

        if let Some(repository) = &self.repository {
            match repository.get_thread_messages(&thread_id).await {
                Ok(messages) => {
                    if let Some(filtered) = messages.iter().find(|m| m.is_content_filtered()) {
                        tracing::warn!(
                            thread_id = %thread_id,
                            message_id = %filtered.id,
                            "aborting dispatch: thread contains a content-filtered message"
                        );
                        return Err(ChatError::ContentFilter { thread_id });
                    }
                    request.thread_memory = build_thread_memory(
                        &messages,
                        self.config.history_limit,
                        self.config.history_content_chars,
                    );
                    request.thread_chat_history = messages
                        .iter()
                        .map(|m| HistoryEntry::new(m.role.as_str(), &m.content))
                        .collect();
                }
                Err(e) => {
                    tracing::warn!(
                        thread_id = %thread_id,
                        "failed to load thread history, continuing with empty context: {e}"
                    );
                }
            }
        }

        let flow = self.registry.resolve(&request.conversation_flow)?;
        Ok((request, flow))
    }

    /// Back half of dispatch: invoke the already-resolved flow, stamp ids,
    /// persist the turn.
    pub(crate) async fn dispatch_prepared(
        &self,
        request: ChatRequest,
        flow: Arc<dyn ConversationFlow>,
    ) -> Result<ChatResponse> {
        let thread_id = request.thread_id.clone().unwrap_or_default();
        let user_id = request.user_id.clone();
        let user_prompt = request.user_prompt.clone();
        let memory_record = request.memory_record;

        let mut response = invoke_flow(&flow, &self.flow_context(), request).await?;
        response.thread_id = thread_id.clone();

        if memory_record && user_id.is_some() {
            self.persist_turn(&thread_id, user_id, &user_prompt, &response)
                .await;
        }

        Ok(response)
    }

    /// Record the exchange: user message, assistant message, then the memory
    /// summary if the flow produced one. Failures are logged and swallowed;
    /// the caller still receives the already-computed response. A failed
    /// write abandons the rest of the sequence so a later row never exists
    /// without its predecessor.
    async fn persist_turn(
        &self,
        thread_id: &str,
        user_id: Option<String>,
        user_prompt: &str,
        response: &ChatResponse,
    ) {
        let Some(repository) = &self.repository else {
            return;
        };

        let user_message = Message::user(thread_id, user_id.clone(), user_prompt);
        if let Err(e) = repository.add_message(user_message).await {
            tracing::error!(thread_id = %thread_id, "failed to persist user message: {e}");
            return;
        }

        let mut assistant_message =
            Message::assistant(thread_id, user_id.clone(), &response.agent_response);
        // Keep the persisted row aligned with the id the caller sees.
        assistant_message.id = response.message_id.clone();
        if let Err(e) = repository.add_message(assistant_message).await {
            tracing::error!(thread_id = %thread_id, "failed to persist assistant message: {e}");
            return;
        }

        if let Some(summary) = &response.memory_summary {
            let memory_message = Message::memory(thread_id, user_id, summary);
            if let Err(e) = repository.add_memory(memory_message).await {
                tracing::error!(thread_id = %thread_id, "failed to persist memory summary: {e}");
            }
        }
    }
}

/// Trimmed memory string: the last `limit` messages rendered as
/// `role: <content prefix>`, newline-joined.
fn build_thread_memory(messages: &[Message], limit: usize, content_chars: usize) -> String {
    let start = messages.len().saturating_sub(limit);
    messages[start..]
        .iter()
        .map(|m| {
            let prefix: String = m.content.chars().take(content_chars).collect();
            format!("{}: {}", m.role.as_str(), prefix)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
