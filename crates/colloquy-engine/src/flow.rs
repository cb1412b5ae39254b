use std::pin::Pin;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::Stream;

use colloquy_memory::MemoryManager;
use colloquy_types::{ChatRequest, ChatResponse, ChatResponseChunk, EngineConfig, HistoryEntry};

/// Lazy, finite, non-restartable chunk sequence.
pub type ChunkStream = Pin<Box<dyn Stream<Item = ChatResponseChunk> + Send>>;

/// Handle onto the dispatcher that every flow receives with its invocation.
///
/// Cheap to clone; carries the engine tunables and the shared memory manager
/// (absent when the deployment runs without conversation memory).
#[derive(Clone)]
pub struct FlowContext {
    pub config: EngineConfig,
    pub memory: Option<Arc<MemoryManager>>,
}

/// The shapes a flow may return.
///
/// Canonical responses pass through dispatch untouched; pairs and bare
/// strings are wrapped into the canonical shape by the invocation adapter.
#[derive(Debug)]
pub enum FlowReply {
    Response(ChatResponse),
    TextWithSummary { text: String, summary: String },
    Text(String),
}

impl From<ChatResponse> for FlowReply {
    fn from(response: ChatResponse) -> Self {
        FlowReply::Response(response)
    }
}

impl From<String> for FlowReply {
    fn from(text: String) -> Self {
        FlowReply::Text(text)
    }
}

impl From<&str> for FlowReply {
    fn from(text: &str) -> Self {
        FlowReply::Text(text.to_string())
    }
}

impl From<(String, String)> for FlowReply {
    fn from((text, summary): (String, String)) -> Self {
        FlowReply::TextWithSummary { text, summary }
    }
}

/// The single interface every conversation flow implements.
///
/// Legacy calling conventions are wrapped behind this trait at registration
/// time ([`LegacyFlowAdapter`], [`FnFlow`]); the dispatch path never inspects
/// signatures.
#[async_trait]
pub trait ConversationFlow: Send + Sync {
    /// Produce the flow's reply for one fully prepared request.
    async fn get_conversation_response(
        &self,
        ctx: &FlowContext,
        request: ChatRequest,
    ) -> Result<FlowReply>;

    /// Whether the flow produces its own chunk sequence. When true, the
    /// streaming adapter delegates entirely to
    /// [`get_streaming_conversation_response`](Self::get_streaming_conversation_response)
    /// and the flow owns chunk boundaries and the final marker.
    fn streams_natively(&self) -> bool {
        false
    }

    async fn get_streaming_conversation_response(
        &self,
        _ctx: FlowContext,
        _request: ChatRequest,
    ) -> Result<ChunkStream> {
        anyhow::bail!("flow does not implement native streaming")
    }
}

/// Legacy multi-argument convention: flows written against the individual
/// request fields instead of the request object.
#[async_trait]
pub trait LegacyConversationFlow: Send + Sync {
    async fn converse(
        &self,
        user_prompt: &str,
        topics: &[String],
        thread_memory: &str,
        memory_record: bool,
        thread_chat_history: &[HistoryEntry],
    ) -> Result<FlowReply>;
}

/// Registration-time shim presenting a legacy flow through the new interface.
pub struct LegacyFlowAdapter<F> {
    inner: F,
}

impl<F: LegacyConversationFlow> LegacyFlowAdapter<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<F: LegacyConversationFlow> ConversationFlow for LegacyFlowAdapter<F> {
    async fn get_conversation_response(
        &self,
        _ctx: &FlowContext,
        request: ChatRequest,
    ) -> Result<FlowReply> {
        let topics = request.topics();
        self.inner
            .converse(
                &request.user_prompt,
                &topics,
                &request.thread_memory,
                request.memory_record,
                &request.thread_chat_history,
            )
            .await
    }
}

/// Whole-request closure flow: the legacy single-parameter convention, and a
/// convenient way to wire small flows in tests and demos.
pub struct FnFlow {
    f: Box<dyn Fn(ChatRequest) -> BoxFuture<'static, Result<FlowReply>> + Send + Sync>,
}

impl FnFlow {
    pub fn new<F, Fut, R>(f: F) -> Self
    where
        F: Fn(ChatRequest) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<R>> + Send + 'static,
        R: Into<FlowReply> + Send + 'static,
    {
        Self {
            f: Box::new(move |request| {
                let fut = f(request);
                Box::pin(async move { fut.await.map(Into::into) })
            }),
        }
    }
}

#[async_trait]
impl ConversationFlow for FnFlow {
    async fn get_conversation_response(
        &self,
        _ctx: &FlowContext,
        request: ChatRequest,
    ) -> Result<FlowReply> {
        (self.f)(request).await
    }
}
