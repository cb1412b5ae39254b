use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use pretty_assertions::assert_eq;

use colloquy_engine::{
    ChatService, ChunkStream, ConversationFlow, FlowContext, FlowReply,
};
use colloquy_types::{ChatRequest, ChatResponse, ChatResponseChunk, ChunkType, EngineConfig};

async fn collect(service: &Arc<ChatService>, request: ChatRequest) -> Vec<ChatResponseChunk> {
    service.get_streaming_chat_response(request).collect().await
}

fn sliced_service(reply: String, chunk_size: usize) -> Arc<ChatService> {
    Arc::new(
        ChatService::builder()
            .register_fn_flow("slow-agent", move |_request: ChatRequest| {
                let reply = reply.clone();
                async move { Ok(reply) }
            })
            .config(EngineConfig::new().chunk_size(chunk_size))
            .build(),
    )
}

#[tokio::test]
async fn slices_the_full_response_into_fixed_size_chunks() {
    let text = "x".repeat(250);
    let service = sliced_service(text.clone(), 100);

    let chunks = collect(&service, ChatRequest::new("hi", "slow-agent")).await;

    // ceil(250 / 100) content chunks plus one final chunk.
    assert_eq!(chunks.len(), 4);
    assert!(chunks[..3]
        .iter()
        .all(|c| c.chunk_type == ChunkType::Content && !c.is_final));

    let reassembled: String = chunks[..3]
        .iter()
        .map(|c| c.content.clone().unwrap())
        .collect();
    assert_eq!(reassembled, text);

    let last = &chunks[3];
    assert_eq!(last.chunk_type, ChunkType::Final);
    assert!(last.is_final);
    assert_eq!(last.content, None);
    assert_eq!(chunks.iter().filter(|c| c.is_final).count(), 1);
}

#[tokio::test]
async fn exact_multiple_of_chunk_size_has_no_trailing_sliver() {
    let service = sliced_service("y".repeat(200), 100);

    let chunks = collect(&service, ChatRequest::new("hi", "slow-agent")).await;

    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].content.as_ref().unwrap().len(), 100);
    assert_eq!(chunks[1].content.as_ref().unwrap().len(), 100);
    assert_eq!(chunks[2].chunk_type, ChunkType::Final);
}

#[tokio::test]
async fn content_chunks_share_the_final_message_id() {
    let service = sliced_service("z".repeat(150), 100);

    let chunks = collect(&service, ChatRequest::new("hi", "slow-agent")).await;
    let message_id = chunks.last().unwrap().message_id.clone();

    assert!(!message_id.is_empty());
    assert!(chunks.iter().all(|c| c.message_id == message_id));
}

#[tokio::test]
async fn empty_response_emits_only_the_final_chunk() {
    let service = sliced_service(String::new(), 100);

    let chunks = collect(&service, ChatRequest::new("hi", "slow-agent")).await;

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].chunk_type, ChunkType::Final);
    assert!(chunks[0].is_final);
}

#[tokio::test]
async fn unknown_flow_yields_a_single_error_chunk() {
    let service = Arc::new(ChatService::builder().build());

    let chunks = collect(&service, ChatRequest::new("hi", "does-not-exist")).await;

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].chunk_type, ChunkType::Error);
    assert!(chunks[0].is_final);
    assert!(chunks[0].error.as_ref().unwrap().contains("does-not-exist"));
}

struct FailingFlow;

#[async_trait]
impl ConversationFlow for FailingFlow {
    async fn get_conversation_response(
        &self,
        _ctx: &FlowContext,
        _request: ChatRequest,
    ) -> anyhow::Result<FlowReply> {
        anyhow::bail!("model unavailable")
    }
}

#[tokio::test]
async fn flow_failure_yields_a_single_error_chunk() {
    let service = Arc::new(
        ChatService::builder()
            .register_flow("broken-agent", Arc::new(FailingFlow))
            .build(),
    );

    let chunks = collect(&service, ChatRequest::new("hi", "broken-agent")).await;

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].chunk_type, ChunkType::Error);
    assert!(chunks[0].is_final);
}

struct NativeStreamingFlow;

#[async_trait]
impl ConversationFlow for NativeStreamingFlow {
    async fn get_conversation_response(
        &self,
        _ctx: &FlowContext,
        _request: ChatRequest,
    ) -> anyhow::Result<FlowReply> {
        Ok(FlowReply::Text("alpha beta".to_string()))
    }

    fn streams_natively(&self) -> bool {
        true
    }

    async fn get_streaming_conversation_response(
        &self,
        _ctx: FlowContext,
        request: ChatRequest,
    ) -> anyhow::Result<ChunkStream> {
        let thread_id = request.thread_id.clone().unwrap_or_default();
        Ok(Box::pin(async_stream::stream! {
            yield ChatResponseChunk::content(thread_id.as_str(), "m-native", "alpha ");
            yield ChatResponseChunk::content(thread_id.as_str(), "m-native", "beta");
            let mut response = ChatResponse::new(thread_id.as_str(), "alpha beta");
            response.message_id = "m-native".to_string();
            yield ChatResponseChunk::final_chunk(&response);
        }))
    }
}

#[tokio::test]
async fn native_streaming_flows_own_the_chunk_sequence() {
    let service = Arc::new(
        ChatService::builder()
            .register_flow("streamer", Arc::new(NativeStreamingFlow))
            .build(),
    );

    let chunks = collect(
        &service,
        ChatRequest::new("hi", "streamer").with_thread_id("t-native"),
    )
    .await;

    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].content.as_deref(), Some("alpha "));
    assert_eq!(chunks[1].content.as_deref(), Some("beta"));
    assert_eq!(chunks[2].chunk_type, ChunkType::Final);
    assert!(chunks.iter().all(|c| c.thread_id == "t-native"));
    assert_eq!(chunks.iter().filter(|c| c.is_final).count(), 1);
}
