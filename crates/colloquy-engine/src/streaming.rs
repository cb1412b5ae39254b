use std::sync::Arc;

use futures::StreamExt;

use crate::flow::ChunkStream;
use crate::service::ChatService;
use colloquy_types::{ChatRequest, ChatResponseChunk};

impl ChatService {
    /// Streaming adapter over the dispatch path.
    ///
    /// Flows with native streaming support own the entire chunk sequence,
    /// including the final marker. Everything else runs the full dispatch
    /// once and gets its response sliced into fixed-size content chunks
    /// followed by exactly one final metadata chunk. Any failure ends the
    /// stream with a single error chunk; the stream never continues after
    /// it. Cancellation is cooperative: drop the stream to stop.
    pub fn get_streaming_chat_response(self: &Arc<Self>, request: ChatRequest) -> ChunkStream {
        let service = Arc::clone(self);

        Box::pin(async_stream::stream! {
            let requested_thread = request.thread_id.clone().unwrap_or_default();

            let (request, flow) = match service.prepare(request).await {
                Ok(prepared) => prepared,
                Err(e) => {
                    yield ChatResponseChunk::error(
                        requested_thread,
                        uuid::Uuid::new_v4().to_string(),
                        e.to_string(),
                    );
                    return;
                }
            };
            let thread_id = request.thread_id.clone().unwrap_or_default();

            if flow.streams_natively() {
                match flow
                    .get_streaming_conversation_response(service.flow_context(), request)
                    .await
                {
                    Ok(mut native) => {
                        while let Some(chunk) = native.next().await {
                            yield chunk;
                        }
                    }
                    Err(e) => {
                        tracing::error!(thread_id = %thread_id, "native streaming failed: {e:#}");
                        yield ChatResponseChunk::error(
                            thread_id,
                            uuid::Uuid::new_v4().to_string(),
                            e.to_string(),
                        );
                    }
                }
                return;
            }

            match service.dispatch_prepared(request, flow).await {
                Ok(response) => {
                    let chunk_size = service.config.chunk_size.max(1);
                    let chars: Vec<char> = response.agent_response.chars().collect();
                    for piece in chars.chunks(chunk_size) {
                        yield ChatResponseChunk::content(
                            response.thread_id.as_str(),
                            response.message_id.as_str(),
                            piece.iter().collect::<String>(),
                        );
                    }
                    yield ChatResponseChunk::final_chunk(&response);
                }
                Err(e) => {
                    yield ChatResponseChunk::error(
                        thread_id,
                        uuid::Uuid::new_v4().to_string(),
                        e.to_string(),
                    );
                }
            }
        })
    }
}
