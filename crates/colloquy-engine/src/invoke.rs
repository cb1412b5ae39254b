use std::sync::Arc;

use crate::error::{ChatError, Result};
use crate::flow::{ConversationFlow, FlowContext, FlowReply};
use colloquy_types::{ChatRequest, ChatResponse};

/// Normalize any flow reply into the canonical response shape.
///
/// Canonical responses pass through (with a fresh message id if the flow
/// left it empty); `(text, summary)` pairs and bare strings are wrapped with
/// a freshly generated message id and zero token counts.
pub fn normalize_reply(reply: FlowReply, thread_id: &str) -> ChatResponse {
    match reply {
        FlowReply::Response(mut response) => {
            if response.thread_id.is_empty() {
                response.thread_id = thread_id.to_string();
            }
            if response.message_id.is_empty() {
                response.message_id = uuid::Uuid::new_v4().to_string();
            }
            response
        }
        FlowReply::TextWithSummary { text, summary } => {
            ChatResponse::new(thread_id, text).with_memory_summary(summary)
        }
        FlowReply::Text(text) => ChatResponse::new(thread_id, text),
    }
}

/// Invoke a resolved flow and normalize its reply.
///
/// A flow failure is fatal for the request: logged with workflow name and
/// thread id, then surfaced unchanged. Never retried.
pub(crate) async fn invoke_flow(
    flow: &Arc<dyn ConversationFlow>,
    ctx: &FlowContext,
    request: ChatRequest,
) -> Result<ChatResponse> {
    let flow_name = request.conversation_flow.clone();
    let thread_id = request.thread_id.clone().unwrap_or_default();

    match flow.get_conversation_response(ctx, request).await {
        Ok(reply) => Ok(normalize_reply(reply, &thread_id)),
        Err(source) => {
            tracing::error!(
                flow = %flow_name,
                thread_id = %thread_id,
                "conversation flow failed: {source:#}"
            );
            Err(ChatError::Invocation {
                flow: flow_name,
                source,
            })
        }
    }
}
