//! A conversation flow that keeps its own rolling memory
//!
//! Every flow invocation receives a [`FlowContext`] carrying the shared
//! memory manager. This flow reads the thread's summary before answering and
//! appends the new prompt afterwards, trimmed to the configured word ceiling.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example memory_flow
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use colloquy::prelude::*;

struct RememberingFlow;

#[async_trait]
impl ConversationFlow for RememberingFlow {
    async fn get_conversation_response(
        &self,
        ctx: &FlowContext,
        request: ChatRequest,
    ) -> Result<FlowReply> {
        let thread_id = request.thread_id.as_deref();

        let remembered = match &ctx.memory {
            Some(manager) => manager.read_memory(thread_id, "nothing yet").await,
            None => "nothing yet".to_string(),
        };
        let answer = format!(
            "I remember: \"{remembered}\". You just said: \"{}\"",
            request.user_prompt
        );

        if let Some(manager) = &ctx.memory {
            manager
                .maintain_memory(thread_id, &request.user_prompt, ctx.config.memory_max_words)
                .await;
        }

        Ok(answer.into())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("Colloquy Memory Flow Example\n");

    let memory_root = std::env::temp_dir().join("colloquy-memory-example");
    let memory = Arc::new(MemoryManager::new(Arc::new(LocalFileStorage::new(
        &memory_root,
    ))));
    memory.delete_memory(Some("demo-thread")).await;

    // A small word ceiling so the trimming is visible.
    let service = Arc::new(
        ChatService::builder()
            .register_flow("rememberer", Arc::new(RememberingFlow))
            .memory(memory.clone())
            .config(EngineConfig::new().memory_max_words(8))
            .build(),
    );

    for prompt in ["my name is Dana", "I play tennis", "I live in Lisbon"] {
        let response = service
            .get_chat_response(ChatRequest::new(prompt, "rememberer").with_thread_id("demo-thread"))
            .await?;
        println!("> {prompt}");
        println!("  {}\n", response.agent_response);
    }

    println!(
        "Final memory (last 8 words): {}",
        memory.read_memory(Some("demo-thread"), "").await
    );

    Ok(())
}
