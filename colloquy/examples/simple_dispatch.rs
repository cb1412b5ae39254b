//! Minimal dispatch example
//!
//! Registers two conversation flows, runs a couple of turns on one thread
//! and prints what the history store recorded.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example simple_dispatch
//! ```

use std::sync::Arc;

use colloquy::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("Colloquy Simple Dispatch Example\n");

    // Wire the service: two flows and an in-memory history store.
    let repository = Arc::new(InMemoryHistoryRepository::new());
    let service = Arc::new(
        ChatService::builder()
            .register_fn_flow("greeter", |request: ChatRequest| async move {
                Ok(format!("Hello! You said: {}", request.user_prompt))
            })
            .register_fn_flow("summarizer", |request: ChatRequest| async move {
                // (text, summary) pairs normalize into a canonical response
                // with the summary recorded as a memory row.
                Ok((
                    format!("Summarized {} chars", request.user_prompt.len()),
                    format!("user wrote about: {}", request.user_prompt),
                ))
            })
            .repository(repository.clone() as Arc<dyn ChatHistoryRepository>)
            .build(),
    );

    // First turn: no thread id, the dispatcher generates one.
    let response = service
        .get_chat_response(ChatRequest::new("good morning", "greeter").with_user("user_123", "Dana"))
        .await?;
    println!("[greeter] {}", response.agent_response);
    println!("          thread {}\n", response.thread_id);

    // Second turn on the same thread. Flow names resolve with hyphens or
    // underscores interchangeably.
    let response = service
        .get_chat_response(
            ChatRequest::new("please condense my notes", "summarizer")
                .with_thread_id(&response.thread_id)
                .with_user("user_123", "Dana"),
        )
        .await?;
    println!("[summarizer] {}", response.agent_response);
    println!("             summary: {:?}\n", response.memory_summary);

    // What the store now holds for the thread.
    let messages = repository.get_thread_messages(&response.thread_id).await?;
    println!("Thread transcript ({} messages):", messages.len());
    for message in &messages {
        println!("  [{}] {}", message.role.as_str(), message.content);
    }

    Ok(())
}
