use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing_subscriber::EnvFilter;

use colloquy_engine::{ChatService, FlowReply, LegacyConversationFlow};
use colloquy_memory::{LocalFileStorage, MemoryManager};
use colloquy_persist::{ChatHistoryRepository, InMemoryHistoryRepository};
use colloquy_types::{ChatRequest, HistoryEntry, Topic};

/// A flow still written against the old multi-argument convention.
struct SummarizingFlow;

#[async_trait]
impl LegacyConversationFlow for SummarizingFlow {
    async fn converse(
        &self,
        user_prompt: &str,
        topics: &[String],
        thread_memory: &str,
        _memory_record: bool,
        _thread_chat_history: &[HistoryEntry],
    ) -> Result<FlowReply> {
        let answer = if thread_memory.is_empty() {
            format!("Noted ({}): {}", topics.join("/"), user_prompt)
        } else {
            format!("Building on earlier turns: {}", user_prompt)
        };
        Ok((answer, format!("user mentioned: {user_prompt}")).into())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("Colloquy - Dispatch Example");
    println!("===========================\n");

    // 1. Wire the service: two flows, an in-memory history store and a
    //    filesystem-backed memory manager.
    let repository = Arc::new(InMemoryHistoryRepository::new());
    let memory_root = std::env::temp_dir().join("colloquy-demo");
    let memory = Arc::new(MemoryManager::new(Arc::new(LocalFileStorage::new(
        memory_root,
    ))));

    let service = Arc::new(
        ChatService::builder()
            .register_fn_flow("classification-agent", |request: ChatRequest| async move {
                Ok(format!("'{}' looks like a greeting", request.user_prompt))
            })
            .register_legacy_flow("note-taker", SummarizingFlow)
            .repository(repository.clone() as Arc<dyn ChatHistoryRepository>)
            .memory(memory)
            .build(),
    );

    // 2. First turn: no thread id, the dispatcher generates one.
    println!("1. Dispatching to classification-agent...");
    let response = service
        .get_chat_response(ChatRequest::new("hello there", "classification-agent").with_user("user_123", "Dana"))
        .await?;
    println!("   thread: {}", response.thread_id);
    println!("   answer: {}\n", response.agent_response);

    // 3. Second turn on the same thread, legacy flow, underscored name.
    println!("2. Dispatching to note-taker (registered with a hyphen)...");
    let response = service
        .get_chat_response(
            ChatRequest::new("I prefer morning meetings", "note_taker")
                .with_thread_id(&response.thread_id)
                .with_user("user_123", "Dana")
                .with_topic(Topic::One("scheduling, preferences".to_string())),
        )
        .await?;
    println!("   answer: {}", response.agent_response);
    println!("   summary: {:?}\n", response.memory_summary);

    // 4. Show what was persisted.
    let messages = repository.get_thread_messages(&response.thread_id).await?;
    println!("3. Thread now holds {} messages:", messages.len());
    for message in &messages {
        println!("   [{}] {}", message.role.as_str(), message.content);
    }

    Ok(())
}
