use std::sync::Arc;

use anyhow::Result;
use futures::StreamExt;
use tracing_subscriber::EnvFilter;

use colloquy_engine::ChatService;
use colloquy_types::{ChatRequest, ChunkType, EngineConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("Colloquy - Streaming Example");
    println!("============================\n");

    let service = Arc::new(
        ChatService::builder()
            .register_fn_flow("storyteller", |request: ChatRequest| async move {
                Ok(format!(
                    "Once upon a time somebody asked '{}' and the engine sliced this \
                     perfectly ordinary answer into small chunks so a client could \
                     render it incrementally.",
                    request.user_prompt
                ))
            })
            .config(EngineConfig::new().chunk_size(40))
            .build(),
    );

    let mut stream =
        service.get_streaming_chat_response(ChatRequest::new("tell me a story", "storyteller"));

    while let Some(chunk) = stream.next().await {
        match chunk.chunk_type {
            ChunkType::Content => println!("content | {}", chunk.content.unwrap_or_default()),
            ChunkType::Final => println!(
                "final   | message {} ({} tokens)",
                chunk.message_id,
                chunk.token_count.unwrap_or(0)
            ),
            ChunkType::Error => println!("error   | {}", chunk.error.unwrap_or_default()),
        }
    }

    Ok(())
}
