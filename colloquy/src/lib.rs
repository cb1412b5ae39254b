//! # Colloquy
//!
//! Workflow dispatch & session orchestration engine for conversational
//! agents: routes a chat request to one of many pluggable conversation
//! flows, assembles the multi-turn context that flow needs, normalizes
//! whatever shape the flow returns, optionally streams the result, and
//! durably records the exchange.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use colloquy::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let repository = Arc::new(InMemoryHistoryRepository::new());
//!
//!     let service = Arc::new(
//!         ChatService::builder()
//!             .register_fn_flow("echo-agent", |request: ChatRequest| async move {
//!                 Ok(format!("you said: {}", request.user_prompt))
//!             })
//!             .repository(repository as Arc<dyn ChatHistoryRepository>)
//!             .build(),
//!     );
//!
//!     let response = service
//!         .get_chat_response(ChatRequest::new("hello", "echo-agent"))
//!         .await?;
//!     println!("{}", response.agent_response);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! Colloquy is organized into focused crates:
//!
//! - **`colloquy-engine`**: flow registry, invocation adapter, session
//!   orchestrator and streaming adapter
//! - **`colloquy-types`**: request/response/chunk models and engine config
//! - **`colloquy-memory`**: storage-abstracted conversation memory
//!   (local filesystem or remote blob store) and the sync→async bridge
//! - **`colloquy-persist`**: chat history repositories (in-memory, MongoDB)
//!
//! ## License
//!
//! MIT

pub mod prelude;

// Re-export the member crates as modules
pub use colloquy_engine as engine;
pub use colloquy_memory as memory;
pub use colloquy_persist as persist;
pub use colloquy_types as types;

pub use colloquy_engine::{
    normalize_flow_name, normalize_reply, ChatError, ChatService, ChatServiceBuilder, ChunkStream,
    ConversationFlow, FlowContext, FlowRegistry, FlowReply, FnFlow, LegacyConversationFlow,
    LegacyFlowAdapter,
};

pub use colloquy_types::{
    ChatRequest, ChatResponse, ChatResponseChunk, ChunkType, EngineConfig, HistoryEntry, Topic,
};

pub use colloquy_memory::{
    BlobStorage, BlobStorageBuilder, FileStorage, LocalFileStorage, LocalMemoryManager,
    MemoryManager, SyncBridge,
};

pub use colloquy_persist::{
    ChatHistoryRepository, InMemoryHistoryRepository, Message, MessageRole, PersistError,
};

#[cfg(feature = "mongodb")]
pub use colloquy_persist::MongoHistoryRepository;
