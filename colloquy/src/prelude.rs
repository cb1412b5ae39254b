//! Prelude module for convenient imports
//!
//! Import everything you need with:
//! ```rust
//! use colloquy::prelude::*;
//! ```

pub use crate::{
    ChatError, ChatRequest, ChatResponse, ChatResponseChunk, ChatService, ChatServiceBuilder,
    ChunkStream, ChunkType, ConversationFlow, EngineConfig, FlowContext, FlowRegistry, FlowReply,
    FnFlow, HistoryEntry, LegacyConversationFlow, LegacyFlowAdapter, Topic,
    ChatHistoryRepository, InMemoryHistoryRepository, Message, MessageRole,
    FileStorage, LocalFileStorage, LocalMemoryManager, MemoryManager, SyncBridge,
};
pub use anyhow::Result;
