pub mod config;
pub mod request;
pub mod response;

pub use config::EngineConfig;
pub use request::{ChatRequest, HistoryEntry, Topic};
pub use response::{ChatResponse, ChatResponseChunk, ChunkType};
