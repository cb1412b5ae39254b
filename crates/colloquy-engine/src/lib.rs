pub mod builder;
pub mod error;
pub mod flow;
pub mod invoke;
pub mod registry;
pub mod service;
pub mod streaming;

pub use builder::ChatServiceBuilder;
pub use error::ChatError;
pub use flow::{
    ChunkStream, ConversationFlow, FlowContext, FlowReply, FnFlow, LegacyConversationFlow,
    LegacyFlowAdapter,
};
pub use invoke::normalize_reply;
pub use registry::{normalize_flow_name, FlowRegistry};
pub use service::ChatService;
