use std::sync::Arc;

use crate::flow::{ConversationFlow, FlowReply, FnFlow, LegacyConversationFlow, LegacyFlowAdapter};
use crate::registry::FlowRegistry;
use crate::service::ChatService;
use colloquy_memory::MemoryManager;
use colloquy_persist::ChatHistoryRepository;
use colloquy_types::{ChatRequest, EngineConfig};

/// Builder for constructing a ChatService with optional components
pub struct ChatServiceBuilder {
    registry: Arc<FlowRegistry>,
    repository: Option<Arc<dyn ChatHistoryRepository>>,
    memory: Option<Arc<MemoryManager>>,
    config: EngineConfig,
}

impl ChatServiceBuilder {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(FlowRegistry::new()),
            repository: None,
            memory: None,
            config: EngineConfig::default(),
        }
    }

    /// Register a first-party flow under its workflow name.
    pub fn register_flow(
        self,
        name: impl AsRef<str>,
        flow: Arc<dyn ConversationFlow>,
    ) -> Self {
        self.registry.register(name, flow);
        self
    }

    /// Register a project-local flow, consulted when the primary namespace
    /// has no match.
    pub fn register_fallback_flow(
        self,
        name: impl AsRef<str>,
        flow: Arc<dyn ConversationFlow>,
    ) -> Self {
        self.registry.register_fallback(name, flow);
        self
    }

    /// Wrap a legacy multi-argument flow behind the new interface.
    pub fn register_legacy_flow<F>(self, name: impl AsRef<str>, flow: F) -> Self
    where
        F: LegacyConversationFlow + 'static,
    {
        self.registry
            .register(name, Arc::new(LegacyFlowAdapter::new(flow)));
        self
    }

    /// Register an async closure taking the whole request.
    pub fn register_fn_flow<F, Fut, R>(self, name: impl AsRef<str>, f: F) -> Self
    where
        F: Fn(ChatRequest) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = anyhow::Result<R>> + Send + 'static,
        R: Into<FlowReply> + Send + 'static,
    {
        self.registry.register(name, Arc::new(FnFlow::new(f)));
        self
    }

    /// Enable history persistence with a ChatHistoryRepository
    pub fn repository(mut self, repository: Arc<dyn ChatHistoryRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Share a memory manager with the registered flows
    pub fn memory(mut self, memory: Arc<MemoryManager>) -> Self {
        self.memory = Some(memory);
        self
    }

    /// Set the engine configuration
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the ChatService
    pub fn build(self) -> ChatService {
        ChatService::new_with_config(self.registry, self.repository, self.memory, self.config)
    }
}

impl Default for ChatServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
