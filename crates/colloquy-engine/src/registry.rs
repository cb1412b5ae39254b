use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::ChatError;
use crate::flow::ConversationFlow;

/// Map a caller-supplied workflow name to its registry key: lowercase with
/// hyphens folded into underscores, so `knowledge-base-agent` and
/// `knowledge_base_agent` select the same flow.
pub fn normalize_flow_name(name: &str) -> String {
    name.trim().to_lowercase().replace('-', "_")
}

/// Typed flow registry with two namespaces.
///
/// The primary namespace holds first-party flows and is consulted first; the
/// fallback namespace holds project-local flows consulted second. Both maps
/// are read-mostly and safe for concurrent lookups; no lock is held across
/// an await.
#[derive(Default)]
pub struct FlowRegistry {
    primary: RwLock<HashMap<String, Arc<dyn ConversationFlow>>>,
    fallback: RwLock<HashMap<String, Arc<dyn ConversationFlow>>>,
}

impl FlowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, name: impl AsRef<str>, flow: Arc<dyn ConversationFlow>) {
        let key = normalize_flow_name(name.as_ref());
        tracing::debug!(flow = %key, "registering conversation flow");
        self.primary.write().insert(key, flow);
    }

    pub fn register_fallback(&self, name: impl AsRef<str>, flow: Arc<dyn ConversationFlow>) {
        let key = normalize_flow_name(name.as_ref());
        tracing::debug!(flow = %key, "registering fallback conversation flow");
        self.fallback.write().insert(key, flow);
    }

    /// Resolve a requested flow name, primary namespace first.
    ///
    /// A miss reports the original, non-normalized name.
    pub fn resolve(&self, requested: &str) -> Result<Arc<dyn ConversationFlow>, ChatError> {
        let key = normalize_flow_name(requested);
        if let Some(flow) = self.primary.read().get(&key) {
            return Ok(Arc::clone(flow));
        }
        if let Some(flow) = self.fallback.read().get(&key) {
            return Ok(Arc::clone(flow));
        }
        Err(ChatError::FlowNotFound(requested.to_string()))
    }

    /// Normalized names of every registered flow, sorted.
    pub fn flow_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .primary
            .read()
            .keys()
            .chain(self.fallback.read().keys())
            .cloned()
            .collect();
        names.sort();
        names.dedup();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.primary.read().is_empty() && self.fallback.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{FlowContext, FlowReply};
    use async_trait::async_trait;
    use colloquy_types::ChatRequest;
    use pretty_assertions::assert_eq;

    struct TaggedFlow(&'static str);

    #[async_trait]
    impl ConversationFlow for TaggedFlow {
        async fn get_conversation_response(
            &self,
            _ctx: &FlowContext,
            _request: ChatRequest,
        ) -> anyhow::Result<FlowReply> {
            Ok(FlowReply::Text(self.0.to_string()))
        }
    }

    #[test]
    fn normalization_folds_case_and_hyphens() {
        assert_eq!(normalize_flow_name("Knowledge-Base-Agent"), "knowledge_base_agent");
        assert_eq!(normalize_flow_name(" knowledge_base_agent "), "knowledge_base_agent");
    }

    #[test]
    fn hyphen_and_underscore_forms_resolve_to_the_same_flow() {
        let registry = FlowRegistry::new();
        registry.register("knowledge-base-agent", Arc::new(TaggedFlow("kb")));

        let a = registry.resolve("knowledge-base-agent").unwrap();
        let b = registry.resolve("knowledge_base_agent").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn primary_namespace_shadows_fallback() {
        let registry = FlowRegistry::new();
        registry.register_fallback("agent", Arc::new(TaggedFlow("local")));
        registry.register("agent", Arc::new(TaggedFlow("first-party")));

        let resolved = registry.resolve("agent").unwrap();
        let primary = registry.resolve("AGENT").unwrap();
        assert!(Arc::ptr_eq(&resolved, &primary));
        assert_eq!(registry.flow_names(), vec!["agent".to_string()]);
    }

    #[test]
    fn fallback_namespace_is_consulted_second() {
        let registry = FlowRegistry::new();
        registry.register_fallback("project-agent", Arc::new(TaggedFlow("local")));

        assert!(registry.resolve("project_agent").is_ok());
    }

    #[test]
    fn miss_reports_the_original_name() {
        let registry = FlowRegistry::new();

        let err = registry
            .resolve("Does-Not-Exist")
            .err()
            .expect("expected a not-found error");
        match err {
            ChatError::FlowNotFound(name) => assert_eq!(name, "Does-Not-Exist"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
