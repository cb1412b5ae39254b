use anyhow::Result;
use async_trait::async_trait;

/// Storage abstraction the memory manager operates against.
///
/// Backends are opaque to the manager: a local directory tree or a remote
/// object store behave identically through this trait. A missing object is
/// not an error: `check_exists` answers false and `read` answers empty.
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn check_exists(&self, path: &str, name: &str) -> Result<bool>;

    /// Object content, or an empty string when the object does not exist.
    async fn read(&self, name: &str, path: &str) -> Result<String>;

    async fn write(&self, content: &str, name: &str, path: &str) -> Result<()>;

    /// Remove the object; removing a missing object is a no-op.
    async fn delete(&self, name: &str, path: &str) -> Result<()>;
}
