use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use colloquy_memory::{FileStorage, LocalFileStorage, LocalMemoryManager, MemoryManager};
use pretty_assertions::assert_eq;

fn manager(dir: &tempfile::TempDir) -> MemoryManager {
    MemoryManager::new(Arc::new(LocalFileStorage::new(dir.path())))
}

#[tokio::test]
async fn read_returns_default_when_memory_is_absent() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager(&dir);

    let content = manager.read_memory(Some("thread-1"), "nothing yet").await;
    assert_eq!(content, "nothing yet");
}

#[tokio::test]
async fn write_then_read_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager(&dir);

    assert!(manager.write_memory(Some("thread-1"), "user likes tennis").await);
    let content = manager.read_memory(Some("thread-1"), "").await;
    assert_eq!(content, "user likes tennis");
}

#[tokio::test]
async fn threads_are_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager(&dir);

    assert!(manager.write_memory(Some("a"), "alpha").await);
    assert!(manager.write_memory(Some("b"), "beta").await);
    assert!(manager.write_memory(None, "global").await);

    assert_eq!(manager.read_memory(Some("a"), "").await, "alpha");
    assert_eq!(manager.read_memory(Some("b"), "").await, "beta");
    assert_eq!(manager.read_memory(None, "").await, "global");
}

#[tokio::test]
async fn maintain_keeps_only_the_last_max_words() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager(&dir);

    assert!(manager.write_memory(Some("t"), "one two three four").await);
    assert!(manager.maintain_memory(Some("t"), "five six", 3).await);

    let content = manager.read_memory(Some("t"), "").await;
    assert_eq!(content, "four five six");
    assert_eq!(content.split_whitespace().count(), 3);
}

#[tokio::test]
async fn maintain_on_empty_memory_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager(&dir);

    assert!(manager.maintain_memory(Some("t"), "hello there", 10).await);
    assert_eq!(manager.read_memory(Some("t"), "").await, "hello there");
}

#[tokio::test]
async fn maintain_is_not_idempotent_under_repeated_calls() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager(&dir);

    assert!(manager.maintain_memory(Some("t"), "likes tennis", 10).await);
    assert!(manager.maintain_memory(Some("t"), "likes tennis", 10).await);

    // Second identical call appends the text again; callers own de-dup.
    assert_eq!(
        manager.read_memory(Some("t"), "").await,
        "likes tennis likes tennis"
    );
}

#[tokio::test]
async fn delete_removes_memory() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager(&dir);

    assert!(manager.write_memory(Some("t"), "something").await);
    assert!(manager.delete_memory(Some("t")).await);
    assert_eq!(manager.read_memory(Some("t"), "gone").await, "gone");

    // Deleting again is still a success.
    assert!(manager.delete_memory(Some("t")).await);
}

#[tokio::test]
async fn check_exists_reflects_writes_and_deletes() {
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalFileStorage::new(dir.path());

    assert!(!storage.check_exists("memory/t", "memory.md").await.unwrap());

    storage.write("content", "memory.md", "memory/t").await.unwrap();
    assert!(storage.check_exists("memory/t", "memory.md").await.unwrap());

    storage.delete("memory.md", "memory/t").await.unwrap();
    assert!(!storage.check_exists("memory/t", "memory.md").await.unwrap());
}

#[tokio::test]
async fn legacy_manager_exposes_the_same_contract() {
    let dir = tempfile::tempdir().unwrap();
    let manager = LocalMemoryManager::new(dir.path());

    assert!(manager.write_memory(Some("t"), "one two three").await);
    assert!(manager.maintain_memory(Some("t"), "four", 2).await);
    assert_eq!(manager.read_memory(Some("t"), "").await, "three four");
    assert!(manager.delete_memory(Some("t")).await);
    assert_eq!(manager.read_memory(Some("t"), "fallback").await, "fallback");
}

struct FailingStorage;

#[async_trait]
impl FileStorage for FailingStorage {
    async fn check_exists(&self, _path: &str, _name: &str) -> Result<bool> {
        bail!("storage offline")
    }

    async fn read(&self, _name: &str, _path: &str) -> Result<String> {
        bail!("storage offline")
    }

    async fn write(&self, _content: &str, _name: &str, _path: &str) -> Result<()> {
        bail!("storage offline")
    }

    async fn delete(&self, _name: &str, _path: &str) -> Result<()> {
        bail!("storage offline")
    }
}

#[tokio::test]
async fn storage_failures_degrade_gracefully() {
    let manager = MemoryManager::new(Arc::new(FailingStorage));

    assert_eq!(manager.read_memory(Some("t"), "default").await, "default");
    assert!(!manager.write_memory(Some("t"), "content").await);
    assert!(!manager.maintain_memory(Some("t"), "content", 10).await);
    assert!(!manager.delete_memory(Some("t")).await);
}
