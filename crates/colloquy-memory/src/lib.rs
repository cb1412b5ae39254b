pub mod blob;
pub mod bridge;
pub mod legacy;
pub mod local;
pub mod manager;
pub mod storage;

pub use blob::{BlobStorage, BlobStorageBuilder};
pub use bridge::SyncBridge;
pub use legacy::LocalMemoryManager;
pub use local::LocalFileStorage;
pub use manager::MemoryManager;
pub use storage::FileStorage;
