pub mod error;
pub mod in_memory;
pub mod models;
pub mod repository;

#[cfg(feature = "mongodb")]
pub mod mongo;

pub use error::PersistError;
pub use in_memory::InMemoryHistoryRepository;
pub use models::{Message, MessageRole};
pub use repository::ChatHistoryRepository;

#[cfg(feature = "mongodb")]
pub use mongo::MongoHistoryRepository;
