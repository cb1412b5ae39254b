use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};

use crate::error::{PersistError, Result};
use crate::models::Message;
use crate::repository::ChatHistoryRepository;

/// MongoDB-backed chat history store.
///
/// Rows are stored in two collections so memory summaries can be swept
/// independently of the visible transcript.
#[derive(Clone)]
pub struct MongoHistoryRepository {
    messages: Collection<Message>,
    memories: Collection<Message>,
}

impl MongoHistoryRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let db = client.database(db_name);
        Self {
            messages: db.collection("chat_history"),
            memories: db.collection("chat_memory"),
        }
    }

    /// Connect to MongoDB and create the repository.
    pub async fn connect(mongodb_uri: &str, db_name: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;
        Ok(Self::new(&client, db_name))
    }
}

#[async_trait]
impl ChatHistoryRepository for MongoHistoryRepository {
    async fn get_thread_messages(&self, thread_id: &str) -> Result<Vec<Message>> {
        let filter = doc! { "thread_id": thread_id };
        let messages = self
            .messages
            .find(filter)
            .sort(doc! { "created_at": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(messages)
    }

    async fn add_message(&self, message: Message) -> Result<String> {
        let id = message.id.clone();
        self.messages.insert_one(&message).await?;
        Ok(id)
    }

    async fn add_memory(&self, message: Message) -> Result<String> {
        let id = message.id.clone();
        self.memories.insert_one(&message).await?;
        Ok(id)
    }
}
