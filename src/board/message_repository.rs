//! Message repository for clubboard.

use sqlx::{QueryBuilder, Sqlite};

use super::feed::FeedQuery;
use super::message::{Message, NewMessage};
use crate::db::DbPool;
use crate::{BoardError, Result};

const MESSAGE_COLUMNS: &str = "id, name, body, club, ip, posted";

/// Repository for message operations.
pub struct MessageRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> MessageRepository<'a> {
    /// Create a new MessageRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a message.
    pub async fn create(&self, new_message: &NewMessage) -> Result<Message> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO messages (name, body, ip, club) VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(&new_message.name)
        .bind(&new_message.body)
        .bind(&new_message.ip)
        .bind(&new_message.club)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| BoardError::NotFound("message".to_string()))
    }

    /// Get a message by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Message>> {
        let message = sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(message)
    }

    /// List messages for the feed. Unbounded.
    pub async fn list(&self, query: &FeedQuery) -> Result<Vec<Message>> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {MESSAGE_COLUMNS} FROM messages"));

        if let Some(ref club) = query.club {
            builder.push(" WHERE club = ");
            builder.push_bind(club.clone());
        }
        builder.push(query.order_by());

        let messages = builder
            .build_query_as::<Message>()
            .fetch_all(self.pool)
            .await?;

        Ok(messages)
    }

    /// List every message, newest first.
    pub async fn list_newest_first(&self) -> Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages ORDER BY id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(messages)
    }

    /// Distinct club labels in use, alphabetically.
    pub async fn list_clubs(&self) -> Result<Vec<String>> {
        let clubs: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT club FROM messages ORDER BY club")
                .fetch_all(self.pool)
                .await?;
        Ok(clubs)
    }

    /// Count all messages.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::FeedMode;
    use crate::Database;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    async fn seed(repo: &MessageRepository<'_>) {
        // ids 1..=5
        repo.create(&NewMessage::new("alice", "a1", "go")).await.unwrap();
        repo.create(&NewMessage::new("bob", "b1", "chess")).await.unwrap();
        repo.create(&NewMessage::new("alice", "a2", "go")).await.unwrap();
        repo.create(&NewMessage::new("carol", "c1", "art")).await.unwrap();
        repo.create(&NewMessage::new("bob", "b2", "chess")).await.unwrap();
    }

    fn bodies(messages: &[Message]) -> Vec<&str> {
        messages.iter().map(|m| m.body.as_str()).collect()
    }

    #[tokio::test]
    async fn test_create_message() {
        let db = setup_db().await;
        let repo = MessageRepository::new(db.pool());

        let message = repo
            .create(&NewMessage::new("alice", "hello", "chess").with_ip("10.0.0.7"))
            .await
            .unwrap();

        assert_eq!(message.id, 1);
        assert_eq!(message.name, "alice");
        assert_eq!(message.body, "hello");
        assert_eq!(message.club, "chess");
        assert_eq!(message.ip.as_deref(), Some("10.0.0.7"));
        assert!(!message.posted.is_empty());
    }

    #[tokio::test]
    async fn test_list_mode_is_newest_first() {
        let db = setup_db().await;
        let repo = MessageRepository::new(db.pool());
        seed(&repo).await;

        let query = FeedQuery::default().with_mode(FeedMode::List);
        let messages = repo.list(&query).await.unwrap();

        assert_eq!(bodies(&messages), vec!["b2", "c1", "a2", "b1", "a1"]);
    }

    #[tokio::test]
    async fn test_default_mode_groups_by_club() {
        let db = setup_db().await;
        let repo = MessageRepository::new(db.pool());
        seed(&repo).await;

        let messages = repo.list(&FeedQuery::default()).await.unwrap();

        assert_eq!(bodies(&messages), vec!["c1", "b2", "b1", "a2", "a1"]);
    }

    #[tokio::test]
    async fn test_club_filter_in_either_mode() {
        let db = setup_db().await;
        let repo = MessageRepository::new(db.pool());
        seed(&repo).await;

        for mode in [FeedMode::List, FeedMode::ByClub] {
            let query = FeedQuery::default().with_mode(mode).with_club("chess");
            let messages = repo.list(&query).await.unwrap();
            assert_eq!(bodies(&messages), vec!["b2", "b1"]);
        }

        let none = repo
            .list(&FeedQuery::default().with_club("Chess"))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_list_newest_first_and_clubs() {
        let db = setup_db().await;
        let repo = MessageRepository::new(db.pool());
        seed(&repo).await;

        let all = repo.list_newest_first().await.unwrap();
        assert_eq!(all.first().unwrap().body, "b2");
        assert_eq!(all.len(), 5);

        assert_eq!(repo.list_clubs().await.unwrap(), vec!["art", "chess", "go"]);
        assert_eq!(repo.count().await.unwrap(), 5);
    }
}
