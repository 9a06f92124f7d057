//! Redis-backed session store

use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use time::OffsetDateTime;
use tower_sessions::{
    session::{Id, Record},
    session_store, SessionStore,
};

use crate::error::{AppError, AppResult};

/// Session records stored as JSON under `session:{id}`; Redis drops them when their TTL runs out
#[derive(Debug, Clone)]
pub struct RedisSessionStore {
    client: Client,
}

impl RedisSessionStore {
    /// Create a new Redis session store
    pub async fn new(url: &str) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        // Test connection
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection test failed: {}", e)))?;

        Ok(Self { client })
    }

    async fn connection(&self) -> session_store::Result<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(backend)
    }
}

fn key(id: &Id) -> String {
    format!("session:{}", id)
}

fn backend(e: redis::RedisError) -> session_store::Error {
    session_store::Error::Backend(e.to_string())
}

/// Seconds until the record expires, `None` once it has
fn remaining_seconds(record: &Record) -> Option<u64> {
    let seconds = (record.expiry_date - OffsetDateTime::now_utc()).whole_seconds();
    u64::try_from(seconds).ok().filter(|s| *s > 0)
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        let mut conn = self.connection().await?;

        // Session ID collision mitigation
        while conn.exists::<_, bool>(key(&record.id)).await.map_err(backend)? {
            record.id = Id::default();
        }

        self.save(record).await
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        let mut conn = self.connection().await?;

        let Some(seconds) = remaining_seconds(record) else {
            return conn.del::<_, ()>(key(&record.id)).await.map_err(backend);
        };
        let json = serde_json::to_string(record)
            .map_err(|e| session_store::Error::Encode(e.to_string()))?;

        conn.set_ex::<_, _, ()>(key(&record.id), json, seconds)
            .await
            .map_err(backend)
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let mut conn = self.connection().await?;

        let payload: Option<String> = conn.get(key(session_id)).await.map_err(backend)?;

        payload
            .map(|json| {
                serde_json::from_str(&json)
                    .map_err(|e| session_store::Error::Decode(e.to_string()))
            })
            .transpose()
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(key(session_id)).await.map_err(backend)
    }
}
