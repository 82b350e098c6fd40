//! Redis-backed store

use super::KeyValueStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::{error, info};

/// Store on a shared, auto-reconnecting Redis connection
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
}

impl RedisStore {
    pub fn new(manager: ConnectionManager) -> Self {
        Self { manager }
    }

    /// Open a client and establish the managed connection
    pub async fn connect(url: &str) -> Result<Self> {
        info!("Connecting to Redis...");
        let client = redis::Client::open(url).context("Invalid Redis URL")?;
        let manager = ConnectionManager::new(client)
            .await
            .context("Failed to connect to Redis")?;
        info!("Redis connection established");
        Ok(Self::new(manager))
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(key).await.map_err(|e| {
            error!(key, "Redis GET operation failed: {}", e);
            e
        })?;
        Ok(value)
    }

    async fn set_many(&self, items: &[(String, String)]) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        let mut conn = self.manager.clone();
        // MSET is atomic: no client observes a partial write
        conn.mset::<_, _, ()>(items).await.map_err(|e| {
            error!(keys = items.len(), "Redis MSET operation failed: {}", e);
            e
        })?;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.manager.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .context("Redis PING failed")?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
