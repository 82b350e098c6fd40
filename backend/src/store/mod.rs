//! Key-value persistence for per-session state
//!
//! Each session owns a handful of JSON documents addressed by
//! `session:{uuid}:{key}`. Multi-key writes go through [`KeyValueStore::set_many`],
//! which both implementations apply atomically.

pub mod memory;
pub mod redis;

pub use self::memory::MemoryStore;
pub use self::redis::RedisStore;

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;
use uuid::Uuid;

/// Storage backend for session documents
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch a raw value, `None` when the key has never been written
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write all pairs in one atomic step
    async fn set_many(&self, items: &[(String, String)]) -> Result<()>;

    /// Round-trip check used by the readiness probe
    async fn ping(&self) -> Result<()>;

    /// Short backend name for logs and health output
    fn backend_name(&self) -> &'static str;
}

/// Logical documents kept per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    UserProfile,
    FoodLogs,
    StreakData,
    FavoriteRecipes,
    GeneratedRecipes,
}

impl SessionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKey::UserProfile => "userProfile",
            SessionKey::FoodLogs => "foodLogs",
            SessionKey::StreakData => "streakData",
            SessionKey::FavoriteRecipes => "favoriteRecipes",
            SessionKey::GeneratedRecipes => "generatedRecipes",
        }
    }

    /// Fully qualified store key for a session
    pub fn for_session(&self, session_id: Uuid) -> String {
        format!("session:{}:{}", session_id, self.as_str())
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
