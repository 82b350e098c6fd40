//! Session document repository
//!
//! Typed access to the JSON documents a session keeps in the key-value store.

use crate::store::{KeyValueStore, SessionKey};
use anyhow::{Context, Result};
use nutrition_tracker_shared::{FoodLogEntry, Profile, Recipe, StreakState};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// Session repository for store operations
pub struct SessionRepository;

impl SessionRepository {
    /// Read and decode one document
    pub async fn load<T: DeserializeOwned>(
        store: &dyn KeyValueStore,
        session_id: Uuid,
        key: SessionKey,
    ) -> Result<Option<T>> {
        let raw = store.get(&key.for_session(session_id)).await?;
        raw.map(|json| {
            serde_json::from_str(&json)
                .with_context(|| format!("Corrupt {} document for session {}", key, session_id))
        })
        .transpose()
    }

    pub async fn get_profile(store: &dyn KeyValueStore, session_id: Uuid) -> Result<Option<Profile>> {
        Self::load(store, session_id, SessionKey::UserProfile).await
    }

    /// All log entries in creation order
    pub async fn get_food_logs(
        store: &dyn KeyValueStore,
        session_id: Uuid,
    ) -> Result<Vec<FoodLogEntry>> {
        Ok(Self::load(store, session_id, SessionKey::FoodLogs)
            .await?
            .unwrap_or_default())
    }

    pub async fn get_streak(store: &dyn KeyValueStore, session_id: Uuid) -> Result<StreakState> {
        Ok(Self::load(store, session_id, SessionKey::StreakData)
            .await?
            .unwrap_or_default())
    }

    pub async fn get_favorites(store: &dyn KeyValueStore, session_id: Uuid) -> Result<Vec<String>> {
        Ok(Self::load(store, session_id, SessionKey::FavoriteRecipes)
            .await?
            .unwrap_or_default())
    }

    /// Generated recipes, newest first
    pub async fn get_generated_recipes(
        store: &dyn KeyValueStore,
        session_id: Uuid,
    ) -> Result<Vec<Recipe>> {
        Ok(Self::load(store, session_id, SessionKey::GeneratedRecipes)
            .await?
            .unwrap_or_default())
    }
}

/// Batch of document writes committed together
///
/// Encoding happens while the batch is built, so a serialization failure
/// aborts before anything reaches the store.
#[derive(Debug)]
pub struct SessionWrite {
    session_id: Uuid,
    items: Vec<(String, String)>,
}

impl SessionWrite {
    pub fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            items: Vec::new(),
        }
    }

    pub fn put<T: Serialize>(mut self, key: SessionKey, value: &T) -> Result<Self> {
        let json = serde_json::to_string(value)
            .with_context(|| format!("Failed to encode {} document", key))?;
        self.items.push((key.for_session(self.session_id), json));
        Ok(self)
    }

    pub async fn commit(self, store: &dyn KeyValueStore) -> Result<()> {
        store.set_many(&self.items).await
    }
}
