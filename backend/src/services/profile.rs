//! Profile service - onboarding and goal recomputation

use crate::error::{ApiError, ApiResult};
use crate::repositories::{SessionRepository, SessionWrite};
use crate::store::{KeyValueStore, SessionKey};
use nutrition_tracker_shared::{Profile, ProfileRequest};
use tracing::info;
use uuid::Uuid;

/// Profile service for onboarding and profile updates
pub struct ProfileService;

impl ProfileService {
    /// Get the session's profile
    pub async fn get_profile(store: &dyn KeyValueStore, session_id: Uuid) -> ApiResult<Profile> {
        SessionRepository::get_profile(store, session_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))
    }

    /// Create (or replace) the profile and compute its goals
    pub async fn onboard(
        store: &dyn KeyValueStore,
        session_id: Uuid,
        req: ProfileRequest,
    ) -> ApiResult<Profile> {
        let profile = Profile::new(req.into_inputs()?)?;
        Self::save(store, session_id, &profile).await?;

        info!(
            session_id = %session_id,
            calorie_goal = profile.goals().calorie_goal,
            "Profile onboarded"
        );
        Ok(profile)
    }

    /// Replace the inputs of an existing profile and recompute its goals
    pub async fn update_profile(
        store: &dyn KeyValueStore,
        session_id: Uuid,
        req: ProfileRequest,
    ) -> ApiResult<Profile> {
        let mut profile = Self::get_profile(store, session_id).await?;
        profile.update(req.into_inputs()?)?;
        Self::save(store, session_id, &profile).await?;

        info!(
            session_id = %session_id,
            calorie_goal = profile.goals().calorie_goal,
            "Profile updated"
        );
        Ok(profile)
    }

    async fn save(store: &dyn KeyValueStore, session_id: Uuid, profile: &Profile) -> ApiResult<()> {
        SessionWrite::new(session_id)
            .put(SessionKey::UserProfile, profile)?
            .commit(store)
            .await?;
        Ok(())
    }
}
