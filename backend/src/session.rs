//! Session identification
//!
//! Every `/api/v1` request names its session with an `X-Session-Id` UUID header.

use crate::error::ApiError;
use axum::http::request::Parts;
use uuid::Uuid;

/// Header carrying the session UUID
pub const SESSION_HEADER: &str = "x-session-id";

/// Session extracted from the request headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub id: Uuid,
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::BadRequest("Missing X-Session-Id header".to_string()))?;

        let id = Uuid::parse_str(raw.trim())
            .map_err(|_| ApiError::BadRequest("X-Session-Id must be a UUID".to_string()))?;

        Ok(Session { id })
    }
}
