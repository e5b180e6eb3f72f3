//! Extract the acting user from the request (`X-User-ID` header).

use crate::error::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Header carrying the acting user's id.
pub const USER_ID_HEADER: &str = "X-User-ID";

/// The user on whose behalf a favorite operation runs. Falls back to the
/// configured default user when the header is absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Principal(pub i32);

#[async_trait]
impl FromRequestParts<AppState> for Principal {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .map(|v| v.to_str().map(|s| s.trim().to_string()))
            .transpose()
            .map_err(|_| AppError::BadRequest(format!("{} must be visible ASCII", USER_ID_HEADER)))?
            .filter(|s| !s.is_empty());
        match value {
            None => Ok(Principal(state.default_user_id)),
            Some(s) => s
                .parse()
                .map(Principal)
                .map_err(|_| AppError::BadRequest(format!("{} must be an integer user id", USER_ID_HEADER))),
        }
    }
}
