//! User handlers: list, read, create, and the acting user's favorites.

use super::{body_to_map, parse_id};
use crate::error::{AppError, ErrorBody};
use crate::extractors::Principal;
use crate::models::{FavoriteView, User};
use crate::response::{created, success_many, success_one, UserCreated};
use crate::service::CatalogService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

#[utoipa::path(get, path = "/users", tag = "users", responses((status = 200, body = [User])))]
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = CatalogService::list_users(state.store.as_ref()).await?;
    Ok(success_many(users))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User id")),
    responses((status = 200, body = User), (status = 404, body = ErrorBody))
)]
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "User")?;
    let user = CatalogService::get_user(state.store.as_ref(), id).await?;
    Ok(success_one(user))
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    responses(
        (status = 201, body = UserCreated),
        (status = 400, body = ErrorBody),
        (status = 409, body = ErrorBody)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body_to_map(body)?;
    let user = CatalogService::create_user(state.store.as_ref(), &body).await?;
    Ok(created(UserCreated {
        message: "User created".into(),
        user,
    }))
}

#[utoipa::path(
    get,
    path = "/users/favorites",
    tag = "users",
    params(("X-User-ID" = Option<i32>, Header, description = "Acting user; defaults to the configured user")),
    responses((status = 200, body = [FavoriteView]), (status = 404, body = ErrorBody))
)]
pub async fn list_user_favorites(
    State(state): State<AppState>,
    Principal(user_id): Principal,
) -> Result<impl IntoResponse, AppError> {
    let favorites = CatalogService::list_favorites(state.store.as_ref(), user_id).await?;
    Ok(success_many(favorites))
}
