//! Favorite handlers. Every operation acts for the request's `Principal`.

use super::parse_id;
use crate::error::{AppError, ErrorBody};
use crate::extractors::Principal;
use crate::models::FavoriteTarget;
use crate::response::{message, MessageBody};
use crate::service::CatalogService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

async fn add(state: &AppState, user_id: i32, target: FavoriteTarget) -> Result<impl IntoResponse, AppError> {
    let msg = CatalogService::add_favorite(state.store.as_ref(), user_id, target).await?;
    Ok(message(StatusCode::CREATED, msg))
}

async fn remove(state: &AppState, user_id: i32, target: FavoriteTarget) -> Result<impl IntoResponse, AppError> {
    let msg = CatalogService::remove_favorite(state.store.as_ref(), user_id, target).await?;
    Ok(message(StatusCode::OK, msg))
}

#[utoipa::path(
    post,
    path = "/favorite/planet/{id}",
    tag = "favorites",
    params(("id" = i32, Path, description = "Planet id")),
    responses((status = 201, body = MessageBody), (status = 404, body = ErrorBody))
)]
pub async fn add_favorite_planet(
    State(state): State<AppState>,
    Principal(user_id): Principal,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "Planet")?;
    add(&state, user_id, FavoriteTarget::Planet(id)).await
}

#[utoipa::path(
    post,
    path = "/favorite/people/{id}",
    tag = "favorites",
    params(("id" = i32, Path, description = "Character id")),
    responses((status = 201, body = MessageBody), (status = 404, body = ErrorBody))
)]
pub async fn add_favorite_person(
    State(state): State<AppState>,
    Principal(user_id): Principal,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "Character")?;
    add(&state, user_id, FavoriteTarget::Character(id)).await
}

#[utoipa::path(
    delete,
    path = "/favorite/planet/{id}",
    tag = "favorites",
    params(("id" = i32, Path, description = "Planet id")),
    responses((status = 200, body = MessageBody), (status = 404, body = ErrorBody))
)]
pub async fn delete_favorite_planet(
    State(state): State<AppState>,
    Principal(user_id): Principal,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "Planet")?;
    remove(&state, user_id, FavoriteTarget::Planet(id)).await
}

#[utoipa::path(
    delete,
    path = "/favorite/people/{id}",
    tag = "favorites",
    params(("id" = i32, Path, description = "Character id")),
    responses((status = 200, body = MessageBody), (status = 404, body = ErrorBody))
)]
pub async fn delete_favorite_person(
    State(state): State<AppState>,
    Principal(user_id): Principal,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "Character")?;
    remove(&state, user_id, FavoriteTarget::Character(id)).await
}
