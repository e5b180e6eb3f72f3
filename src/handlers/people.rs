//! Character handlers, mounted under `/people`.

use super::{body_to_map, parse_id};
use crate::error::{AppError, ErrorBody};
use crate::models::Character;
use crate::response::{created, success_many, success_one, CharacterCreated};
use crate::service::CatalogService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

#[utoipa::path(get, path = "/people", tag = "people", responses((status = 200, body = [Character])))]
pub async fn list_people(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let people = CatalogService::list_characters(state.store.as_ref()).await?;
    Ok(success_many(people))
}

#[utoipa::path(
    get,
    path = "/people/{id}",
    tag = "people",
    params(("id" = i32, Path, description = "Character id")),
    responses((status = 200, body = Character), (status = 404, body = ErrorBody))
)]
pub async fn get_person(State(state): State<AppState>, Path(id): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "Character")?;
    let character = CatalogService::get_character(state.store.as_ref(), id).await?;
    Ok(success_one(character))
}

#[utoipa::path(
    post,
    path = "/people",
    tag = "people",
    responses((status = 201, body = CharacterCreated), (status = 400, body = ErrorBody))
)]
pub async fn create_person(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body_to_map(body)?;
    let character = CatalogService::create_character(state.store.as_ref(), &body).await?;
    Ok(created(CharacterCreated {
        message: "Character created".into(),
        character,
    }))
}
