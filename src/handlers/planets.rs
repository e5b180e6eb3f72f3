//! Planet handlers: list, read, create.

use super::{body_to_map, parse_id};
use crate::error::{AppError, ErrorBody};
use crate::models::Planet;
use crate::response::{created, success_many, success_one, PlanetCreated};
use crate::service::CatalogService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

#[utoipa::path(get, path = "/planets", tag = "planets", responses((status = 200, body = [Planet])))]
pub async fn list_planets(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let planets = CatalogService::list_planets(state.store.as_ref()).await?;
    Ok(success_many(planets))
}

#[utoipa::path(
    get,
    path = "/planets/{id}",
    tag = "planets",
    params(("id" = i32, Path, description = "Planet id")),
    responses((status = 200, body = Planet), (status = 404, body = ErrorBody))
)]
pub async fn get_planet(State(state): State<AppState>, Path(id): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "Planet")?;
    let planet = CatalogService::get_planet(state.store.as_ref(), id).await?;
    Ok(success_one(planet))
}

#[utoipa::path(
    post,
    path = "/planets",
    tag = "planets",
    responses((status = 201, body = PlanetCreated), (status = 400, body = ErrorBody))
)]
pub async fn create_planet(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body_to_map(body)?;
    let planet = CatalogService::create_planet(state.store.as_ref(), &body).await?;
    Ok(created(PlanetCreated {
        message: "Planet created".into(),
        planet,
    }))
}
