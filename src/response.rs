//! Response bodies and status helpers.

use crate::models::{Character, Planet, User};
use axum::{http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct UserCreated {
    pub message: String,
    pub user: User,
}

#[derive(Serialize, ToSchema)]
pub struct CharacterCreated {
    pub message: String,
    pub character: Character,
}

#[derive(Serialize, ToSchema)]
pub struct PlanetCreated {
    pub message: String,
    pub planet: Planet,
}

pub fn success_one<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn success_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<Vec<T>>) {
    tracing::trace!(count = data.len(), "list response");
    (StatusCode::OK, Json(data))
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn message(status: StatusCode, message: String) -> (StatusCode, Json<MessageBody>) {
    (status, Json(MessageBody { message }))
}
