//! HTTP handlers for users, people, planets and favorites.

pub mod favorites;
pub mod people;
pub mod planets;
pub mod users;
pub use favorites::*;
pub use people::*;
pub use planets::*;
pub use users::*;

use crate::error::AppError;
use axum::{extract::rejection::JsonRejection, Json};
use serde_json::Value;
use std::collections::HashMap;

/// Path ids that are not an `i32` name no row, so they answer like a missing one.
pub(crate) fn parse_id(raw: &str, label: &str) -> Result<i32, AppError> {
    raw.parse::<i32>()
        .map_err(|_| AppError::NotFound(format!("{} not found", label)))
}

pub(crate) fn body_to_map(body: Result<Json<Value>, JsonRejection>) -> Result<HashMap<String, Value>, AppError> {
    let Json(value) = body?;
    match value {
        Value::Object(m) => Ok(m.into_iter().collect()),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_i32_only() {
        assert_eq!(parse_id("42", "Planet").unwrap(), 42);
        assert_eq!(parse_id("-1", "Planet").unwrap(), -1);
        for raw in ["abc", "3000000000", "1.5", ""] {
            match parse_id(raw, "Planet") {
                Err(AppError::NotFound(msg)) => assert_eq!(msg, "Planet not found"),
                other => panic!("unexpected {:?} for {:?}", other.map_err(|e| e.to_string()), raw),
            }
        }
    }
}
