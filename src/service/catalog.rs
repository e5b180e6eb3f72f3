//! Catalogue operations over any `Store`: validation, defaults, existence checks and messages.

use super::validation::{FieldRule, RequestValidator, CHARACTER_RULES, PLANET_RULES, USER_RULES};
use crate::error::AppError;
use crate::models::{
    Character, FavoriteTarget, FavoriteView, NewCharacter, NewFavorite, NewPlanet, NewUser, Planet, User,
};
use crate::repository::Store;
use serde_json::Value;
use std::collections::HashMap;

pub struct CatalogService;

/// Text field as sent; absent and null both read as None.
fn text(body: &HashMap<String, Value>, field: &str) -> Option<String> {
    body.get(field).and_then(Value::as_str).map(str::to_string)
}

/// Text field defaulting to the empty string when absent or null.
fn text_or_empty(body: &HashMap<String, Value>, field: &str) -> Option<String> {
    Some(text(body, field).unwrap_or_default())
}

fn required_text(body: &HashMap<String, Value>, field: &str) -> Result<String, AppError> {
    text(body, field).ok_or_else(|| AppError::Validation(format!("{} is required", field)))
}

fn validate(entity: &str, body: &HashMap<String, Value>, rules: &[FieldRule]) -> Result<(), AppError> {
    RequestValidator::validate(entity, body, rules).map_err(|e| {
        tracing::debug!(entity, error = %e, "rejected payload");
        e
    })
}

impl CatalogService {
    pub async fn list_users(store: &dyn Store) -> Result<Vec<User>, AppError> {
        store.list_users().await
    }

    pub async fn get_user(store: &dyn Store, id: i32) -> Result<User, AppError> {
        store
            .get_user(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    /// Create a user; `is_active` defaults to true. Duplicate email is a `Conflict`.
    pub async fn create_user(store: &dyn Store, body: &HashMap<String, Value>) -> Result<User, AppError> {
        validate("user", body, USER_RULES)?;
        let user = NewUser {
            email: required_text(body, "email")?,
            password: required_text(body, "password")?,
            is_active: body.get("is_active").and_then(Value::as_bool).unwrap_or(true),
        };
        let created = store.insert_user(&user).await?;
        tracing::info!(user_id = created.id, "user created");
        Ok(created)
    }

    pub async fn list_characters(store: &dyn Store) -> Result<Vec<Character>, AppError> {
        store.list_characters().await
    }

    pub async fn get_character(store: &dyn Store, id: i32) -> Result<Character, AppError> {
        store
            .get_character(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Character not found".into()))
    }

    /// Create a character. gender, birth_year and eye_color default to "" when not sent;
    /// hair_color and height stay null.
    pub async fn create_character(store: &dyn Store, body: &HashMap<String, Value>) -> Result<Character, AppError> {
        validate("character", body, CHARACTER_RULES)?;
        let character = NewCharacter {
            name: required_text(body, "name")?,
            gender: text_or_empty(body, "gender"),
            birth_year: text_or_empty(body, "birth_year"),
            eye_color: text_or_empty(body, "eye_color"),
            hair_color: text(body, "hair_color"),
            height: text(body, "height"),
        };
        let created = store.insert_character(&character).await?;
        tracing::info!(character_id = created.id, name = %created.name, "character created");
        Ok(created)
    }

    pub async fn list_planets(store: &dyn Store) -> Result<Vec<Planet>, AppError> {
        store.list_planets().await
    }

    pub async fn get_planet(store: &dyn Store, id: i32) -> Result<Planet, AppError> {
        store
            .get_planet(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Planet not found".into()))
    }

    pub async fn create_planet(store: &dyn Store, body: &HashMap<String, Value>) -> Result<Planet, AppError> {
        validate("planet", body, PLANET_RULES)?;
        let planet = NewPlanet {
            name: required_text(body, "name")?,
            climate: text(body, "climate"),
            terrain: text(body, "terrain"),
            population: text(body, "population"),
        };
        let created = store.insert_planet(&planet).await?;
        tracing::info!(planet_id = created.id, name = %created.name, "planet created");
        Ok(created)
    }

    /// Favorites of the acting user. The user must exist.
    pub async fn list_favorites(store: &dyn Store, user_id: i32) -> Result<Vec<FavoriteView>, AppError> {
        Self::get_user(store, user_id).await?;
        store.list_favorites(user_id).await
    }

    /// Add a favorite for the acting user and return the confirmation message.
    /// User and target existence are checked by the store in the same write.
    pub async fn add_favorite(store: &dyn Store, user_id: i32, target: FavoriteTarget) -> Result<String, AppError> {
        let (favorite, name) = store.insert_favorite(&NewFavorite { user_id, target }).await?;
        tracing::info!(favorite_id = favorite.id, user_id, target = ?target, "favorite added");
        Ok(format!("{} {} added to favorites", target.label(), name))
    }

    /// Remove one favorite of the acting user pointing at `target`.
    pub async fn remove_favorite(store: &dyn Store, user_id: i32, target: FavoriteTarget) -> Result<String, AppError> {
        let removed = store.delete_favorite(user_id, target).await?;
        match (removed, target) {
            (Some(f), _) => {
                tracing::info!(favorite_id = f.id, user_id, target = ?target, "favorite removed");
                Ok(match target {
                    FavoriteTarget::Planet(id) => format!("Favorite planet {} deleted", id),
                    FavoriteTarget::Character(id) => format!("Favorite for character {} deleted", id),
                })
            }
            (None, FavoriteTarget::Planet(id)) => Err(AppError::NotFound(format!(
                "Favorite planet with id {} not found",
                id
            ))),
            (None, FavoriteTarget::Character(id)) => Err(AppError::NotFound(format!(
                "Favorite for character {} not found",
                id
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryStore;
    use serde_json::json;

    fn body(value: Value) -> HashMap<String, Value> {
        match value {
            Value::Object(m) => m.into_iter().collect(),
            _ => panic!("test body must be an object"),
        }
    }

    #[tokio::test]
    async fn character_defaults_follow_legacy_shape() {
        let store = MemoryStore::new();
        let c = CatalogService::create_character(&store, &body(json!({"name": "Luke Skywalker"})))
            .await
            .unwrap();
        assert_eq!(
            serde_json::to_value(&c).unwrap(),
            json!({
                "id": 1, "name": "Luke Skywalker", "gender": "", "birth_year": "",
                "eye_color": "", "hair_color": null, "height": null
            })
        );
    }

    #[tokio::test]
    async fn rejected_planet_creates_no_row() {
        let store = MemoryStore::new();
        let err = CatalogService::create_planet(&store, &body(json!({"name": ""}))).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.list_planets().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn favorites_need_an_existing_user() {
        let store = MemoryStore::new();
        let planet = CatalogService::create_planet(&store, &body(json!({"name": "Alderaan"})))
            .await
            .unwrap();
        let err = CatalogService::add_favorite(&store, 1, FavoriteTarget::Planet(planet.id))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(m) if m == "User not found"));
        let err = CatalogService::add_favorite(&store, 1, FavoriteTarget::Character(9)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(m) if m == "User not found"));
        let err = CatalogService::list_favorites(&store, 1).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn add_then_remove_favorite_character() {
        let store = MemoryStore::new();
        let user = CatalogService::create_user(&store, &body(json!({"email": "c3po@tantive.iv", "password": "x"})))
            .await
            .unwrap();
        assert!(user.is_active);
        let c = CatalogService::create_character(&store, &body(json!({"name": "R2-D2"})))
            .await
            .unwrap();
        let target = FavoriteTarget::Character(c.id);

        let msg = CatalogService::add_favorite(&store, user.id, target).await.unwrap();
        assert_eq!(msg, "Character R2-D2 added to favorites");
        let favorites = CatalogService::list_favorites(&store, user.id).await.unwrap();
        assert_eq!(favorites[0].character.as_deref(), Some("R2-D2"));
        assert_eq!(favorites[0].planet, None);

        let msg = CatalogService::remove_favorite(&store, user.id, target).await.unwrap();
        assert_eq!(msg, format!("Favorite for character {} deleted", c.id));
        let err = CatalogService::remove_favorite(&store, user.id, target).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(m) if m == format!("Favorite for character {} not found", c.id)));
    }
}
