//! Entity shapes, write payloads and their public JSON views.

use serde::Serialize;
use utoipa::ToSchema;

/// Persisted user. The password never leaves the process in JSON.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub is_active: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct Character {
    pub id: i32,
    pub name: String,
    pub gender: Option<String>,
    pub birth_year: Option<String>,
    pub eye_color: Option<String>,
    pub hair_color: Option<String>,
    pub height: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct Planet {
    pub id: i32,
    pub name: String,
    pub climate: Option<String>,
    pub terrain: Option<String>,
    pub population: Option<String>,
}

/// What a favorite points at. Exactly one target per favorite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FavoriteTarget {
    Planet(i32),
    Character(i32),
}

impl FavoriteTarget {
    /// Rebuild a target from the two nullable foreign-key columns.
    pub fn from_columns(planet_id: Option<i32>, character_id: Option<i32>) -> Option<Self> {
        match (planet_id, character_id) {
            (Some(id), None) => Some(FavoriteTarget::Planet(id)),
            (None, Some(id)) => Some(FavoriteTarget::Character(id)),
            _ => None,
        }
    }

    pub fn planet_id(&self) -> Option<i32> {
        match self {
            FavoriteTarget::Planet(id) => Some(*id),
            FavoriteTarget::Character(_) => None,
        }
    }

    pub fn character_id(&self) -> Option<i32> {
        match self {
            FavoriteTarget::Character(id) => Some(*id),
            FavoriteTarget::Planet(_) => None,
        }
    }

    pub fn id(&self) -> i32 {
        match self {
            FavoriteTarget::Planet(id) | FavoriteTarget::Character(id) => *id,
        }
    }

    /// Human label used in response messages.
    pub fn label(&self) -> &'static str {
        match self {
            FavoriteTarget::Planet(_) => "Planet",
            FavoriteTarget::Character(_) => "Character",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Favorite {
    pub id: i32,
    pub user_id: i32,
    pub target: FavoriteTarget,
}

/// Favorite as exposed over HTTP: target names instead of foreign keys.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct FavoriteView {
    pub id: i32,
    pub user_id: i32,
    pub planet: Option<String>,
    pub character: Option<String>,
}

impl FavoriteView {
    /// Denormalize a favorite; `target_name` is the referenced row's name, if it still exists.
    pub fn new(favorite: &Favorite, target_name: Option<String>) -> Self {
        let (planet, character) = match favorite.target {
            FavoriteTarget::Planet(_) => (target_name, None),
            FavoriteTarget::Character(_) => (None, target_name),
        };
        FavoriteView {
            id: favorite.id,
            user_id: favorite.user_id,
            planet,
            character,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub is_active: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewCharacter {
    pub name: String,
    pub gender: Option<String>,
    pub birth_year: Option<String>,
    pub eye_color: Option<String>,
    pub hair_color: Option<String>,
    pub height: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewPlanet {
    pub name: String,
    pub climate: Option<String>,
    pub terrain: Option<String>,
    pub population: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NewFavorite {
    pub user_id: i32,
    pub target: FavoriteTarget,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_json_never_contains_password() {
        let user = User {
            id: 7,
            email: "leia@alderaan.org".into(),
            password: "hunter2".into(),
            is_active: true,
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value, json!({"id": 7, "email": "leia@alderaan.org", "is_active": true}));
        assert!(value.get("password").is_none());
    }

    #[test]
    fn planet_favorite_view_has_null_character() {
        let favorite = Favorite {
            id: 3,
            user_id: 1,
            target: FavoriteTarget::Planet(9),
        };
        let view = FavoriteView::new(&favorite, Some("Tatooine".into()));
        assert_eq!(
            serde_json::to_value(view).unwrap(),
            json!({"id": 3, "user_id": 1, "planet": "Tatooine", "character": null})
        );
    }

    #[test]
    fn target_requires_exactly_one_column() {
        assert_eq!(FavoriteTarget::from_columns(Some(1), None), Some(FavoriteTarget::Planet(1)));
        assert_eq!(FavoriteTarget::from_columns(None, Some(2)), Some(FavoriteTarget::Character(2)));
        assert_eq!(FavoriteTarget::from_columns(None, None), None);
        assert_eq!(FavoriteTarget::from_columns(Some(1), Some(2)), None);
    }
}
