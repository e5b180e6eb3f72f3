//! Entity store contract and its backends.
//!
//! Both backends enforce the same integrity rules: unique user email, favorites
//! must reference an existing user and an existing planet or character, and
//! deleting a user removes that user's favorites.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::AppError;
use crate::models::{
    Character, Favorite, FavoriteTarget, FavoriteView, NewCharacter, NewFavorite, NewPlanet, NewUser, Planet, User,
};
use async_trait::async_trait;

#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;

    async fn list_users(&self) -> Result<Vec<User>, AppError>;
    async fn get_user(&self, id: i32) -> Result<Option<User>, AppError>;
    /// Fails with `Conflict` when the email is already taken.
    async fn insert_user(&self, user: &NewUser) -> Result<User, AppError>;
    /// Removes the user and, by cascade, every favorite it owns. Returns false if absent.
    async fn delete_user(&self, id: i32) -> Result<bool, AppError>;

    async fn list_characters(&self) -> Result<Vec<Character>, AppError>;
    async fn get_character(&self, id: i32) -> Result<Option<Character>, AppError>;
    async fn insert_character(&self, character: &NewCharacter) -> Result<Character, AppError>;

    async fn list_planets(&self) -> Result<Vec<Planet>, AppError>;
    async fn get_planet(&self, id: i32) -> Result<Option<Planet>, AppError>;
    async fn insert_planet(&self, planet: &NewPlanet) -> Result<Planet, AppError>;

    /// Favorites of one user, denormalized to target names.
    async fn list_favorites(&self, user_id: i32) -> Result<Vec<FavoriteView>, AppError>;
    /// Stores the favorite and returns it with the target's name.
    /// Fails with `NotFound` when the user or the target does not exist.
    async fn insert_favorite(&self, favorite: &NewFavorite) -> Result<(Favorite, String), AppError>;
    /// Deletes the oldest favorite of `user_id` pointing at `target`. None when there is none.
    async fn delete_favorite(&self, user_id: i32, target: FavoriteTarget) -> Result<Option<Favorite>, AppError>;
}
