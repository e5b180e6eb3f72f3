//! In-process store with the same integrity rules as the PostgreSQL schema.
//! Used when no `DATABASE_URL` is configured, and by the test suites.

use super::Store;
use crate::error::AppError;
use crate::models::{
    Character, Favorite, FavoriteTarget, FavoriteView, NewCharacter, NewFavorite, NewPlanet, NewUser, Planet, User,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    characters: BTreeMap<i32, Character>,
    planets: BTreeMap<i32, Planet>,
    favorites: BTreeMap<i32, Favorite>,
    last_id: LastIds,
}

/// Per-table sequences; ids are never reused.
#[derive(Default)]
struct LastIds {
    user: i32,
    character: i32,
    planet: i32,
    favorite: i32,
}

fn next(seq: &mut i32) -> i32 {
    *seq += 1;
    *seq
}

impl Tables {
    fn target_name(&self, target: &FavoriteTarget) -> Option<String> {
        match target {
            FavoriteTarget::Planet(id) => self.planets.get(id).map(|p| p.name.clone()),
            FavoriteTarget::Character(id) => self.characters.get(id).map(|c| c.name.clone()),
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables
            .read()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables
            .write()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.read()?.users.values().cloned().collect())
    }

    async fn get_user(&self, id: i32) -> Result<Option<User>, AppError> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn insert_user(&self, user: &NewUser) -> Result<User, AppError> {
        let mut tables = self.write()?;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(format!("email '{}' is already registered", user.email)));
        }
        let id = next(&mut tables.last_id.user);
        let row = User {
            id,
            email: user.email.clone(),
            password: user.password.clone(),
            is_active: user.is_active,
        };
        tables.users.insert(id, row.clone());
        Ok(row)
    }

    async fn delete_user(&self, id: i32) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        tables.favorites.retain(|_, f| f.user_id != id);
        Ok(true)
    }

    async fn list_characters(&self) -> Result<Vec<Character>, AppError> {
        Ok(self.read()?.characters.values().cloned().collect())
    }

    async fn get_character(&self, id: i32) -> Result<Option<Character>, AppError> {
        Ok(self.read()?.characters.get(&id).cloned())
    }

    async fn insert_character(&self, character: &NewCharacter) -> Result<Character, AppError> {
        let mut tables = self.write()?;
        let id = next(&mut tables.last_id.character);
        let row = Character {
            id,
            name: character.name.clone(),
            gender: character.gender.clone(),
            birth_year: character.birth_year.clone(),
            eye_color: character.eye_color.clone(),
            hair_color: character.hair_color.clone(),
            height: character.height.clone(),
        };
        tables.characters.insert(id, row.clone());
        Ok(row)
    }

    async fn list_planets(&self) -> Result<Vec<Planet>, AppError> {
        Ok(self.read()?.planets.values().cloned().collect())
    }

    async fn get_planet(&self, id: i32) -> Result<Option<Planet>, AppError> {
        Ok(self.read()?.planets.get(&id).cloned())
    }

    async fn insert_planet(&self, planet: &NewPlanet) -> Result<Planet, AppError> {
        let mut tables = self.write()?;
        let id = next(&mut tables.last_id.planet);
        let row = Planet {
            id,
            name: planet.name.clone(),
            climate: planet.climate.clone(),
            terrain: planet.terrain.clone(),
            population: planet.population.clone(),
        };
        tables.planets.insert(id, row.clone());
        Ok(row)
    }

    async fn list_favorites(&self, user_id: i32) -> Result<Vec<FavoriteView>, AppError> {
        let tables = self.read()?;
        Ok(tables
            .favorites
            .values()
            .filter(|f| f.user_id == user_id)
            .map(|f| FavoriteView::new(f, tables.target_name(&f.target)))
            .collect())
    }

    async fn insert_favorite(&self, favorite: &NewFavorite) -> Result<(Favorite, String), AppError> {
        let mut tables = self.write()?;
        if !tables.users.contains_key(&favorite.user_id) {
            return Err(AppError::NotFound("User not found".into()));
        }
        let name = tables
            .target_name(&favorite.target)
            .ok_or_else(|| AppError::NotFound(format!("{} not found", favorite.target.label())))?;
        let id = next(&mut tables.last_id.favorite);
        let row = Favorite {
            id,
            user_id: favorite.user_id,
            target: favorite.target,
        };
        tables.favorites.insert(id, row.clone());
        Ok((row, name))
    }

    async fn delete_favorite(&self, user_id: i32, target: FavoriteTarget) -> Result<Option<Favorite>, AppError> {
        let mut tables = self.write()?;
        let found = tables
            .favorites
            .values()
            .find(|f| f.user_id == user_id && f.target == target)
            .map(|f| f.id);
        Ok(found.and_then(|id| tables.favorites.remove(&id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.into(),
            password: "secret".into(),
            is_active: true,
        }
    }

    fn new_planet(name: &str) -> NewPlanet {
        NewPlanet {
            name: name.into(),
            ..NewPlanet::default()
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict_and_leaves_store_unchanged() {
        let store = MemoryStore::new();
        store.insert_user(&new_user("han@falcon.io")).await.unwrap();
        let err = store.insert_user(&new_user("han@falcon.io")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn favorite_requires_existing_user_and_target() {
        let store = MemoryStore::new();
        let planet = store.insert_planet(&new_planet("Hoth")).await.unwrap();

        let err = store
            .insert_favorite(&NewFavorite {
                user_id: 1,
                target: FavoriteTarget::Planet(planet.id),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(m) if m == "User not found"));

        let user = store.insert_user(&new_user("luke@tatooine.net")).await.unwrap();
        let err = store
            .insert_favorite(&NewFavorite {
                user_id: user.id,
                target: FavoriteTarget::Character(42),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(m) if m == "Character not found"));
        assert!(store.list_favorites(user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_a_user_cascades_to_favorites() {
        let store = MemoryStore::new();
        let user = store.insert_user(&new_user("obi@kenobi.org")).await.unwrap();
        let other = store.insert_user(&new_user("qui@gon.org")).await.unwrap();
        let planet = store.insert_planet(&new_planet("Stewjon")).await.unwrap();
        for user_id in [user.id, other.id] {
            store
                .insert_favorite(&NewFavorite {
                    user_id,
                    target: FavoriteTarget::Planet(planet.id),
                })
                .await
                .unwrap();
        }

        assert!(store.delete_user(user.id).await.unwrap());
        assert!(store.list_favorites(user.id).await.unwrap().is_empty());
        assert_eq!(store.list_favorites(other.id).await.unwrap().len(), 1);
        assert!(!store.delete_user(user.id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_favorite_removes_oldest_match_only() {
        let store = MemoryStore::new();
        let user = store.insert_user(&new_user("rey@jakku.net")).await.unwrap();
        let planet = store.insert_planet(&new_planet("Jakku")).await.unwrap();
        let target = FavoriteTarget::Planet(planet.id);
        let (first, name) = store.insert_favorite(&NewFavorite { user_id: user.id, target }).await.unwrap();
        assert_eq!(name, "Jakku");
        let (second, _) = store.insert_favorite(&NewFavorite { user_id: user.id, target }).await.unwrap();

        assert_eq!(store.delete_favorite(user.id, target).await.unwrap(), Some(first));
        assert_eq!(store.delete_favorite(user.id, target).await.unwrap(), Some(second));
        assert_eq!(store.delete_favorite(user.id, target).await.unwrap(), None);
    }

    #[tokio::test]
    async fn ids_are_assigned_per_table() {
        let store = MemoryStore::new();
        let a = store.insert_planet(&new_planet("Naboo")).await.unwrap();
        let b = store.insert_planet(&new_planet("Endor")).await.unwrap();
        let c = store
            .insert_character(&NewCharacter {
                name: "Padme".into(),
                ..NewCharacter::default()
            })
            .await
            .unwrap();
        assert_eq!((a.id, b.id, c.id), (1, 2, 1));
        assert_eq!(store.get_planet(b.id).await.unwrap().map(|p| p.name), Some("Endor".into()));
    }
}
