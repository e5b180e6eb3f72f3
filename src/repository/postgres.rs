//! PostgreSQL store via sqlx. Table names are quoted: `user` is reserved.

use super::Store;
use crate::error::AppError;
use crate::models::{
    Character, Favorite, FavoriteTarget, FavoriteView, NewCharacter, NewFavorite, NewPlanet, NewUser, Planet, User,
};
use async_trait::async_trait;
use sqlx::PgPool;

const USER_COLUMNS: &str = "id, email, password, is_active";
const CHARACTER_COLUMNS: &str = "id, name, gender, birth_year, eye_color, hair_color, height";
const PLANET_COLUMNS: &str = "id, name, climate, terrain, population";

type FavoriteRow = (i32, i32, Option<i32>, Option<i32>);

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }
}

fn favorite_from_row((id, user_id, planet_id, character_id): FavoriteRow) -> Result<Favorite, AppError> {
    let target = FavoriteTarget::from_columns(planet_id, character_id)
        .ok_or_else(|| AppError::Internal(format!("favorite {} does not reference exactly one target", id)))?;
    Ok(Favorite { id, user_id, target })
}

fn target_table(target: &FavoriteTarget) -> &'static str {
    match target {
        FavoriteTarget::Planet(_) => "\"planet\"",
        FavoriteTarget::Character(_) => "\"character\"",
    }
}

fn target_column(target: &FavoriteTarget) -> &'static str {
    match target {
        FavoriteTarget::Planet(_) => "planet_id",
        FavoriteTarget::Character(_) => "character_id",
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {} FROM \"user\" ORDER BY id", USER_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get_user(&self, id: i32) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM \"user\" WHERE id = $1", USER_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, User>(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(row)
    }

    async fn insert_user(&self, user: &NewUser) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO \"user\" (email, password, is_active) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        );
        tracing::debug!(sql = %sql, email = %user.email, "query");
        sqlx::query_as::<_, User>(&sql)
            .bind(&user.email)
            .bind(&user.password)
            .bind(user.is_active)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match AppError::from_db(e) {
                AppError::Conflict(_) => AppError::Conflict(format!("email '{}' is already registered", user.email)),
                other => other,
            })
    }

    async fn delete_user(&self, id: i32) -> Result<bool, AppError> {
        let sql = "DELETE FROM \"user\" WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let done = sqlx::query(sql).bind(id).execute(&self.pool).await.map_err(AppError::from_db)?;
        Ok(done.rows_affected() > 0)
    }

    async fn list_characters(&self) -> Result<Vec<Character>, AppError> {
        let sql = format!("SELECT {} FROM \"character\" ORDER BY id", CHARACTER_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Character>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get_character(&self, id: i32) -> Result<Option<Character>, AppError> {
        let sql = format!("SELECT {} FROM \"character\" WHERE id = $1", CHARACTER_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Character>(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(row)
    }

    async fn insert_character(&self, character: &NewCharacter) -> Result<Character, AppError> {
        let sql = format!(
            "INSERT INTO \"character\" (name, gender, birth_year, eye_color, hair_color, height) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            CHARACTER_COLUMNS
        );
        tracing::debug!(sql = %sql, name = %character.name, "query");
        sqlx::query_as::<_, Character>(&sql)
            .bind(&character.name)
            .bind(&character.gender)
            .bind(&character.birth_year)
            .bind(&character.eye_color)
            .bind(&character.hair_color)
            .bind(&character.height)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from_db)
    }

    async fn list_planets(&self) -> Result<Vec<Planet>, AppError> {
        let sql = format!("SELECT {} FROM \"planet\" ORDER BY id", PLANET_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Planet>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get_planet(&self, id: i32) -> Result<Option<Planet>, AppError> {
        let sql = format!("SELECT {} FROM \"planet\" WHERE id = $1", PLANET_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Planet>(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(row)
    }

    async fn insert_planet(&self, planet: &NewPlanet) -> Result<Planet, AppError> {
        let sql = format!(
            "INSERT INTO \"planet\" (name, climate, terrain, population) VALUES ($1, $2, $3, $4) RETURNING {}",
            PLANET_COLUMNS
        );
        tracing::debug!(sql = %sql, name = %planet.name, "query");
        sqlx::query_as::<_, Planet>(&sql)
            .bind(&planet.name)
            .bind(&planet.climate)
            .bind(&planet.terrain)
            .bind(&planet.population)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from_db)
    }

    async fn list_favorites(&self, user_id: i32) -> Result<Vec<FavoriteView>, AppError> {
        let sql = r#"
            SELECT f.id, f.user_id, p.name AS "planet", c.name AS "character"
            FROM "favorite" f
            LEFT JOIN "planet" p ON p.id = f.planet_id
            LEFT JOIN "character" c ON c.id = f.character_id
            WHERE f.user_id = $1
            ORDER BY f.id
        "#;
        tracing::debug!(sql = %sql, user_id, "query");
        let rows = sqlx::query_as::<_, FavoriteView>(sql).bind(user_id).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn insert_favorite(&self, favorite: &NewFavorite) -> Result<(Favorite, String), AppError> {
        let mut tx = self.pool.begin().await?;

        // Lock both referenced rows against concurrent deletion until commit.
        let user_sql = "SELECT id FROM \"user\" WHERE id = $1 FOR KEY SHARE";
        tracing::debug!(sql = %user_sql, user_id = favorite.user_id, "query (tx)");
        let user: Option<(i32,)> = sqlx::query_as(user_sql)
            .bind(favorite.user_id)
            .fetch_optional(&mut *tx)
            .await?;
        if user.is_none() {
            return Err(AppError::NotFound("User not found".into()));
        }

        let target_sql = format!("SELECT name FROM {} WHERE id = $1 FOR KEY SHARE", target_table(&favorite.target));
        tracing::debug!(sql = %target_sql, target = ?favorite.target, "query (tx)");
        let target: Option<(String,)> = sqlx::query_as(&target_sql)
            .bind(favorite.target.id())
            .fetch_optional(&mut *tx)
            .await?;
        let (name,) = target.ok_or_else(|| AppError::NotFound(format!("{} not found", favorite.target.label())))?;

        let insert_sql = "INSERT INTO \"favorite\" (user_id, planet_id, character_id) VALUES ($1, $2, $3) \
                          RETURNING id, user_id, planet_id, character_id";
        tracing::debug!(sql = %insert_sql, "query (tx)");
        let row: FavoriteRow = sqlx::query_as(insert_sql)
            .bind(favorite.user_id)
            .bind(favorite.target.planet_id())
            .bind(favorite.target.character_id())
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::from_db)?;
        tx.commit().await?;
        Ok((favorite_from_row(row)?, name))
    }

    async fn delete_favorite(&self, user_id: i32, target: FavoriteTarget) -> Result<Option<Favorite>, AppError> {
        let column = target_column(&target);
        let sql = format!(
            "DELETE FROM \"favorite\" WHERE id = (\
                SELECT id FROM \"favorite\" WHERE user_id = $1 AND {} = $2 ORDER BY id LIMIT 1\
             ) RETURNING id, user_id, planet_id, character_id",
            column
        );
        tracing::debug!(sql = %sql, user_id, target = ?target, "query");
        let row: Option<FavoriteRow> = sqlx::query_as(&sql)
            .bind(user_id)
            .bind(target.id())
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from_db)?;
        row.map(favorite_from_row).transpose()
    }
}
