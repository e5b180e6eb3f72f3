//! Bring the database to the catalogue schema: create the database if missing, then the four tables.
//! Order follows foreign-key dependencies. Every statement is idempotent.

use crate::error::{AppError, ConfigError};
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

const SCHEMA: &[(&str, &str)] = &[
    (
        "user",
        r#"
        CREATE TABLE IF NOT EXISTS "user" (
            id SERIAL PRIMARY KEY,
            email VARCHAR(120) NOT NULL UNIQUE,
            password VARCHAR(80) NOT NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE
        )
        "#,
    ),
    (
        "character",
        r#"
        CREATE TABLE IF NOT EXISTS "character" (
            id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            gender VARCHAR(20),
            birth_year VARCHAR(20),
            eye_color VARCHAR(20),
            hair_color VARCHAR(20),
            height VARCHAR(20)
        )
        "#,
    ),
    (
        "planet",
        r#"
        CREATE TABLE IF NOT EXISTS "planet" (
            id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            climate VARCHAR(50),
            terrain VARCHAR(50),
            population VARCHAR(50)
        )
        "#,
    ),
    (
        "favorite",
        r#"
        CREATE TABLE IF NOT EXISTS "favorite" (
            id SERIAL PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES "user" (id) ON DELETE CASCADE,
            planet_id INTEGER REFERENCES "planet" (id),
            character_id INTEGER REFERENCES "character" (id),
            CONSTRAINT favorite_exactly_one_target CHECK ((planet_id IS NULL) <> (character_id IS NULL))
        )
        "#,
    ),
];

const INDEXES: &[&str] = &[
    r#"CREATE INDEX IF NOT EXISTS favorite_user_planet_idx ON "favorite" (user_id, planet_id)"#,
    r#"CREATE INDEX IF NOT EXISTS favorite_user_character_idx ON "favorite" (user_id, character_id)"#,
];

/// Create the catalogue tables and indexes if they do not exist.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    for (table, ddl) in SCHEMA {
        tracing::debug!(table = %table, "ensuring table");
        sqlx::query(ddl).execute(pool).await?;
    }
    for ddl in INDEXES {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!(tables = SCHEMA.len(), "schema ready");
    Ok(())
}

/// Connect to the server's `postgres` database and create the target database when missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split `scheme://auth@host/db?params` into the admin URL (same server, `postgres` db) and `db`.
fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url
        .get(scheme_end..)
        .and_then(|rest| rest.find('/'))
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| ConfigError::DatabaseUrl("no database path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut parts = path_and_query.splitn(2, '?');
    let db_name = parts.next().unwrap_or("").trim().to_string();
    let query = parts.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres{}", base, query), db_name))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
