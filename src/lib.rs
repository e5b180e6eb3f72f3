//! Favorites API: characters, planets and per-user favorites over HTTP/JSON.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod openapi;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError};
pub use extractors::{Principal, USER_ID_HEADER};
pub use migration::{apply_migrations, ensure_database_exists};
pub use models::{Character, Favorite, FavoriteTarget, FavoriteView, Planet, User};
pub use repository::{MemoryStore, PgStore, Store};
pub use routes::{app_router, catalog_routes, common_routes};
pub use service::CatalogService;
pub use state::AppState;
