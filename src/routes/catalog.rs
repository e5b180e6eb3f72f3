//! Catalogue routes. `/users/favorites` is a static segment and wins over `/users/:id`.

use crate::handlers::{
    add_favorite_person, add_favorite_planet, create_person, create_planet, create_user, delete_favorite_person,
    delete_favorite_planet, get_person, get_planet, get_user, list_people, list_planets, list_user_favorites,
    list_users,
};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn catalog_routes(state: AppState) -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/favorites", get(list_user_favorites))
        .route("/users/:id", get(get_user))
        .route("/people", get(list_people).post(create_person))
        .route("/people/:id", get(get_person))
        .route("/planets", get(list_planets).post(create_planet))
        .route("/planets/:id", get(get_planet))
        .route(
            "/favorite/planet/:id",
            post(add_favorite_planet).delete(delete_favorite_planet),
        )
        .route(
            "/favorite/people/:id",
            post(add_favorite_person).delete(delete_favorite_person),
        )
        .with_state(state)
}
