//! OpenAPI document for the catalogue API.

use crate::error::ErrorBody;
use crate::handlers::{favorites, people, planets, users};
use crate::models::{Character, FavoriteView, Planet, User};
use crate::response::{CharacterCreated, MessageBody, PlanetCreated, UserCreated};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Favorites API", description = "Characters, planets and each user's favorites"),
    paths(
        users::list_users,
        users::get_user,
        users::create_user,
        users::list_user_favorites,
        people::list_people,
        people::get_person,
        people::create_person,
        planets::list_planets,
        planets::get_planet,
        planets::create_planet,
        favorites::add_favorite_planet,
        favorites::add_favorite_person,
        favorites::delete_favorite_planet,
        favorites::delete_favorite_person,
    ),
    components(schemas(
        User,
        Character,
        Planet,
        FavoriteView,
        ErrorBody,
        MessageBody,
        UserCreated,
        CharacterCreated,
        PlanetCreated
    )),
    tags(
        (name = "users", description = "Users and their favorites"),
        (name = "people", description = "Characters"),
        (name = "planets", description = "Planets"),
        (name = "favorites", description = "Add and remove favorites")
    )
)]
pub struct ApiDoc;
