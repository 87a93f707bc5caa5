/*
 * Responsibility
 * - v1 の URL 構造を定義 (/auth, /countries, /dishes, /comments)
 * - 認証/認可は route 側では掛けない:
 *   gate と policy は app.rs で router 全体に layer する
 */
use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    auth::{login, signup},
    comments::{comments_by_country, create_comment, delete_comment, update_comment},
    countries::{
        country_by_name, create_country, delete_country, get_country, list_countries,
        random_country, rate_country, update_country,
    },
    dishes::{create_dish, delete_dish, dishes_by_country, get_dish, update_dish},
    health::health,
    user::{
        add_favorite_country, add_favorite_dish, favorite_countries, favorite_dishes,
        remove_favorite_country, remove_favorite_dish,
    },
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/countries", get(list_countries).post(create_country))
        .route("/countries/random", get(random_country))
        .route("/countries/name/{name}", get(country_by_name))
        .route(
            "/countries/{id}",
            get(get_country).put(update_country).delete(delete_country),
        )
        .route("/countries/{id}/rating", post(rate_country))
        .route(
            "/countries/{id}/dishes",
            get(dishes_by_country).post(create_dish),
        )
        .route(
            "/countries/{id}/comments",
            get(comments_by_country).post(create_comment),
        )
        .route("/dishes/{id}", get(get_dish).put(update_dish).delete(delete_dish))
        .route("/comments/{id}", put(update_comment).delete(delete_comment))
        .route("/user/countries", get(favorite_countries))
        .route(
            "/user/countries/{id}",
            post(add_favorite_country).delete(remove_favorite_country),
        )
        .route("/user/dishes", get(favorite_dishes))
        .route(
            "/user/dishes/{id}",
            post(add_favorite_dish).delete(remove_favorite_dish),
        )
}
