/*
 * Responsibility
 * - /dishes 系 CRUD handler (country にネスト)
 * - 作成時は親 country の存在チェック → 無ければ NotFound
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    api::v1::dto::dishes::{DishRequest, DishResponse},
    error::AppError,
    repos::{country_repo, dish_repo},
    state::AppState,
};

pub async fn create_dish(
    State(state): State<AppState>,
    Path(country_id): Path<i64>,
    Json(req): Json<DishRequest>,
) -> Result<(StatusCode, Json<DishResponse>), AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("VALIDATION", m))?;

    country_repo::get(&state.db, country_id)
        .await?
        .ok_or_else(|| AppError::not_found("Country", "id", country_id))?;

    let row = dish_repo::create(&state.db, country_id, &req.name, &req.article, &req.img_path)
        .await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn dishes_by_country(
    State(state): State<AppState>,
    Path(country_id): Path<i64>,
) -> Result<Json<Vec<DishResponse>>, AppError> {
    country_repo::get(&state.db, country_id)
        .await?
        .ok_or_else(|| AppError::not_found("Country", "id", country_id))?;

    let rows = dish_repo::list_by_country(&state.db, country_id).await?;
    Ok(Json(rows.into_iter().map(DishResponse::from).collect()))
}

pub async fn get_dish(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DishResponse>, AppError> {
    let row = dish_repo::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Dish", "id", id))?;
    Ok(Json(row.into()))
}

pub async fn update_dish(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<DishRequest>,
) -> Result<Json<DishResponse>, AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("VALIDATION", m))?;

    let row = dish_repo::update(&state.db, id, &req.name, &req.article, &req.img_path)
        .await?
        .ok_or_else(|| AppError::not_found("Dish", "id", id))?;
    Ok(Json(row.into()))
}

pub async fn delete_dish(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<&'static str, AppError> {
    let deleted = dish_repo::delete(&state.db, id).await?;
    if !deleted {
        return Err(AppError::not_found("Dish", "id", id));
    }
    Ok("Dish deleted successfully")
}
