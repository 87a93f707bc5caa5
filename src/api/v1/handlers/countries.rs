/*
 * Responsibility
 * - /countries 系 CRUD handler + rating 投稿
 * - Path/Json を extractor で受け、DTO validation → repo/service 呼び出し
 * - 認可は policy 層で済んでいる前提 (ここでは再チェックしない)
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    api::v1::dto::{countries::{CountryRequest, CountryResponse}, ratings::RatingRequest},
    error::AppError,
    repos::country_repo,
    services,
    state::AppState,
};

pub async fn list_countries(
    State(state): State<AppState>,
) -> Result<Json<Vec<CountryResponse>>, AppError> {
    let rows = country_repo::list(&state.db).await?;
    Ok(Json(rows.into_iter().map(CountryResponse::from).collect()))
}

pub async fn get_country(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CountryResponse>, AppError> {
    let row = country_repo::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Country", "id", id))?;
    Ok(Json(row.into()))
}

pub async fn country_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CountryResponse>, AppError> {
    let row = country_repo::find_by_name_contains(&state.db, &name)
        .await?
        .ok_or_else(|| AppError::not_found("Country", "name", &name))?;
    Ok(Json(row.into()))
}

pub async fn random_country(
    State(state): State<AppState>,
) -> Result<Json<CountryResponse>, AppError> {
    let row = country_repo::random(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Country", "any", "random"))?;
    Ok(Json(row.into()))
}

pub async fn create_country(
    State(state): State<AppState>,
    Json(req): Json<CountryRequest>,
) -> Result<(StatusCode, Json<CountryResponse>), AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("VALIDATION", m))?;

    if country_repo::exists_by_name(&state.db, &req.name).await? {
        return Err(AppError::duplicate("countryName", &req.name));
    }

    let row = country_repo::create(&state.db, &req.name, &req.article, &req.img_path).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn update_country(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<CountryRequest>,
) -> Result<Json<CountryResponse>, AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("VALIDATION", m))?;

    let row = country_repo::update(&state.db, id, &req.name, &req.article, &req.img_path)
        .await?
        .ok_or_else(|| AppError::not_found("Country", "id", id))?;
    Ok(Json(row.into()))
}

pub async fn delete_country(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<&'static str, AppError> {
    let deleted = country_repo::delete(&state.db, id).await?;
    if !deleted {
        return Err(AppError::not_found("Country", "id", id));
    }
    Ok("Country deleted successfully")
}

pub async fn rate_country(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<RatingRequest>,
) -> Result<Json<CountryResponse>, AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("VALIDATION", m))?;

    let row = services::rating::rate_country(&state.db, id, &req.ip, req.rating).await?;
    Ok(Json(row.into()))
}
