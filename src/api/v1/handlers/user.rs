/*
 * Responsibility
 * - /user 系 handler: ログインユーザのお気に入り (country / dish) の追加・削除・一覧
 * - 対象ユーザは body ではなく AuthCtx の subject で決める (他人の一覧は見えない)
 * - 重複 add / 空振り remove は FavoriteConflict
 */
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    api::v1::dto::{countries::CountryResponse, dishes::DishResponse},
    api::v1::extractors::AuthCtx,
    error::AppError,
    repos::{country_repo, dish_repo, favorite_repo, user_repo},
    state::AppState,
};

pub async fn add_favorite_country(
    State(state): State<AppState>,
    ctx: AuthCtx,
    Path(id): Path<i64>,
) -> Result<Json<CountryResponse>, AppError> {
    let user_id = current_user_id(&state, &ctx).await?;
    let country = country_repo::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Country", "id", id))?;

    if !favorite_repo::add_country(&state.db, user_id, id).await? {
        return Err(AppError::FavoriteConflict("User already has this country"));
    }
    Ok(Json(country.into()))
}

pub async fn remove_favorite_country(
    State(state): State<AppState>,
    ctx: AuthCtx,
    Path(id): Path<i64>,
) -> Result<Json<CountryResponse>, AppError> {
    let user_id = current_user_id(&state, &ctx).await?;
    let country = country_repo::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Country", "id", id))?;

    if !favorite_repo::remove_country(&state.db, user_id, id).await? {
        return Err(AppError::FavoriteConflict("User does not have this country"));
    }
    Ok(Json(country.into()))
}

pub async fn favorite_countries(
    State(state): State<AppState>,
    ctx: AuthCtx,
) -> Result<Json<Vec<CountryResponse>>, AppError> {
    let user_id = current_user_id(&state, &ctx).await?;
    let rows = favorite_repo::countries_of_user(&state.db, user_id).await?;
    Ok(Json(rows.into_iter().map(CountryResponse::from).collect()))
}

pub async fn add_favorite_dish(
    State(state): State<AppState>,
    ctx: AuthCtx,
    Path(id): Path<i64>,
) -> Result<Json<DishResponse>, AppError> {
    let user_id = current_user_id(&state, &ctx).await?;
    let dish = dish_repo::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Dish", "id", id))?;

    if !favorite_repo::add_dish(&state.db, user_id, id).await? {
        return Err(AppError::FavoriteConflict("User already has this dish"));
    }
    Ok(Json(dish.into()))
}

pub async fn remove_favorite_dish(
    State(state): State<AppState>,
    ctx: AuthCtx,
    Path(id): Path<i64>,
) -> Result<Json<DishResponse>, AppError> {
    let user_id = current_user_id(&state, &ctx).await?;
    let dish = dish_repo::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Dish", "id", id))?;

    if !favorite_repo::remove_dish(&state.db, user_id, id).await? {
        return Err(AppError::FavoriteConflict("User does not have this dish"));
    }
    Ok(Json(dish.into()))
}

pub async fn favorite_dishes(
    State(state): State<AppState>,
    ctx: AuthCtx,
) -> Result<Json<Vec<DishResponse>>, AppError> {
    let user_id = current_user_id(&state, &ctx).await?;
    let rows = favorite_repo::dishes_of_user(&state.db, user_id).await?;
    Ok(Json(rows.into_iter().map(DishResponse::from).collect()))
}

// Gate には通っているが、その後にアカウントが消えた場合は PrincipalNotFound
async fn current_user_id(state: &AppState, ctx: &AuthCtx) -> Result<i64, AppError> {
    let user = user_repo::find_by_user_name_or_email(&state.db, &ctx.subject)
        .await?
        .ok_or(AppError::PrincipalNotFound)?;
    Ok(user.id)
}
