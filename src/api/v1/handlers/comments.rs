/*
 * Responsibility
 * - /comments 系 CRUD handler (country にネスト)
 * - 作成は認証必須 route: AuthCtx を受けて誰が書いたか log に残す
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;

use crate::{
    api::v1::dto::comments::{CommentRequest, CommentResponse},
    api::v1::extractors::AuthCtx,
    error::AppError,
    repos::{comment_repo, country_repo},
    state::AppState,
};

pub async fn create_comment(
    State(state): State<AppState>,
    ctx: AuthCtx,
    Path(country_id): Path<i64>,
    Json(req): Json<CommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("VALIDATION", m))?;

    country_repo::get(&state.db, country_id)
        .await?
        .ok_or_else(|| AppError::not_found("Country", "id", country_id))?;

    let row = comment_repo::create(&state.db, country_id, &req.name, &req.email, &req.body)
        .await?;
    info!(subject = %ctx.subject, country_id, comment_id = row.id, "comment created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn comments_by_country(
    State(state): State<AppState>,
    Path(country_id): Path<i64>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    country_repo::get(&state.db, country_id)
        .await?
        .ok_or_else(|| AppError::not_found("Country", "id", country_id))?;

    let rows = comment_repo::list_by_country(&state.db, country_id).await?;
    Ok(Json(rows.into_iter().map(CommentResponse::from).collect()))
}

pub async fn update_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<CommentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("VALIDATION", m))?;

    let row = comment_repo::update(&state.db, id, &req.name, &req.email, &req.body)
        .await?
        .ok_or_else(|| AppError::not_found("Comment", "id", id))?;
    Ok(Json(row.into()))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<&'static str, AppError> {
    let deleted = comment_repo::delete(&state.db, id).await?;
    if !deleted {
        return Err(AppError::not_found("Comment", "id", id));
    }
    Ok("Comment deleted successfully")
}
