/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - repo / token / validation エラーを統一的に変換
 *
 * Notes
 * - TokenExpired と TokenInvalid は区別して返す:
 *   expired はクライアントが静かに再ログインできる、invalid は不審として扱う。
 * - Unauthenticated (ログインして) と Forbidden (権限がない) も別物。
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },

    // Signature verified but `exp` is in the past.
    #[error("Token Expired")]
    TokenExpired,

    // Signature does not verify, or the token is malformed.
    #[error("Invalid Token")]
    TokenInvalid,

    // Token verified but its subject no longer exists in the user store.
    #[error("principal not found")]
    PrincipalNotFound,

    #[error("unauthorized")]
    Unauthenticated,

    #[error("forbidden")]
    Forbidden,

    #[error("{resource} not found with {field}: {value}")]
    NotFound {
        resource: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("{field} already taken: {value}")]
    Duplicate {
        field: &'static str,
        value: String,
    },

    // Favorite add/remove in the wrong state (already present / absent).
    #[error("{0}")]
    FavoriteConflict(&'static str),

    #[error("conflict")]
    Conflict,

    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(
        resource: &'static str,
        field: &'static str,
        value: impl ToString,
    ) -> Self {
        Self::NotFound {
            resource,
            field,
            value: value.to_string(),
        }
    }

    pub fn duplicate(field: &'static str, value: impl Into<String>) -> Self {
        Self::Duplicate {
            field,
            value: value.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            AppError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                "TOKEN_EXPIRED",
                "Token Expired".into(),
            ),
            AppError::TokenInvalid => (
                StatusCode::UNAUTHORIZED,
                "TOKEN_INVALID",
                "Invalid Token".into(),
            ),
            AppError::PrincipalNotFound => (
                StatusCode::UNAUTHORIZED,
                "PRINCIPAL_NOT_FOUND",
                "principal not found".into(),
            ),
            AppError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "unauthorized".into(),
            ),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN", "forbidden".into()),
            ref e @ AppError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", e.to_string())
            }
            ref e @ AppError::Duplicate { .. } => {
                (StatusCode::CONFLICT, "DUPLICATE", e.to_string())
            }
            AppError::FavoriteConflict(message) => {
                (StatusCode::CONFLICT, "FAVORITE_CONFLICT", message.into())
            }
            AppError::Conflict => (StatusCode::CONFLICT, "CONFLICT", "conflict".into()),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict => AppError::Conflict,
            RepoError::Db(e) => {
                tracing::error!(error = %e, "database error");
                AppError::Internal
            }
        }
    }
}
