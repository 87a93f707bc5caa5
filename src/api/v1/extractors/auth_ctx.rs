/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 * - request 1 回分の寿命。永続化しない、global には置かない
 */
use std::collections::HashSet;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `subject` はトークンの sub (userName)
/// - `roles` は principal 解決時に user store から読んだもの
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub subject: String,
    roles: HashSet<String>,
}

impl AuthCtx {
    pub fn new(subject: String, roles: impl IntoIterator<Item = String>) -> Self {
        Self {
            subject,
            roles: roles.into_iter().collect(),
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

impl<S> FromRequestParts<S> for AuthCtx
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // middleware が入れていなければ、その route は認証必須なのに gate を通っていない
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .ok_or(AppError::Unauthenticated)
    }
}
