/*
 * Responsibility
 * - 検証済み subject → Principal (roles) の解決
 * - user store (外部) への 1 read だけをここに閉じ込める
 * - trait にしておく: middleware は実装を知らない、テストは in-memory で差し替え
 */
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

use crate::error::AppError;
use crate::repos::user_repo;

#[async_trait]
pub trait PrincipalResolver: Send + Sync + 'static {
    /// Roles of `subject`, or `None` when the subject no longer exists
    /// (e.g. the account was deleted after the token was issued).
    async fn resolve(&self, subject: &str) -> Result<Option<Vec<String>>, AppError>;
}

#[derive(Clone)]
pub struct DbPrincipalResolver {
    db: PgPool,
}

impl DbPrincipalResolver {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PrincipalResolver for DbPrincipalResolver {
    async fn resolve(&self, subject: &str) -> Result<Option<Vec<String>>, AppError> {
        user_repo::roles_by_user_name(&self.db, subject)
            .await
            .map_err(|e| {
                error!(%subject, error = %e, "principal lookup failed");
                AppError::Internal
            })
    }
}
