/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - db: PgPool, tokens: TokenCodec, policy: PolicyTable, principals: resolver
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use sqlx::PgPool;

use crate::middleware::auth::policy::PolicyTable;
use crate::services::principal::PrincipalResolver;
use crate::services::token::TokenCodec;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub tokens: TokenCodec,
    pub policy: Arc<PolicyTable>,
    pub principals: Arc<dyn PrincipalResolver>,
}

impl AppState {
    pub fn new(
        db: PgPool,
        tokens: TokenCodec,
        policy: PolicyTable,
        principals: Arc<dyn PrincipalResolver>,
    ) -> Self {
        Self {
            db,
            tokens,
            policy: Arc::new(policy),
            principals,
        }
    }
}
