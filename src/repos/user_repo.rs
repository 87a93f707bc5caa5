/*
 * Responsibility
 * - users / roles / user_roles テーブル向け SQLx 操作
 * - PgPool を受け取り、認証と principal 解決に必要な読み書きを提供
 * - DB エラーは RepoError に変換して返す
 */
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: i64,
    #[sqlx(rename = "userName")]
    pub user_name: String,
    pub email: String,
    pub password: String,
}

pub async fn exists_by_user_name(db: &PgPool, user_name: &str) -> Result<bool, RepoError> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(SELECT 1 FROM users WHERE "userName" = $1)
        "#,
    )
    .bind(user_name)
    .fetch_one(db)
    .await?;

    Ok(exists)
}

pub async fn exists_by_email(db: &PgPool, email: &str) -> Result<bool, RepoError> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)
        "#,
    )
    .bind(email)
    .fetch_one(db)
    .await?;

    Ok(exists)
}

pub async fn find_by_user_name_or_email(
    db: &PgPool,
    user_name_or_email: &str,
) -> Result<Option<UserRow>, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, "userName", email, password
        FROM users
        WHERE "userName" = $1 OR email = $1
        "#,
    )
    .bind(user_name_or_email)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

/// Create a user and attach `role` in one transaction.
pub async fn create(
    db: &PgPool,
    user_name: &str,
    email: &str,
    password_hash: &str,
    role: &str,
) -> Result<UserRow, RepoError> {
    let mut tx = db.begin().await?;

    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users ("userName", email, password)
        VALUES ($1, $2, $3)
        RETURNING id, "userName", email, password
        "#,
    )
    .bind(user_name)
    .bind(email)
    .bind(password_hash)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO user_roles (user_id, role_id)
        SELECT $1, id FROM roles WHERE name = $2
        "#,
    )
    .bind(row.id)
    .bind(role)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(row)
}

/// Roles of the user named `user_name`, or `None` when no such user exists.
///
/// One read per authenticated request (principal resolution), so the lookup
/// is a single query.
pub async fn roles_by_user_name(
    db: &PgPool,
    user_name: &str,
) -> Result<Option<Vec<String>>, RepoError> {
    let roles: Option<Vec<String>> = sqlx::query_scalar(
        r#"
        SELECT COALESCE(array_agg(r.name) FILTER (WHERE r.name IS NOT NULL), ARRAY[]::text[])
        FROM users u
        LEFT JOIN user_roles ur ON ur.user_id = u.id
        LEFT JOIN roles r ON r.id = ur.role_id
        WHERE u."userName" = $1
        GROUP BY u.id
        "#,
    )
    .bind(user_name)
    .fetch_optional(db)
    .await?;

    Ok(roles)
}
