/*
 * Responsibility
 * - comments テーブル向け SQLx 操作 (country にぶら下がる)
 */
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, FromRow)]
pub struct CommentRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
    pub country_id: i64,
}

const COLUMNS: &str = "id, name, email, body, country_id";

pub async fn list_by_country(db: &PgPool, country_id: i64) -> Result<Vec<CommentRow>, RepoError> {
    let rows = sqlx::query_as::<_, CommentRow>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM comments
        WHERE country_id = $1
        ORDER BY id
        "#
    ))
    .bind(country_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn create(
    db: &PgPool,
    country_id: i64,
    name: &str,
    email: &str,
    body: &str,
) -> Result<CommentRow, RepoError> {
    let row = sqlx::query_as::<_, CommentRow>(&format!(
        r#"
        INSERT INTO comments (country_id, name, email, body)
        VALUES ($1, $2, $3, $4)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(country_id)
    .bind(name)
    .bind(email)
    .bind(body)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    id: i64,
    name: &str,
    email: &str,
    body: &str,
) -> Result<Option<CommentRow>, RepoError> {
    let row = sqlx::query_as::<_, CommentRow>(&format!(
        r#"
        UPDATE comments
        SET name = $2, email = $3, body = $4
        WHERE id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(body)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, id: i64) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM comments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
