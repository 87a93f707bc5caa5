/*
 * Responsibility
 * - dishes テーブル向け SQLx 操作 (country にぶら下がる)
 */
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, FromRow)]
pub struct DishRow {
    pub id: i64,
    pub name: String,
    pub article: String,
    #[sqlx(rename = "imgPath")]
    pub img_path: String,
    pub country_id: i64,
}

const COLUMNS: &str = r#"id, name, article, "imgPath", country_id"#;

pub async fn list_by_country(db: &PgPool, country_id: i64) -> Result<Vec<DishRow>, RepoError> {
    let rows = sqlx::query_as::<_, DishRow>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM dishes
        WHERE country_id = $1
        ORDER BY id
        "#
    ))
    .bind(country_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn get(db: &PgPool, id: i64) -> Result<Option<DishRow>, RepoError> {
    let row = sqlx::query_as::<_, DishRow>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM dishes
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn create(
    db: &PgPool,
    country_id: i64,
    name: &str,
    article: &str,
    img_path: &str,
) -> Result<DishRow, RepoError> {
    let row = sqlx::query_as::<_, DishRow>(&format!(
        r#"
        INSERT INTO dishes (country_id, name, article, "imgPath")
        VALUES ($1, $2, $3, $4)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(country_id)
    .bind(name)
    .bind(article)
    .bind(img_path)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    id: i64,
    name: &str,
    article: &str,
    img_path: &str,
) -> Result<Option<DishRow>, RepoError> {
    let row = sqlx::query_as::<_, DishRow>(&format!(
        r#"
        UPDATE dishes
        SET name = $2, article = $3, "imgPath" = $4
        WHERE id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(name)
    .bind(article)
    .bind(img_path)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, id: i64) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM dishes
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
