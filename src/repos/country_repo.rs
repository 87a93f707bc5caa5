/*
 * Responsibility
 * - countries テーブル向け SQLx 操作
 * - rateCount / averageRating は denormalized な集計列:
 *   書き込みは services::rating の transaction 経由のみ
 */
use sqlx::{FromRow, PgConnection, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, FromRow)]
pub struct CountryRow {
    pub id: i64,
    pub name: String,
    pub article: String,
    #[sqlx(rename = "imgPath")]
    pub img_path: String,
    #[sqlx(rename = "rateCount")]
    pub rate_count: i32,
    #[sqlx(rename = "averageRating")]
    pub average_rating: f64,
}

const COLUMNS: &str = r#"id, name, article, "imgPath", "rateCount", "averageRating""#;

pub async fn list(db: &PgPool) -> Result<Vec<CountryRow>, RepoError> {
    let rows = sqlx::query_as::<_, CountryRow>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM countries
        ORDER BY id
        "#
    ))
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn get(db: &PgPool, id: i64) -> Result<Option<CountryRow>, RepoError> {
    let row = sqlx::query_as::<_, CountryRow>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM countries
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn find_by_name_contains(
    db: &PgPool,
    name: &str,
) -> Result<Option<CountryRow>, RepoError> {
    let row = sqlx::query_as::<_, CountryRow>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM countries
        WHERE name ILIKE '%' || $1 || '%'
        ORDER BY id
        LIMIT 1
        "#
    ))
    .bind(name)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn random(db: &PgPool) -> Result<Option<CountryRow>, RepoError> {
    let row = sqlx::query_as::<_, CountryRow>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM countries
        ORDER BY random()
        LIMIT 1
        "#
    ))
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn exists_by_name(db: &PgPool, name: &str) -> Result<bool, RepoError> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(SELECT 1 FROM countries WHERE name = $1)
        "#,
    )
    .bind(name)
    .fetch_one(db)
    .await?;

    Ok(exists)
}

pub async fn create(
    db: &PgPool,
    name: &str,
    article: &str,
    img_path: &str,
) -> Result<CountryRow, RepoError> {
    let row = sqlx::query_as::<_, CountryRow>(&format!(
        r#"
        INSERT INTO countries (name, article, "imgPath")
        VALUES ($1, $2, $3)
        RETURNING {COLUMNS}
        "#
    ))
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
) -> Result<Option<CountryRow>, RepoError> {
    let row = sqlx::query_as::<_, CountryRow>(&format!(
        r#"
        UPDATE countries
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

/// Deleting a country cascades to its dishes, comments and ratings (FK ON
/// DELETE CASCADE), so no orphan rating ever stays queryable.
pub async fn delete(db: &PgPool, id: i64) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM countries
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Persist a recomputed aggregate. Only called with the country row locked
/// inside the rating transaction.
pub async fn set_aggregate(
    conn: &mut PgConnection,
    id: i64,
    rate_count: i32,
    average_rating: f64,
) -> Result<CountryRow, RepoError> {
    let row = sqlx::query_as::<_, CountryRow>(&format!(
        r#"
        UPDATE countries
        SET "rateCount" = $2, "averageRating" = $3
        WHERE id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(rate_count)
    .bind(average_rating)
    .fetch_one(conn)
    .await?;

    Ok(row)
}
