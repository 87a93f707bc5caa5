/*
 * Responsibility
 * - ratings テーブル向け SQLx 操作
 * - (country_id, ip) の一意性は DB の UNIQUE 制約が担保:
 *   同じ識別子からの再投票は ON CONFLICT で値を上書き、行は増えない
 * - ここは transaction 内で使う前提 (&mut PgConnection を受ける)
 */
use sqlx::PgConnection;

use crate::repos::error::RepoError;

/// Lock the country row for the rest of the transaction.
///
/// The `FOR UPDATE` lock serializes concurrent rating upserts per country
/// (different countries do not contend). Returns false when the country
/// does not exist.
pub async fn lock_country(conn: &mut PgConnection, country_id: i64) -> Result<bool, RepoError> {
    let row: Option<i64> = sqlx::query_scalar(
        r#"
        SELECT id FROM countries WHERE id = $1 FOR UPDATE
        "#,
    )
    .bind(country_id)
    .fetch_optional(conn)
    .await?;

    Ok(row.is_some())
}

pub async fn upsert(
    conn: &mut PgConnection,
    country_id: i64,
    ip: &str,
    rating: i32,
) -> Result<(), RepoError> {
    sqlx::query(
        r#"
        INSERT INTO ratings (country_id, ip, rating)
        VALUES ($1, $2, $3)
        ON CONFLICT (country_id, ip) DO UPDATE SET rating = EXCLUDED.rating
        "#,
    )
    .bind(country_id)
    .bind(ip)
    .bind(rating)
    .execute(conn)
    .await?;

    Ok(())
}

/// `(count, mean)` over all rating rows of the country.
///
/// `mean` is None while no rows exist; the caller must not trust the stored
/// average in that case.
pub async fn aggregate(
    conn: &mut PgConnection,
    country_id: i64,
) -> Result<(i64, Option<f64>), RepoError> {
    let row: (i64, Option<f64>) = sqlx::query_as(
        r#"
        SELECT COUNT(*), AVG(rating)::double precision
        FROM ratings
        WHERE country_id = $1
        "#,
    )
    .bind(country_id)
    .fetch_one(conn)
    .await?;

    Ok(row)
}
