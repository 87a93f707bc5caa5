/*
 * Responsibility
 * - 1 投票者 1 票の rating upsert と集計列の再計算
 * - upsert → 再集計 → 集計列の永続化を 1 transaction で行う
 *   (country 行の FOR UPDATE ロックで同一 country への並行 upsert を直列化、
 *    lost update を防ぐ。別 country 同士は競合しない)
 */
use sqlx::PgPool;
use tracing::error;

use crate::error::AppError;
use crate::repos::country_repo::{self, CountryRow};
use crate::repos::rating_repo;

/// Upsert one voter's rating for a country and recompute its aggregate.
///
/// A second vote from the same `ip` overwrites the previous value; it never
/// creates a second row. The returned row carries the fresh `rate_count` /
/// `average_rating` (mean rounded to 2 decimals).
pub async fn rate_country(
    db: &PgPool,
    country_id: i64,
    ip: &str,
    rating: i32,
) -> Result<CountryRow, AppError> {
    let mut tx = db.begin().await.map_err(begin_failed)?;

    if !rating_repo::lock_country(&mut *tx, country_id).await? {
        return Err(AppError::not_found("Country", "id", country_id));
    }

    rating_repo::upsert(&mut *tx, country_id, ip, rating).await?;

    let (count, mean) = rating_repo::aggregate(&mut *tx, country_id).await?;
    let updated = country_repo::set_aggregate(
        &mut *tx,
        country_id,
        count as i32,
        round2(mean.unwrap_or(0.0)),
    )
    .await?;

    // A failed commit surfaces as an error; the transaction rolls back and
    // the previous aggregate stays intact.
    tx.commit().await.map_err(|e| {
        error!(country_id, error = %e, "rating transaction commit failed");
        AppError::Internal
    })?;

    Ok(updated)
}

fn begin_failed(e: sqlx::Error) -> AppError {
    error!(error = %e, "failed to begin rating transaction");
    AppError::Internal
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_is_rounded_to_two_decimals() {
        assert_eq!(round2(4.5), 4.5);
        assert_eq!(round2(5.0 / 3.0), 1.67);
        assert_eq!(round2(10.0 / 3.0), 3.33);
        assert_eq!(round2(0.0), 0.0);
    }

    async fn seed_country(pool: &PgPool) -> i64 {
        country_repo::create(pool, "Italy", "Pasta, espresso and long lunches.", "/img/italy.png")
            .await
            .unwrap()
            .id
    }

    async fn rating_rows(pool: &PgPool, country_id: i64) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM ratings WHERE country_id = $1")
            .bind(country_id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx::test]
    async fn second_vote_from_same_ip_overwrites_without_a_second_row(pool: PgPool) {
        let id = seed_country(&pool).await;

        let first = rate_country(&pool, id, "10.0.0.1", 5).await.unwrap();
        assert_eq!(first.rate_count, 1);
        assert_eq!(first.average_rating, 5.0);

        let second = rate_country(&pool, id, "10.0.0.1", 2).await.unwrap();
        assert_eq!(second.rate_count, 1);
        assert_eq!(second.average_rating, 2.0);
        assert_eq!(rating_rows(&pool, id).await, 1);
    }

    #[sqlx::test]
    async fn two_voters_with_four_and_five_average_to_four_point_five(pool: PgPool) {
        let id = seed_country(&pool).await;

        rate_country(&pool, id, "10.0.0.1", 4).await.unwrap();
        let updated = rate_country(&pool, id, "10.0.0.2", 5).await.unwrap();

        assert_eq!(updated.rate_count, 2);
        assert_eq!(updated.average_rating, 4.5);
    }

    #[sqlx::test]
    async fn concurrent_voters_converge_to_one_row_each(pool: PgPool) {
        let id = seed_country(&pool).await;

        let mut handles = Vec::new();
        for i in 0..10i32 {
            let pool = pool.clone();
            handles.push(tokio::spawn(async move {
                rate_country(&pool, id, &format!("10.0.0.{i}"), i % 5 + 1).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // values 1..=5 twice each
        let row = country_repo::get(&pool, id).await.unwrap().unwrap();
        assert_eq!(row.rate_count, 10);
        assert_eq!(row.average_rating, 3.0);
        assert_eq!(rating_rows(&pool, id).await, 10);
    }

    #[sqlx::test]
    async fn deleting_a_country_removes_its_ratings(pool: PgPool) {
        let id = seed_country(&pool).await;
        rate_country(&pool, id, "10.0.0.1", 4).await.unwrap();
        rate_country(&pool, id, "10.0.0.2", 5).await.unwrap();

        assert!(country_repo::delete(&pool, id).await.unwrap());
        assert_eq!(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM ratings")
                .fetch_one(&pool)
                .await
                .unwrap(),
            0
        );
        assert!(matches!(
            rate_country(&pool, id, "10.0.0.3", 3).await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[sqlx::test]
    async fn rating_an_unknown_country_is_not_found(pool: PgPool) {
        assert!(matches!(
            rate_country(&pool, 9999, "10.0.0.1", 3).await,
            Err(AppError::NotFound { .. })
        ));
        assert_eq!(rating_rows(&pool, 9999).await, 0);
    }
}
