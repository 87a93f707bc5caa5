/*
 * Responsibility
 * - user_favorite_countries / user_favorite_dishes テーブル向け SQLx 操作
 * - (user, resource) ペアの一意性は PK が担保:
 *   add は ON CONFLICT DO NOTHING、remove は DELETE — どちらも
 *   「実際に変化したか」を bool で返し、重複 add / 空振り remove の判定は呼び出し側
 */
use sqlx::PgPool;

use crate::repos::country_repo::CountryRow;
use crate::repos::dish_repo::DishRow;
use crate::repos::error::RepoError;

/// True when the pair was inserted, false when it already existed.
pub async fn add_country(
    db: &PgPool,
    user_id: i64,
    country_id: i64,
) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        INSERT INTO user_favorite_countries (user_id, country_id)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(country_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// True when the pair was removed, false when it was not there.
pub async fn remove_country(
    db: &PgPool,
    user_id: i64,
    country_id: i64,
) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM user_favorite_countries
        WHERE user_id = $1 AND country_id = $2
        "#,
    )
    .bind(user_id)
    .bind(country_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn countries_of_user(db: &PgPool, user_id: i64) -> Result<Vec<CountryRow>, RepoError> {
    let rows = sqlx::query_as::<_, CountryRow>(
        r#"
        SELECT c.id, c.name, c.article, c."imgPath", c."rateCount", c."averageRating"
        FROM countries c
        JOIN user_favorite_countries f ON f.country_id = c.id
        WHERE f.user_id = $1
        ORDER BY c.id
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn add_dish(db: &PgPool, user_id: i64, dish_id: i64) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        INSERT INTO user_favorite_dishes (user_id, dish_id)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(dish_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn remove_dish(db: &PgPool, user_id: i64, dish_id: i64) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM user_favorite_dishes
        WHERE user_id = $1 AND dish_id = $2
        "#,
    )
    .bind(user_id)
    .bind(dish_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn dishes_of_user(db: &PgPool, user_id: i64) -> Result<Vec<DishRow>, RepoError> {
    let rows = sqlx::query_as::<_, DishRow>(
        r#"
        SELECT d.id, d.name, d.article, d."imgPath", d.country_id
        FROM dishes d
        JOIN user_favorite_dishes f ON f.dish_id = d.id
        WHERE f.user_id = $1
        ORDER BY d.id
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::{country_repo, dish_repo, user_repo};

    async fn seed_user(pool: &PgPool) -> i64 {
        user_repo::create(pool, "alice", "alice@example.com", "not-a-real-hash", "USER")
            .await
            .unwrap()
            .id
    }

    async fn seed_country(pool: &PgPool) -> i64 {
        country_repo::create(pool, "Japan", "Ramen, sushi and everything in between.", "/img/japan.png")
            .await
            .unwrap()
            .id
    }

    #[sqlx::test]
    async fn country_add_is_recorded_once_and_remove_reports_absence(pool: PgPool) {
        let user_id = seed_user(&pool).await;
        let country_id = seed_country(&pool).await;

        assert!(add_country(&pool, user_id, country_id).await.unwrap());
        // second add of the same pair changes nothing
        assert!(!add_country(&pool, user_id, country_id).await.unwrap());

        let listed = countries_of_user(&pool, user_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, country_id);

        assert!(remove_country(&pool, user_id, country_id).await.unwrap());
        assert!(!remove_country(&pool, user_id, country_id).await.unwrap());
        assert!(countries_of_user(&pool, user_id).await.unwrap().is_empty());
    }

    #[sqlx::test]
    async fn dish_favorites_follow_the_same_pair_semantics(pool: PgPool) {
        let user_id = seed_user(&pool).await;
        let country_id = seed_country(&pool).await;
        let dish_id = dish_repo::create(&pool, country_id, "Ramen", "Noodles in a rich pork broth.", "/img/ramen.png")
            .await
            .unwrap()
            .id;

        assert!(add_dish(&pool, user_id, dish_id).await.unwrap());
        assert!(!add_dish(&pool, user_id, dish_id).await.unwrap());

        let listed = dishes_of_user(&pool, user_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, dish_id);

        assert!(remove_dish(&pool, user_id, dish_id).await.unwrap());
        assert!(!remove_dish(&pool, user_id, dish_id).await.unwrap());
    }

    #[sqlx::test]
    async fn deleting_a_country_cascades_to_favorites(pool: PgPool) {
        let user_id = seed_user(&pool).await;
        let country_id = seed_country(&pool).await;
        add_country(&pool, user_id, country_id).await.unwrap();

        assert!(country_repo::delete(&pool, country_id).await.unwrap());
        assert!(countries_of_user(&pool, user_id).await.unwrap().is_empty());
    }
}
