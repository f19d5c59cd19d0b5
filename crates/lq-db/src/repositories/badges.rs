use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::UserBadge;

pub async fn earned_badge_ids<'e, E>(
    executor: E,
    user_id: Uuid,
) -> Result<Vec<String>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT badge_id
            FROM user_badges
            WHERE user_id = $1
            ORDER BY earned_at
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}

pub async fn earned_badges<'e, E>(
    executor: E,
    user_id: Uuid,
) -> Result<Vec<UserBadge>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT user_id, badge_id, earned_at
            FROM user_badges
            WHERE user_id = $1
            ORDER BY earned_at
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}

/// Award a badge if the user does not hold it yet.
///
/// The `(user_id, badge_id)` primary key makes the insert race-free: under
/// concurrent evaluation exactly one caller sees `true`.
pub async fn try_award<'e, E>(
    executor: E,
    user_id: Uuid,
    badge_id: &str,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO user_badges (user_id, badge_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, badge_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(badge_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}
