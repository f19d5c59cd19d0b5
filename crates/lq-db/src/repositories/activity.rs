use chrono::NaiveDate;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::ActivityDay;

/// Upsert-increment the per-day activity counters for one event.
pub async fn record_activity<'e, E>(
    executor: E,
    user_id: Uuid,
    activity_date: NaiveDate,
    lessons: i32,
    quizzes: i32,
    xp: i32,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO activity_days (user_id, activity_date, lessons_completed, quizzes_completed, xp_earned)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, activity_date)
            DO UPDATE SET
                lessons_completed = activity_days.lessons_completed + $3,
                quizzes_completed = activity_days.quizzes_completed + $4,
                xp_earned = activity_days.xp_earned + $5
        "#,
    )
    .bind(user_id)
    .bind(activity_date)
    .bind(lessons)
    .bind(quizzes)
    .bind(xp)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn get_day<'e, E>(
    executor: E,
    user_id: Uuid,
    activity_date: NaiveDate,
) -> Result<Option<ActivityDay>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT activity_date, lessons_completed, quizzes_completed, xp_earned
            FROM activity_days
            WHERE user_id = $1 AND activity_date = $2
        "#,
    )
    .bind(user_id)
    .bind(activity_date)
    .fetch_optional(executor)
    .await
}
