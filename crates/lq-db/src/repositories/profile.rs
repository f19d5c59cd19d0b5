use chrono::NaiveDate;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{CounterUpdates, GamificationProfile};

/// Create the profile row with zeroed defaults if it does not exist yet.
/// Safe under concurrent first events for the same user.
pub async fn ensure_profile<'e, E>(executor: E, user_id: Uuid) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO gamification_profiles (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn get_profile<'e, E>(
    executor: E,
    user_id: Uuid,
) -> Result<Option<GamificationProfile>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT user_id, total_xp, current_streak_days, longest_streak_days,
                   last_activity_date, streak_shields, total_lessons_completed,
                   total_quizzes_completed, total_perfect_quizzes, created_at, updated_at
            FROM gamification_profiles
            WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

/// Atomically add an XP delta and counter increments to the profile.
///
/// The increments happen inside the UPDATE (`total_xp = total_xp + $2`), never
/// as a read-modify-write in application code, so concurrent events for the
/// same user cannot lose updates. Returns the refreshed row.
pub async fn apply_delta<'e, E>(
    executor: E,
    user_id: Uuid,
    xp_delta: i64,
    counters: &CounterUpdates,
) -> Result<GamificationProfile, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE gamification_profiles
            SET total_xp = total_xp + $2,
                total_lessons_completed = total_lessons_completed + $3,
                total_quizzes_completed = total_quizzes_completed + $4,
                total_perfect_quizzes = total_perfect_quizzes + $5,
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING user_id, total_xp, current_streak_days, longest_streak_days,
                      last_activity_date, streak_shields, total_lessons_completed,
                      total_quizzes_completed, total_perfect_quizzes, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(xp_delta)
    .bind(counters.lessons)
    .bind(counters.quizzes)
    .bind(counters.perfect_quizzes)
    .fetch_one(executor)
    .await
}

/// Persist the streak fields computed by the streak tracker.
pub async fn update_streak_state<'e, E>(
    executor: E,
    user_id: Uuid,
    current_streak_days: i32,
    longest_streak_days: i32,
    last_activity_date: NaiveDate,
    streak_shields: i32,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE gamification_profiles
            SET current_streak_days = $2,
                longest_streak_days = $3,
                last_activity_date = $4,
                streak_shields = $5,
                updated_at = NOW()
            WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .bind(current_streak_days)
    .bind(longest_streak_days)
    .bind(last_activity_date)
    .bind(streak_shields)
    .execute(executor)
    .await?;
    Ok(())
}
