use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::XpTransaction;

/// Record an XP transaction, deduplicated at the storage layer.
///
/// The partial unique index over `(user_id, reference_type, reference_id,
/// reason) WHERE amount > 0` makes this an atomic insert-or-reject: a retried
/// or concurrently duplicated positive award inserts nothing and returns
/// `None`. Negative corrections bypass the guard and always insert.
pub async fn record_transaction<'e, E>(
    executor: E,
    user_id: Uuid,
    amount: i32,
    reason: &str,
    reference_type: &str,
    reference_id: &str,
) -> Result<Option<XpTransaction>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO xp_transactions (user_id, amount, reason, reference_type, reference_id)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, reference_type, reference_id, reason) WHERE amount > 0
            DO NOTHING
            RETURNING id, user_id, amount, reason, reference_type, reference_id, created_at
        "#,
    )
    .bind(user_id)
    .bind(amount)
    .bind(reason)
    .bind(reference_type)
    .bind(reference_id)
    .fetch_optional(executor)
    .await
}

/// The user's most recent ledger rows, newest first.
pub async fn recent_transactions<'e, E>(
    executor: E,
    user_id: Uuid,
    limit: i64,
) -> Result<Vec<XpTransaction>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, amount, reason, reference_type, reference_id, created_at
            FROM xp_transactions
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(executor)
    .await
}
