use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-user gamification aggregates. One row per user, created lazily on the
/// first gamification event and mutated only by the reward engine.
///
/// `total_xp` is monotonically non-decreasing: it only changes through
/// `apply_delta`, and decreasing it would require an explicit reversal
/// transaction on the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GamificationProfile {
    pub user_id: Uuid,
    pub total_xp: i64,
    pub current_streak_days: i32,
    pub longest_streak_days: i32,
    /// UTC calendar date of the last qualifying activity.
    pub last_activity_date: Option<NaiveDate>,
    pub streak_shields: i32,
    pub total_lessons_completed: i32,
    pub total_quizzes_completed: i32,
    pub total_perfect_quizzes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GamificationProfile {
    /// Zeroed defaults for a user with no recorded activity. Used by the
    /// read-only stats path, which must not create rows.
    pub fn empty(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            total_xp: 0,
            current_streak_days: 0,
            longest_streak_days: 0,
            last_activity_date: None,
            streak_shields: 0,
            total_lessons_completed: 0,
            total_quizzes_completed: 0,
            total_perfect_quizzes: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Append-only XP ledger row. Immutable once written; corrections are new
/// rows with a negative amount, never updates.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct XpTransaction {
    pub id: i64,
    pub user_id: Uuid,
    /// May be negative for corrections; the dedup guard only covers positive
    /// awards.
    pub amount: i32,
    pub reason: String,
    /// What triggered the award ("lesson", "quiz", "course", "streak", "badge").
    pub reference_type: String,
    pub reference_id: String,
    pub created_at: DateTime<Utc>,
}

/// A badge a user has earned. `(user_id, badge_id)` is the primary key, so a
/// badge can never be awarded twice.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserBadge {
    pub user_id: Uuid,
    pub badge_id: String,
    pub earned_at: DateTime<Utc>,
}

/// Per-day activity counters, the source data for daily challenges.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ActivityDay {
    pub activity_date: NaiveDate,
    pub lessons_completed: i32,
    pub quizzes_completed: i32,
    pub xp_earned: i32,
}

/// Counter increments applied together with an XP delta in `apply_delta`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CounterUpdates {
    pub lessons: i32,
    pub quizzes: i32,
    pub perfect_quizzes: i32,
}

impl CounterUpdates {
    pub const NONE: Self = Self {
        lessons: 0,
        quizzes: 0,
        perfect_quizzes: 0,
    };

    pub const fn lesson() -> Self {
        Self {
            lessons: 1,
            quizzes: 0,
            perfect_quizzes: 0,
        }
    }

    pub const fn quiz(perfect: bool) -> Self {
        Self {
            lessons: 0,
            quizzes: 1,
            perfect_quizzes: if perfect { 1 } else { 0 },
        }
    }
}
