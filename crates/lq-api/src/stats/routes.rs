//! Read-only stats for dashboard rendering.
//!
//! These routes never write: a user with no recorded activity gets zeroed
//! defaults rather than a lazily created profile row.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use lq_db::{
    models::{GamificationProfile, XpTransaction},
    repositories::{activity, badges as badges_repo, ledger, profile},
};
use lq_rules::{
    badges::{self, BadgeDefinition},
    daily::{self, DailyChallenge, DayActivity},
};

use crate::{ApiState, auth::AuthUser, error::ApiError, rewards::model::ProfileSummary};

const RECENT_TRANSACTIONS_LIMIT: i64 = 10;

/// Create the stats routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/gamification/users/{user_id}/stats", get(get_stats))
        .route(
            "/gamification/users/{user_id}/daily-challenges",
            get(get_daily_challenges),
        )
}

#[derive(Debug, Serialize)]
struct EarnedBadge {
    id: String,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    earned_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct BadgeCollection {
    earned: Vec<EarnedBadge>,
    available: Vec<&'static BadgeDefinition>,
}

#[derive(Debug, Serialize)]
struct StatsResponse {
    profile: ProfileSummary,
    badges: BadgeCollection,
    recent_transactions: Vec<XpTransaction>,
}

async fn get_stats(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<StatsResponse>, ApiError> {
    if auth_user.user_id != user_id {
        return Err(ApiError::Auth(
            "You are not authorized to view stats for this user".to_string(),
        ));
    }

    let current = profile::get_profile(&state.pool, user_id)
        .await?
        .unwrap_or_else(|| GamificationProfile::empty(user_id));

    let earned_rows = badges_repo::earned_badges(&state.pool, user_id).await?;
    let earned: Vec<EarnedBadge> = earned_rows
        .into_iter()
        .filter_map(|row| {
            badges::find(&row.badge_id).map(|def| EarnedBadge {
                id: row.badge_id,
                name: def.name,
                description: def.description,
                icon: def.icon,
                earned_at: row.earned_at,
            })
        })
        .collect();
    let available = badges::CATALOG
        .iter()
        .filter(|def| !earned.iter().any(|badge| badge.id == def.id))
        .collect();

    let recent_transactions =
        ledger::recent_transactions(&state.pool, user_id, RECENT_TRANSACTIONS_LIMIT).await?;

    Ok(Json(StatsResponse {
        profile: (&current).into(),
        badges: BadgeCollection { earned, available },
        recent_transactions,
    }))
}

#[derive(Debug, Serialize)]
struct DailyChallengesResponse {
    date: NaiveDate,
    challenges: Vec<DailyChallenge>,
}

async fn get_daily_challenges(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<DailyChallengesResponse>, ApiError> {
    if auth_user.user_id != user_id {
        return Err(ApiError::Auth(
            "You are not authorized to view challenges for this user".to_string(),
        ));
    }

    let today = Utc::now().date_naive();
    let day = activity::get_day(&state.pool, user_id, today)
        .await?
        .map_or_else(DayActivity::default, |row| DayActivity {
            lessons_completed: row.lessons_completed,
            quizzes_completed: row.quizzes_completed,
            xp_earned: row.xp_earned,
        });

    Ok(Json(DailyChallengesResponse {
        date: today,
        challenges: daily::challenges_for(&day),
    }))
}
