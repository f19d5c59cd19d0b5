//! The reward engine: turns one qualifying learning event into an idempotent
//! batch of rewards.
//!
//! Everything runs inside a single SQL transaction. The ledger's partial
//! unique index is the idempotency key: a repeated submission inserts nothing
//! and the caller gets the current profile back with an empty reward list. If
//! anything fails mid-sequence the transaction rolls back and no partial
//! rewards are visible; retrying the identical event is always safe.

use chrono::Utc;
use lq_db::{
    models::{CounterUpdates, GamificationProfile},
    repositories::{activity, badges as badges_repo, ledger, profile},
};
use lq_rules::{
    badges::{self, ProfileSnapshot},
    levels, streak,
    xp::{self, EventKind, XpReason},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::ApiError,
    metrics,
    rewards::model::{RewardResponse, assemble_rewards},
};

/// A validated, normalized event ready for processing.
#[derive(Debug, Clone)]
pub struct RewardEvent {
    pub user_id: Uuid,
    pub kind: EventKind,
    /// The lesson, quiz or course id the event refers to.
    pub reference_id: String,
    /// Quiz scored 100%.
    pub perfect: bool,
}

/// Process one event and return the reward batch plus refreshed stats.
pub async fn process_event(
    pool: &PgPool,
    event: RewardEvent,
) -> Result<RewardResponse, ApiError> {
    // "Today" is a UTC calendar day; see the streak tracker docs.
    let today = Utc::now().date_naive();

    let mut tx = pool.begin().await?;

    profile::ensure_profile(&mut *tx, event.user_id).await?;

    let (base_amount, reason) = xp::base_award(event.kind, event.perfect);
    let recorded = ledger::record_transaction(
        &mut *tx,
        event.user_id,
        base_amount,
        reason.as_str(),
        event.kind.reference_type(),
        &event.reference_id,
    )
    .await?;

    if recorded.is_none() {
        // Duplicate submission: a safe no-op for rewards, but the caller still
        // gets the current profile state.
        let current = profile::get_profile(&mut *tx, event.user_id)
            .await?
            .unwrap_or_else(|| GamificationProfile::empty(event.user_id));
        tx.commit().await?;

        metrics::record_reward_event(event.kind.reference_type(), false);
        tracing::debug!(
            user_id = %event.user_id,
            reference_id = %event.reference_id,
            "duplicate event, no rewards granted"
        );

        return Ok(RewardResponse {
            rewards: Vec::new(),
            already_awarded: true,
            new_stats: (&current).into(),
        });
    }

    let counters = match event.kind {
        EventKind::LessonComplete => CounterUpdates::lesson(),
        EventKind::QuizComplete => CounterUpdates::quiz(event.perfect),
        EventKind::CourseComplete => CounterUpdates::NONE,
    };

    let mut current =
        profile::apply_delta(&mut *tx, event.user_id, i64::from(base_amount), &counters).await?;
    let xp_before = current.total_xp - i64::from(base_amount);
    let level_before = levels::level_for_xp(xp_before);

    // Streak: the first event of the day advances it, later ones are no-ops.
    let advance = streak::advance(
        streak::StreakState {
            last_activity_date: current.last_activity_date,
            current_streak_days: current.current_streak_days,
            longest_streak_days: current.longest_streak_days,
            streak_shields: current.streak_shields,
        },
        today,
    );
    let mut streak_entry = None;
    if advance.updated {
        let mut next = advance.state;

        // Weekly milestone: bonus XP (deduplicated per day) and a fresh shield.
        if streak::is_weekly_milestone(next.current_streak_days) {
            let bonus = ledger::record_transaction(
                &mut *tx,
                event.user_id,
                xp::XP_STREAK_WEEK_BONUS,
                XpReason::StreakBonus.as_str(),
                "streak",
                &today.to_string(),
            )
            .await?;
            if bonus.is_some() {
                current = profile::apply_delta(
                    &mut *tx,
                    event.user_id,
                    i64::from(xp::XP_STREAK_WEEK_BONUS),
                    &CounterUpdates::NONE,
                )
                .await?;
                next.streak_shields += 1;
            }
        }

        profile::update_streak_state(
            &mut *tx,
            event.user_id,
            next.current_streak_days,
            next.longest_streak_days,
            today,
            next.streak_shields,
        )
        .await?;
        current.current_streak_days = next.current_streak_days;
        current.longest_streak_days = next.longest_streak_days;
        current.last_activity_date = Some(today);
        current.streak_shields = next.streak_shields;

        streak_entry = Some((next, advance.shield_consumed));
    }

    // Badges, evaluated against the refreshed profile. Bonus XP from a badge
    // is not re-fed into level badges within the same event; the next event
    // picks up anything it tips over.
    let already_earned = badges_repo::earned_badge_ids(&mut *tx, event.user_id).await?;
    let snapshot = ProfileSnapshot {
        total_xp: current.total_xp,
        current_streak_days: current.current_streak_days,
        total_lessons_completed: current.total_lessons_completed,
        total_quizzes_completed: current.total_quizzes_completed,
        total_perfect_quizzes: current.total_perfect_quizzes,
    };
    let mut new_badges = Vec::new();
    for definition in badges::newly_unlocked(&snapshot, &already_earned) {
        if !badges_repo::try_award(&mut *tx, event.user_id, definition.id).await? {
            // Lost a race against a concurrent evaluation; that event reports it.
            continue;
        }
        if definition.bonus_xp > 0 {
            let bonus = ledger::record_transaction(
                &mut *tx,
                event.user_id,
                definition.bonus_xp,
                XpReason::BadgeBonus.as_str(),
                "badge",
                definition.id,
            )
            .await?;
            if bonus.is_some() {
                current = profile::apply_delta(
                    &mut *tx,
                    event.user_id,
                    i64::from(definition.bonus_xp),
                    &CounterUpdates::NONE,
                )
                .await?;
            }
        }
        new_badges.push(definition);
    }

    let total_awarded = (current.total_xp - xp_before) as i32;
    activity::record_activity(
        &mut *tx,
        event.user_id,
        today,
        counters.lessons,
        counters.quizzes,
        total_awarded,
    )
    .await?;

    let level_after = levels::level_for_xp(current.total_xp);

    tx.commit().await?;

    metrics::record_reward_event(event.kind.reference_type(), true);
    for definition in &new_badges {
        metrics::record_badge_awarded(definition.id);
    }
    tracing::info!(
        user_id = %event.user_id,
        reference_type = event.kind.reference_type(),
        reference_id = %event.reference_id,
        xp = total_awarded,
        badges = new_badges.len(),
        "event processed"
    );

    let rewards = assemble_rewards(
        base_amount,
        reason,
        &level_before,
        &level_after,
        streak_entry,
        &new_badges,
    );

    Ok(RewardResponse {
        rewards,
        already_awarded: false,
        new_stats: (&current).into(),
    })
}
