//! Request and response shapes for the reward engine.

use lq_db::models::GamificationProfile;
use lq_rules::{
    badges::BadgeDefinition,
    levels::{self, LevelInfo},
    streak::StreakState,
    xp::XpReason,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct LessonCompleteRequest {
    pub user_id: Uuid,
    pub lesson_id: Uuid,
    pub course_id: Uuid,
    #[validate(range(min = 0, message = "watch time cannot be negative"))]
    pub watch_time_seconds: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct QuizCompleteRequest {
    pub user_id: Uuid,
    pub quiz_id: Uuid,
    pub lesson_id: Uuid,
    #[validate(range(min = 0, message = "score cannot be negative"))]
    pub score: i32,
    #[validate(range(min = 1, message = "max score must be positive"))]
    pub max_score: i32,
    #[validate(range(min = 0.0, max = 100.0, message = "percentage must be within 0..=100"))]
    pub percentage: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CourseCompleteRequest {
    pub user_id: Uuid,
    pub course_id: Uuid,
}

/// One entry of a reward batch.
///
/// The serialized `type` tag and the batch ordering (`xp`, then `level_up`,
/// then `streak`, then one entry per badge) are a contract the presentation
/// layer depends on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RewardEntry {
    Xp {
        amount: i32,
        reason: XpReason,
    },
    LevelUp {
        level: i32,
        name: &'static str,
        icon: &'static str,
    },
    Streak {
        current_streak_days: i32,
        longest_streak_days: i32,
        shield_consumed: bool,
    },
    Badge {
        id: &'static str,
        name: &'static str,
        icon: &'static str,
        bonus_xp: i32,
    },
}

/// Aggregate profile stats returned alongside every reward batch.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub total_xp: i64,
    pub level: LevelInfo,
    pub current_streak_days: i32,
    pub longest_streak_days: i32,
    pub streak_shields: i32,
    pub total_lessons_completed: i32,
    pub total_quizzes_completed: i32,
    pub total_perfect_quizzes: i32,
}

impl From<&GamificationProfile> for ProfileSummary {
    fn from(profile: &GamificationProfile) -> Self {
        Self {
            total_xp: profile.total_xp,
            level: levels::level_for_xp(profile.total_xp),
            current_streak_days: profile.current_streak_days,
            longest_streak_days: profile.longest_streak_days,
            streak_shields: profile.streak_shields,
            total_lessons_completed: profile.total_lessons_completed,
            total_quizzes_completed: profile.total_quizzes_completed,
            total_perfect_quizzes: profile.total_perfect_quizzes,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RewardResponse {
    pub rewards: Vec<RewardEntry>,
    /// True when the dedup guard rejected a repeated submission; `rewards` is
    /// empty in that case but `new_stats` still reflects the current profile.
    pub already_awarded: bool,
    pub new_stats: ProfileSummary,
}

/// Assemble a reward batch in the contractual order.
pub fn assemble_rewards(
    base_amount: i32,
    reason: XpReason,
    level_before: &LevelInfo,
    level_after: &LevelInfo,
    streak: Option<(StreakState, bool)>,
    new_badges: &[&'static BadgeDefinition],
) -> Vec<RewardEntry> {
    let mut rewards = vec![RewardEntry::Xp {
        amount: base_amount,
        reason,
    }];

    if level_after.level > level_before.level {
        rewards.push(RewardEntry::LevelUp {
            level: level_after.level,
            name: level_after.name,
            icon: level_after.icon,
        });
    }

    if let Some((state, shield_consumed)) = streak {
        rewards.push(RewardEntry::Streak {
            current_streak_days: state.current_streak_days,
            longest_streak_days: state.longest_streak_days,
            shield_consumed,
        });
    }

    for badge in new_badges {
        rewards.push(RewardEntry::Badge {
            id: badge.id,
            name: badge.name,
            icon: badge.icon,
            bonus_xp: badge.bonus_xp,
        });
    }

    rewards
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use lq_rules::badges;

    fn streak_state(days: i32) -> StreakState {
        StreakState {
            last_activity_date: NaiveDate::from_ymd_opt(2025, 6, 10),
            current_streak_days: days,
            longest_streak_days: days,
            streak_shields: 0,
        }
    }

    #[test]
    fn test_batch_order_xp_level_streak_badges() {
        let badge = badges::find("streak-7").unwrap();
        let rewards = assemble_rewards(
            100,
            XpReason::QuizPerfect,
            &levels::level_for_xp(25),
            &levels::level_for_xp(125),
            Some((streak_state(7), false)),
            &[badge],
        );

        let tags: Vec<&str> = rewards
            .iter()
            .map(|entry| match entry {
                RewardEntry::Xp { .. } => "xp",
                RewardEntry::LevelUp { .. } => "level_up",
                RewardEntry::Streak { .. } => "streak",
                RewardEntry::Badge { .. } => "badge",
            })
            .collect();
        assert_eq!(tags, vec!["xp", "level_up", "streak", "badge"]);
    }

    #[test]
    fn test_no_level_up_entry_when_level_unchanged() {
        let rewards = assemble_rewards(
            25,
            XpReason::LessonComplete,
            &levels::level_for_xp(0),
            &levels::level_for_xp(25),
            None,
            &[],
        );
        assert_eq!(rewards.len(), 1);
        assert_eq!(
            rewards[0],
            RewardEntry::Xp {
                amount: 25,
                reason: XpReason::LessonComplete
            }
        );
    }

    #[test]
    fn test_multiple_badges_keep_order() {
        let first = badges::find("streak-3").unwrap();
        let second = badges::find("streak-7").unwrap();
        let rewards = assemble_rewards(
            25,
            XpReason::LessonComplete,
            &levels::level_for_xp(0),
            &levels::level_for_xp(25),
            None,
            &[first, second],
        );
        assert!(matches!(
            rewards[1],
            RewardEntry::Badge { id: "streak-3", .. }
        ));
        assert!(matches!(
            rewards[2],
            RewardEntry::Badge { id: "streak-7", .. }
        ));
    }

    #[test]
    fn test_reward_entry_serialization_tags() {
        let entry = RewardEntry::Xp {
            amount: 25,
            reason: XpReason::LessonComplete,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "xp");
        assert_eq!(json["reason"], "lesson_complete");
    }
}
