//! Badge catalog and unlock rules.
//!
//! Badges are defined in one static table and evaluated uniformly: each rule
//! is an independent, idempotent predicate over a profile snapshot. The
//! evaluator only decides which badges are *newly* satisfied; the storage
//! layer's `(user_id, badge_id)` primary key is what makes awarding safe under
//! concurrent evaluation.

use serde::Serialize;

use crate::levels;

/// Unlock condition for a badge.
///
/// Counter thresholds with a value of 1 cover the "first lesson" / "first
/// quiz" style badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeRule {
    LessonsCompleted(i32),
    QuizzesCompleted(i32),
    PerfectQuizzes(i32),
    StreakDays(i32),
    LevelReached(i32),
}

/// A row of the badge catalog.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BadgeDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    /// Bonus XP granted once when the badge unlocks.
    pub bonus_xp: i32,
    #[serde(skip)]
    pub rule: BadgeRule,
}

/// The aggregate stats a badge rule may inspect, captured after the event's
/// counters and streak have been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileSnapshot {
    pub total_xp: i64,
    pub current_streak_days: i32,
    pub total_lessons_completed: i32,
    pub total_quizzes_completed: i32,
    pub total_perfect_quizzes: i32,
}

impl BadgeRule {
    fn satisfied(self, profile: &ProfileSnapshot) -> bool {
        match self {
            Self::LessonsCompleted(n) => profile.total_lessons_completed >= n,
            Self::QuizzesCompleted(n) => profile.total_quizzes_completed >= n,
            Self::PerfectQuizzes(n) => profile.total_perfect_quizzes >= n,
            Self::StreakDays(n) => profile.current_streak_days >= n,
            Self::LevelReached(n) => levels::level_for_xp(profile.total_xp).level >= n,
        }
    }
}

/// The badge catalog.
pub const CATALOG: &[BadgeDefinition] = &[
    BadgeDefinition {
        id: "first-lesson",
        name: "First Steps",
        description: "Complete your first lesson",
        icon: "👣",
        bonus_xp: 25,
        rule: BadgeRule::LessonsCompleted(1),
    },
    BadgeDefinition {
        id: "first-quiz",
        name: "Quiz Rookie",
        description: "Pass your first quiz",
        icon: "❓",
        bonus_xp: 25,
        rule: BadgeRule::QuizzesCompleted(1),
    },
    BadgeDefinition {
        id: "perfect-quiz",
        name: "Flawless",
        description: "Score 100% on a quiz",
        icon: "💯",
        bonus_xp: 25,
        rule: BadgeRule::PerfectQuizzes(1),
    },
    BadgeDefinition {
        id: "quiz-ace",
        name: "Quiz Ace",
        description: "Score 100% on five quizzes",
        icon: "🃏",
        bonus_xp: 50,
        rule: BadgeRule::PerfectQuizzes(5),
    },
    BadgeDefinition {
        id: "lessons-10",
        name: "Dedicated Learner",
        description: "Complete 10 lessons",
        icon: "📖",
        bonus_xp: 50,
        rule: BadgeRule::LessonsCompleted(10),
    },
    BadgeDefinition {
        id: "lessons-50",
        name: "Knowledge Seeker",
        description: "Complete 50 lessons",
        icon: "🗺️",
        bonus_xp: 100,
        rule: BadgeRule::LessonsCompleted(50),
    },
    BadgeDefinition {
        id: "quizzes-25",
        name: "Quiz Veteran",
        description: "Pass 25 quizzes",
        icon: "🎯",
        bonus_xp: 75,
        rule: BadgeRule::QuizzesCompleted(25),
    },
    BadgeDefinition {
        id: "streak-3",
        name: "Warming Up",
        description: "Learn 3 days in a row",
        icon: "✨",
        bonus_xp: 25,
        rule: BadgeRule::StreakDays(3),
    },
    BadgeDefinition {
        id: "streak-7",
        name: "On Fire",
        description: "Learn 7 days in a row",
        icon: "🔥",
        bonus_xp: 50,
        rule: BadgeRule::StreakDays(7),
    },
    BadgeDefinition {
        id: "streak-30",
        name: "Unstoppable",
        description: "Learn 30 days in a row",
        icon: "🌋",
        bonus_xp: 200,
        rule: BadgeRule::StreakDays(30),
    },
    BadgeDefinition {
        id: "level-5",
        name: "Rising Star",
        description: "Reach level 5",
        icon: "⭐",
        bonus_xp: 50,
        rule: BadgeRule::LevelReached(5),
    },
    BadgeDefinition {
        id: "level-10",
        name: "Living Legend",
        description: "Reach level 10",
        icon: "👑",
        bonus_xp: 200,
        rule: BadgeRule::LevelReached(10),
    },
];

/// Look up a badge definition by id.
pub fn find(badge_id: &str) -> Option<&'static BadgeDefinition> {
    CATALOG.iter().find(|def| def.id == badge_id)
}

/// Evaluate the catalog against a refreshed profile.
///
/// Returns every badge whose rule is satisfied and whose id is not in
/// `already_earned`, in catalog order. Rule order is irrelevant (each rule is
/// independent) but a stable output order keeps reward batches deterministic.
pub fn newly_unlocked(
    profile: &ProfileSnapshot,
    already_earned: &[String],
) -> Vec<&'static BadgeDefinition> {
    CATALOG
        .iter()
        .filter(|def| !already_earned.iter().any(|earned| earned == def.id))
        .filter(|def| def.rule.satisfied(profile))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> ProfileSnapshot {
        ProfileSnapshot {
            total_xp: 0,
            current_streak_days: 0,
            total_lessons_completed: 0,
            total_quizzes_completed: 0,
            total_perfect_quizzes: 0,
        }
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        for (i, def) in CATALOG.iter().enumerate() {
            assert!(
                !CATALOG[i + 1..].iter().any(|other| other.id == def.id),
                "duplicate badge id {}",
                def.id
            );
        }
    }

    #[test]
    fn test_fresh_profile_unlocks_nothing() {
        assert!(newly_unlocked(&snapshot(), &[]).is_empty());
    }

    #[test]
    fn test_first_lesson_badge() {
        let profile = ProfileSnapshot {
            total_lessons_completed: 1,
            ..snapshot()
        };
        let unlocked = newly_unlocked(&profile, &[]);
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].id, "first-lesson");
    }

    #[test]
    fn test_already_earned_badges_are_skipped() {
        let profile = ProfileSnapshot {
            total_lessons_completed: 12,
            ..snapshot()
        };
        let earned = vec!["first-lesson".to_string(), "lessons-10".to_string()];
        assert!(newly_unlocked(&profile, &earned).is_empty());

        // Re-satisfying a rule never re-awards.
        let richer = ProfileSnapshot {
            total_lessons_completed: 20,
            ..profile
        };
        assert!(newly_unlocked(&richer, &earned).is_empty());
    }

    #[test]
    fn test_one_event_can_unlock_several_badges() {
        // A 7-day streak satisfies both streak badges at once if neither is held.
        let profile = ProfileSnapshot {
            current_streak_days: 7,
            ..snapshot()
        };
        let ids: Vec<_> = newly_unlocked(&profile, &[])
            .iter()
            .map(|def| def.id)
            .collect();
        assert_eq!(ids, vec!["streak-3", "streak-7"]);
    }

    #[test]
    fn test_level_badge_uses_the_level_curve() {
        // Level 5 floor is 1000 XP.
        let below = ProfileSnapshot {
            total_xp: 999,
            ..snapshot()
        };
        assert!(newly_unlocked(&below, &[]).is_empty());

        let at = ProfileSnapshot {
            total_xp: 1000,
            ..snapshot()
        };
        let ids: Vec<_> = newly_unlocked(&at, &[]).iter().map(|def| def.id).collect();
        assert_eq!(ids, vec!["level-5"]);
    }

    #[test]
    fn test_find() {
        assert_eq!(find("streak-7").unwrap().name, "On Fire");
        assert!(find("no-such-badge").is_none());
    }
}
