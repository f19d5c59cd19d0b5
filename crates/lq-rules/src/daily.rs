//! Daily challenges, derived from the current day's activity counters.
//!
//! Challenges are ephemeral: nothing is persisted per challenge, they are
//! recomputed from the `activity_days` row for "today" (UTC) and implicitly
//! reset at the day boundary.

use serde::Serialize;

/// One day's raw activity counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayActivity {
    pub lessons_completed: i32,
    pub quizzes_completed: i32,
    pub xp_earned: i32,
}

/// A derived challenge with its current progress.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DailyChallenge {
    pub id: &'static str,
    pub title: &'static str,
    pub target: i32,
    pub progress: i32,
    pub completed: bool,
}

struct ChallengeDef {
    id: &'static str,
    title: &'static str,
    target: i32,
    progress: fn(&DayActivity) -> i32,
}

const CHALLENGES: &[ChallengeDef] = &[
    ChallengeDef {
        id: "daily-lesson",
        title: "Complete a lesson today",
        target: 1,
        progress: |day| day.lessons_completed,
    },
    ChallengeDef {
        id: "daily-quiz",
        title: "Pass a quiz today",
        target: 1,
        progress: |day| day.quizzes_completed,
    },
    ChallengeDef {
        id: "daily-xp-75",
        title: "Earn 75 XP today",
        target: 75,
        progress: |day| day.xp_earned,
    },
];

/// Compute today's challenges for the given activity counters.
pub fn challenges_for(activity: &DayActivity) -> Vec<DailyChallenge> {
    CHALLENGES
        .iter()
        .map(|def| {
            let progress = (def.progress)(activity).clamp(0, def.target);
            DailyChallenge {
                id: def.id,
                title: def.title,
                target: def.target,
                progress,
                completed: progress >= def.target,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_day_has_no_completed_challenges() {
        let challenges = challenges_for(&DayActivity::default());
        assert_eq!(challenges.len(), 3);
        assert!(challenges.iter().all(|c| !c.completed && c.progress == 0));
    }

    #[test]
    fn test_progress_is_clamped_to_target() {
        let day = DayActivity {
            lessons_completed: 4,
            quizzes_completed: 0,
            xp_earned: 300,
        };
        let challenges = challenges_for(&day);
        let lesson = challenges.iter().find(|c| c.id == "daily-lesson").unwrap();
        assert!(lesson.completed);
        assert_eq!(lesson.progress, 1);

        let xp = challenges.iter().find(|c| c.id == "daily-xp-75").unwrap();
        assert!(xp.completed);
        assert_eq!(xp.progress, 75);
    }

    #[test]
    fn test_partial_progress() {
        let day = DayActivity {
            lessons_completed: 0,
            quizzes_completed: 0,
            xp_earned: 50,
        };
        let xp = challenges_for(&day)
            .into_iter()
            .find(|c| c.id == "daily-xp-75")
            .unwrap();
        assert!(!xp.completed);
        assert_eq!(xp.progress, 50);
    }
}
