//! XP reward table.
//!
//! Base award amounts per qualifying event, plus the ledger reason tags. The
//! amounts live here as one table so the reward curve can be reviewed and
//! tuned in a single place.

use serde::{Deserialize, Serialize};

/// Base XP for completing a lesson (watched >= 90% or explicit complete flag).
pub const XP_LESSON_COMPLETE: i32 = 25;
/// Base XP for passing a quiz.
pub const XP_QUIZ_PASS: i32 = 50;
/// XP for a perfect (100%) quiz; replaces the pass award, not added on top.
pub const XP_QUIZ_PERFECT: i32 = 100;
/// XP for finishing every lesson of a course.
pub const XP_COURSE_COMPLETE: i32 = 150;
/// Bonus XP granted each time the streak reaches a multiple of 7 days.
pub const XP_STREAK_WEEK_BONUS: i32 = 25;

/// The qualifying events the reward engine processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    LessonComplete,
    QuizComplete,
    CourseComplete,
}

impl EventKind {
    /// The `reference_type` recorded on the ledger row for this event.
    pub const fn reference_type(self) -> &'static str {
        match self {
            Self::LessonComplete => "lesson",
            Self::QuizComplete => "quiz",
            Self::CourseComplete => "course",
        }
    }
}

/// Ledger reason tags, stored as lowercase strings on `xp_transactions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XpReason {
    LessonComplete,
    QuizPass,
    QuizPerfect,
    StreakBonus,
    BadgeBonus,
    CourseComplete,
}

impl XpReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LessonComplete => "lesson_complete",
            Self::QuizPass => "quiz_pass",
            Self::QuizPerfect => "quiz_perfect",
            Self::StreakBonus => "streak_bonus",
            Self::BadgeBonus => "badge_bonus",
            Self::CourseComplete => "course_complete",
        }
    }
}

/// Look up the base award for an event.
///
/// `perfect` only matters for quizzes: a 100% score earns the perfect award
/// under its own ledger reason, so a later non-perfect retake of the same quiz
/// is still distinguishable in the transaction log.
pub fn base_award(kind: EventKind, perfect: bool) -> (i32, XpReason) {
    match (kind, perfect) {
        (EventKind::LessonComplete, _) => (XP_LESSON_COMPLETE, XpReason::LessonComplete),
        (EventKind::QuizComplete, false) => (XP_QUIZ_PASS, XpReason::QuizPass),
        (EventKind::QuizComplete, true) => (XP_QUIZ_PERFECT, XpReason::QuizPerfect),
        (EventKind::CourseComplete, _) => (XP_COURSE_COMPLETE, XpReason::CourseComplete),
    }
}
