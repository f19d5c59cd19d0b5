//! Daily streak state machine.
//!
//! A streak counts consecutive calendar days with at least one qualifying
//! activity. Calendar days are **UTC** days throughout: the server decides
//! "today" from `Utc::now().date_naive()` and every stored
//! `last_activity_date` is a UTC date, so the boundary is consistent no matter
//! which collaborator reports the event.
//!
//! A "streak shield" is a consumable that forgives exactly one missed day:
//! when a gap is detected and a shield is available, the shield is consumed
//! and the streak continues instead of resetting. Shields are earned at
//! weekly streak milestones (see `is_weekly_milestone`).

use chrono::NaiveDate;

/// The streak-relevant slice of a user's gamification profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakState {
    pub last_activity_date: Option<NaiveDate>,
    pub current_streak_days: i32,
    pub longest_streak_days: i32,
    pub streak_shields: i32,
}

/// Outcome of feeding one activity day into the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakAdvance {
    pub state: StreakState,
    /// False when today was already counted (same-day repeat activity).
    pub updated: bool,
    /// True when a shield was spent to bridge a gap.
    pub shield_consumed: bool,
}

/// Streak length at which the weekly bonus and a fresh shield are granted.
pub const WEEKLY_MILESTONE: i32 = 7;

/// Whether a streak length is a weekly milestone (7, 14, 21, ...).
pub const fn is_weekly_milestone(streak_days: i32) -> bool {
    streak_days > 0 && streak_days % WEEKLY_MILESTONE == 0
}

/// Advance the streak for an activity happening on `today`.
///
/// Transitions:
/// * already active today — no change, `updated` is false
/// * active yesterday — streak continues, +1
/// * gap of one or more missed days with a shield available — consume one
///   shield and continue (+1) instead of resetting
/// * otherwise (gap without a shield, or first-ever activity) — reset to 1
///
/// `longest_streak_days` is re-maxed after every update. The function is pure;
/// the caller persists the returned state.
pub fn advance(state: StreakState, today: NaiveDate) -> StreakAdvance {
    if state.last_activity_date == Some(today) {
        return StreakAdvance {
            state,
            updated: false,
            shield_consumed: false,
        };
    }

    let mut next = state;
    let mut shield_consumed = false;

    match state.last_activity_date {
        Some(last) if last.succ_opt() == Some(today) => {
            next.current_streak_days += 1;
        }
        Some(last) if last < today && state.streak_shields > 0 => {
            // Missed at least one day, but a shield bridges the gap.
            next.streak_shields -= 1;
            next.current_streak_days += 1;
            shield_consumed = true;
        }
        _ => {
            next.current_streak_days = 1;
        }
    }

    next.last_activity_date = Some(today);
    next.longest_streak_days = next.longest_streak_days.max(next.current_streak_days);

    StreakAdvance {
        state: next,
        updated: true,
        shield_consumed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, n).unwrap()
    }

    fn state(
        last: Option<NaiveDate>,
        current: i32,
        longest: i32,
        shields: i32,
    ) -> StreakState {
        StreakState {
            last_activity_date: last,
            current_streak_days: current,
            longest_streak_days: longest,
            streak_shields: shields,
        }
    }

    #[test]
    fn test_first_ever_activity_starts_at_one() {
        let out = advance(state(None, 0, 0, 0), day(10));
        assert!(out.updated);
        assert_eq!(out.state.current_streak_days, 1);
        assert_eq!(out.state.longest_streak_days, 1);
        assert_eq!(out.state.last_activity_date, Some(day(10)));
    }

    #[test]
    fn test_same_day_activity_does_not_advance() {
        let before = state(Some(day(10)), 4, 6, 1);
        let out = advance(before, day(10));
        assert!(!out.updated);
        assert!(!out.shield_consumed);
        assert_eq!(out.state, before);
    }

    #[test]
    fn test_consecutive_day_increments() {
        let out = advance(state(Some(day(10)), 4, 6, 0), day(11));
        assert!(out.updated);
        assert_eq!(out.state.current_streak_days, 5);
        assert_eq!(out.state.longest_streak_days, 6);
    }

    #[test]
    fn test_gap_without_shield_resets() {
        let out = advance(state(Some(day(10)), 4, 6, 0), day(12));
        assert!(out.updated);
        assert!(!out.shield_consumed);
        assert_eq!(out.state.current_streak_days, 1);
        // Longest is history, never reset.
        assert_eq!(out.state.longest_streak_days, 6);
    }

    #[test]
    fn test_gap_with_shield_continues_and_consumes_one() {
        let out = advance(state(Some(day(10)), 4, 6, 2), day(12));
        assert!(out.updated);
        assert!(out.shield_consumed);
        assert_eq!(out.state.current_streak_days, 5);
        assert_eq!(out.state.streak_shields, 1);
    }

    #[test]
    fn test_longest_streak_tracks_new_record() {
        let out = advance(state(Some(day(10)), 6, 6, 0), day(11));
        assert_eq!(out.state.current_streak_days, 7);
        assert_eq!(out.state.longest_streak_days, 7);
    }

    #[test]
    fn test_shield_is_not_spent_on_consecutive_days() {
        let out = advance(state(Some(day(10)), 2, 2, 1), day(11));
        assert!(!out.shield_consumed);
        assert_eq!(out.state.streak_shields, 1);
    }

    #[test]
    fn test_month_boundary_counts_as_consecutive() {
        let last = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let next = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let out = advance(state(Some(last), 3, 3, 0), next);
        assert_eq!(out.state.current_streak_days, 4);
    }

    #[test]
    fn test_weekly_milestone() {
        assert!(!is_weekly_milestone(0));
        assert!(!is_weekly_milestone(6));
        assert!(is_weekly_milestone(7));
        assert!(!is_weekly_milestone(8));
        assert!(is_weekly_milestone(14));
    }
}
