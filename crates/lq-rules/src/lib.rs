//! Gamification rules for LearnQuest
//!
//! This crate holds the pure rule tables and transition functions that turn
//! learning events into rewards: the level curve, the XP reward table, the
//! daily streak state machine, the badge catalog and the derived daily
//! challenges. Nothing in here performs I/O; persistence and orchestration
//! live in `lq-db` and `lq-api`.

pub mod badges;
pub mod daily;
pub mod levels;
pub mod streak;
pub mod xp;

pub use badges::{BadgeDefinition, BadgeRule, ProfileSnapshot};
pub use levels::{LevelInfo, level_for_xp};
pub use streak::{StreakAdvance, StreakState};
pub use xp::{EventKind, XpReason};
