//! Level curve for the XP system.
//!
//! Levels are defined by a strictly increasing threshold table rather than a
//! formula in code, so the curve can be tuned without touching any logic. The
//! shipped table grows triangularly: reaching level N requires the cumulative
//! XP `sum(i * 100 for i in 1..N)`, i.e. 100 XP for level 2, another 200 for
//! level 3, and so on.

use serde::Serialize;

/// A single row of the level threshold table.
#[derive(Debug, Clone, Copy)]
pub struct LevelDef {
    pub level: i32,
    pub name: &'static str,
    pub icon: &'static str,
    /// Cumulative XP required to hold this level.
    pub min_xp: i64,
}

/// The level threshold table.
///
/// Must stay sorted by `min_xp`, start at 0 and contain no duplicate
/// thresholds; `level_for_xp` relies on that ordering.
pub const LEVELS: &[LevelDef] = &[
    LevelDef { level: 1, name: "Novice", icon: "🌱", min_xp: 0 },
    LevelDef { level: 2, name: "Apprentice", icon: "📘", min_xp: 100 },
    LevelDef { level: 3, name: "Student", icon: "✏️", min_xp: 300 },
    LevelDef { level: 4, name: "Scholar", icon: "📚", min_xp: 600 },
    LevelDef { level: 5, name: "Graduate", icon: "🎓", min_xp: 1000 },
    LevelDef { level: 6, name: "Mentor", icon: "🧭", min_xp: 1500 },
    LevelDef { level: 7, name: "Expert", icon: "🏅", min_xp: 2100 },
    LevelDef { level: 8, name: "Master", icon: "🏆", min_xp: 2800 },
    LevelDef { level: 9, name: "Sage", icon: "🔮", min_xp: 3600 },
    LevelDef { level: 10, name: "Legend", icon: "👑", min_xp: 4500 },
];

/// Resolved level information for a given amount of cumulative XP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelInfo {
    pub level: i32,
    pub name: &'static str,
    pub icon: &'static str,
    /// Cumulative XP floor of the current level.
    pub min_xp: i64,
    /// The next level number, or `None` at the top of the table.
    pub next_level: Option<i32>,
    /// XP still missing to reach the next level (0 at the max level).
    pub xp_to_next: i64,
    /// Progress through the current level, floored and clamped to 0..=100.
    pub progress_percent: i32,
}

/// Map cumulative XP to a level.
///
/// Pure and deterministic: the same `xp` always yields the same level, and the
/// returned level never decreases as `xp` grows. Negative input is treated as
/// zero (the ledger never lets `total_xp` go below zero, but the function
/// should not panic on bad input either).
///
/// # Examples
///
/// ```
/// use lq_rules::levels::level_for_xp;
///
/// assert_eq!(level_for_xp(0).level, 1);
/// assert_eq!(level_for_xp(125).level, 2);
/// assert_eq!(level_for_xp(99_999).next_level, None);
/// ```
pub fn level_for_xp(xp: i64) -> LevelInfo {
    let xp = xp.max(0);

    let idx = LEVELS
        .iter()
        .rposition(|def| xp >= def.min_xp)
        .unwrap_or(0);
    let current = &LEVELS[idx];
    let next = LEVELS.get(idx + 1);

    let (next_level, xp_to_next, progress_percent) = match next {
        Some(next_def) => {
            let span = next_def.min_xp - current.min_xp;
            let into = xp - current.min_xp;
            let percent = (100 * into / span).clamp(0, 100) as i32;
            (Some(next_def.level), next_def.min_xp - xp, percent)
        }
        // Top of the table: progress is reported as complete.
        None => (None, 0, 100),
    };

    LevelInfo {
        level: current.level,
        name: current.name,
        icon: current.icon,
        min_xp: current.min_xp,
        next_level,
        xp_to_next,
        progress_percent,
    }
}
