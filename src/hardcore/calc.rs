//! Share arithmetic for death penalties and vampirism
//!
//! Both penalties take the same cut: a percentage of the level, with the
//! fractional level paid out of the experience earned toward the next level.
//! Everything truncates; nothing rounds.

use crate::hardcore::deltas::SkillDelta;

/// Split `percentage` of `level` into whole levels plus leftover experience
pub fn penalty_share(level: i32, xp_into_level: i32, percentage: f64) -> SkillDelta {
    let raw = f64::from(level) * (percentage / 100.0);
    let levels = raw as i32;
    let experience = (f64::from(xp_into_level) * (raw - f64::from(levels))).floor();
    SkillDelta { levels, experience }
}

/// Strictly above the threshold, and above zero
pub fn loses_stats(level: i32, threshold: i32) -> bool {
    level > 0 && level > threshold
}

/// The victim must hold at least half the killer's level (integer halving)
pub fn can_be_leeched(killer_level: i32, victim_level: i32, threshold: i32) -> bool {
    victim_level > 0 && victim_level >= killer_level / 2 && victim_level > threshold
}
