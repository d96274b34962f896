//! Per-skill outcome of a single penalty computation

use serde::{Deserialize, Serialize};

use crate::skills::SkillType;

/// Levels and experience moved for one skill
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillDelta {
    pub levels: i32,
    pub experience: f64,
}

impl SkillDelta {
    pub const ZERO: SkillDelta = SkillDelta {
        levels: 0,
        experience: 0.0,
    };

    pub fn new(levels: i32, experience: f64) -> Self {
        Self { levels, experience }
    }

    pub fn is_zero(&self) -> bool {
        self.levels == 0 && self.experience == 0.0
    }
}

/// Fixed-size table indexed by skill. A slot is filled once the skill has
/// been visited, even when nothing moved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillDeltas {
    slots: [Option<SkillDelta>; SkillType::COUNT],
}

impl SkillDeltas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, skill: SkillType, delta: SkillDelta) {
        self.slots[skill.index()] = Some(delta);
    }

    pub fn get(&self, skill: SkillType) -> Option<SkillDelta> {
        self.slots[skill.index()]
    }

    pub fn levels(&self, skill: SkillType) -> i32 {
        self.get(skill).map_or(0, |d| d.levels)
    }

    pub fn experience(&self, skill: SkillType) -> f64 {
        self.get(skill).map_or(0.0, |d| d.experience)
    }

    /// Recorded entries in skill order
    pub fn iter(&self) -> impl Iterator<Item = (SkillType, SkillDelta)> + '_ {
        SkillType::ALL
            .into_iter()
            .filter_map(|skill| self.get(skill).map(|d| (skill, d)))
    }

    pub fn recorded(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Sum of recorded levels, clamped to `i32` bounds
    pub fn total_levels(&self) -> i32 {
        self.iter()
            .fold(0i32, |acc, (_, d)| acc.saturating_add(d.levels))
    }

    /// True when no recorded skill moves anything
    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, d)| d.is_zero())
    }
}
