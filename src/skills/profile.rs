//! Per-player skill state and an in-memory profile store

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::PlayerId;
use crate::hardcore::ports::ProfileStore;
use crate::skills::SkillType;

/// Level and experience-into-level for every skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    levels: [i32; SkillType::COUNT],
    experience: [f64; SkillType::COUNT],
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerProfile {
    pub fn new() -> Self {
        Self {
            levels: [0; SkillType::COUNT],
            experience: [0.0; SkillType::COUNT],
        }
    }

    /// Builder-style helper used when seeding profiles
    pub fn with_skill(mut self, skill: SkillType, level: i32, experience: f64) -> Self {
        self.set_level(skill, level);
        self.set_experience(skill, experience);
        self
    }

    pub fn skill_level(&self, skill: SkillType) -> i32 {
        self.levels[skill.index()]
    }

    /// Experience earned toward the next level, truncated
    pub fn skill_xp_level(&self, skill: SkillType) -> i32 {
        self.experience[skill.index()] as i32
    }

    pub fn experience(&self, skill: SkillType) -> f64 {
        self.experience[skill.index()]
    }

    pub fn set_level(&mut self, skill: SkillType, level: i32) {
        self.levels[skill.index()] = level.max(0);
    }

    pub fn set_experience(&mut self, skill: SkillType, experience: f64) {
        self.experience[skill.index()] = experience.max(0.0);
    }

    pub fn add_levels(&mut self, skill: SkillType, levels: i32) {
        let current = self.skill_level(skill);
        self.set_level(skill, current.saturating_add(levels));
    }

    pub fn add_experience(&mut self, skill: SkillType, experience: f64) {
        let current = self.experience(skill);
        self.set_experience(skill, current + experience);
    }

    /// Sum of levels across non-child skills
    pub fn power_level(&self) -> i32 {
        SkillType::PRIMARY
            .iter()
            .fold(0i32, |acc, s| acc.saturating_add(self.skill_level(*s)))
    }
}

/// Profiles of online players keyed by id
#[derive(Debug, Default)]
pub struct InMemoryProfiles {
    profiles: AHashMap<PlayerId, PlayerProfile>,
}

impl InMemoryProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: PlayerId, profile: PlayerProfile) -> Option<PlayerProfile> {
        self.profiles.insert(id, profile)
    }

    pub fn remove(&mut self, id: PlayerId) -> Option<PlayerProfile> {
        self.profiles.remove(&id)
    }

    pub fn get(&self, id: PlayerId) -> Option<&PlayerProfile> {
        self.profiles.get(&id)
    }

    pub fn profile_mut(&mut self, id: PlayerId) -> Option<&mut PlayerProfile> {
        self.profiles.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl ProfileStore for InMemoryProfiles {
    fn profile(&self, id: PlayerId) -> Option<&PlayerProfile> {
        self.profiles.get(&id)
    }
}
