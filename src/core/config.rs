//! Hardcore configuration
//!
//! Two independent policies, each with a percentage, a level threshold, and
//! the set of skills it applies to. Values are read through the traits in
//! `hardcore::ports` on every call, so a reloaded file takes effect on the
//! next death or kill.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{HardcoreError, Result};
use crate::hardcore::ports::{PenaltyConfig, SkillCapabilities};
use crate::skills::SkillType;

/// Default share of levels lost on death
pub const DEFAULT_DEATH_PERCENTAGE: f64 = 75.0;

/// Default share of the victim's levels leeched by a killer
pub const DEFAULT_VAMPIRISM_PERCENTAGE: f64 = 5.0;

/// Percentage and threshold for one penalty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenaltyPolicy {
    /// Share of each qualifying skill's level, 0 to 100
    pub penalty_percentage: f64,

    /// Skills at or below this level are untouched
    pub level_threshold: i32,
}

impl PenaltyPolicy {
    pub fn new(penalty_percentage: f64, level_threshold: i32) -> Self {
        Self {
            penalty_percentage,
            level_threshold,
        }
    }

    fn validate(&self, section: &str) -> std::result::Result<(), String> {
        if !self.penalty_percentage.is_finite()
            || !(0.0..=100.0).contains(&self.penalty_percentage)
        {
            return Err(format!(
                "{section}.penalty_percentage ({}) must be between 0 and 100",
                self.penalty_percentage
            ));
        }
        if self.level_threshold < 0 {
            return Err(format!(
                "{section}.level_threshold ({}) must be at least 0",
                self.level_threshold
            ));
        }
        Ok(())
    }
}

/// Per-skill on/off switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<SkillType, bool>", into = "BTreeMap<SkillType, bool>")]
pub struct SkillToggles([bool; SkillType::COUNT]);

impl SkillToggles {
    pub fn none() -> Self {
        Self([false; SkillType::COUNT])
    }

    pub fn all() -> Self {
        let mut toggles = Self::none();
        for skill in SkillType::PRIMARY {
            toggles.set(skill, true);
        }
        toggles
    }

    pub fn only(skills: &[SkillType]) -> Self {
        let mut toggles = Self::none();
        for skill in skills {
            toggles.set(*skill, true);
        }
        toggles
    }

    /// Child skills are never enabled
    pub fn is_enabled(&self, skill: SkillType) -> bool {
        !skill.is_child() && self.0[skill.index()]
    }

    pub fn set(&mut self, skill: SkillType, enabled: bool) {
        self.0[skill.index()] = enabled;
    }
}

impl From<BTreeMap<SkillType, bool>> for SkillToggles {
    fn from(map: BTreeMap<SkillType, bool>) -> Self {
        let mut toggles = Self::none();
        for (skill, enabled) in map {
            toggles.set(skill, enabled);
        }
        toggles
    }
}

impl From<SkillToggles> for BTreeMap<SkillType, bool> {
    fn from(toggles: SkillToggles) -> Self {
        SkillType::ALL
            .into_iter()
            .filter(|s| toggles.0[s.index()])
            .map(|s| (s, true))
            .collect()
    }
}

/// One `[death_penalty]` or `[vampirism]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicySection {
    #[serde(flatten)]
    pub policy: PenaltyPolicy,

    #[serde(default)]
    pub enabled: SkillToggles,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardcoreConfig {
    #[serde(default = "default_death_penalty")]
    pub death_penalty: PolicySection,

    #[serde(default = "default_vampirism")]
    pub vampirism: PolicySection,
}

fn default_death_penalty() -> PolicySection {
    PolicySection {
        policy: PenaltyPolicy::new(DEFAULT_DEATH_PERCENTAGE, 0),
        enabled: SkillToggles::none(),
    }
}

fn default_vampirism() -> PolicySection {
    PolicySection {
        policy: PenaltyPolicy::new(DEFAULT_VAMPIRISM_PERCENTAGE, 0),
        enabled: SkillToggles::none(),
    }
}

impl Default for HardcoreConfig {
    fn default() -> Self {
        Self {
            death_penalty: default_death_penalty(),
            vampirism: default_vampirism(),
        }
    }
}

impl HardcoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: HardcoreConfig = toml::from_str(content)?;
        config.validate().map_err(HardcoreError::InvalidConfig)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.death_penalty.policy.validate("death_penalty")?;
        self.vampirism.policy.validate("vampirism")?;
        Ok(())
    }
}

/// Load a config file from disk
pub fn load_config(path: &Path) -> Result<HardcoreConfig> {
    let content = fs::read_to_string(path)?;
    let config = HardcoreConfig::from_toml(&content)?;
    tracing::debug!("Loaded hardcore config from {}", path.display());
    Ok(config)
}

impl PenaltyConfig for HardcoreConfig {
    fn death_penalty(&self) -> PenaltyPolicy {
        self.death_penalty.policy
    }

    fn vampirism(&self) -> PenaltyPolicy {
        self.vampirism.policy
    }
}

impl SkillCapabilities for HardcoreConfig {
    fn primary_skills(&self) -> &[SkillType] {
        &SkillType::PRIMARY
    }

    fn stat_loss_enabled(&self, skill: SkillType) -> bool {
        self.death_penalty.enabled.is_enabled(skill)
    }

    fn vampirism_enabled(&self, skill: SkillType) -> bool {
        self.vampirism.enabled.is_enabled(skill)
    }
}

/// A config file that can be re-read while the server runs
#[derive(Debug)]
pub struct ReloadableConfig {
    path: PathBuf,
    current: RefCell<HardcoreConfig>,
}

impl ReloadableConfig {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let config = load_config(&path)?;
        Ok(Self {
            path,
            current: RefCell::new(config),
        })
    }

    /// Re-read the file. The previous values stay in place on error.
    pub fn reload(&self) -> Result<()> {
        match load_config(&self.path) {
            Ok(config) => {
                *self.current.borrow_mut() = config;
                tracing::info!("Reloaded hardcore config from {}", self.path.display());
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Keeping previous hardcore config: {}", e);
                Err(e)
            }
        }
    }

    pub fn snapshot(&self) -> HardcoreConfig {
        self.current.borrow().clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PenaltyConfig for ReloadableConfig {
    fn death_penalty(&self) -> PenaltyPolicy {
        self.current.borrow().death_penalty.policy
    }

    fn vampirism(&self) -> PenaltyPolicy {
        self.current.borrow().vampirism.policy
    }
}

impl SkillCapabilities for ReloadableConfig {
    fn primary_skills(&self) -> &[SkillType] {
        &SkillType::PRIMARY
    }

    fn stat_loss_enabled(&self, skill: SkillType) -> bool {
        let config = self.current.borrow();
        config.death_penalty.enabled.is_enabled(skill)
    }

    fn vampirism_enabled(&self, skill: SkillType) -> bool {
        let config = self.current.borrow();
        config.vampirism.enabled.is_enabled(skill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HardcoreConfig::default();
        assert_eq!(config.death_penalty().penalty_percentage, 75.0);
        assert_eq!(config.vampirism().penalty_percentage, 5.0);
        assert_eq!(config.death_penalty().level_threshold, 0);
        assert!(SkillType::ALL.iter().all(|s| !config.stat_loss_enabled(*s)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_document() {
        let config = HardcoreConfig::from_toml(
            r#"
            [death_penalty]
            penalty_percentage = 12.5
            level_threshold = 10

            [death_penalty.enabled]
            mining = true
            swords = false

            [vampirism]
            penalty_percentage = 3.0
            level_threshold = 0

            [vampirism.enabled]
            archery = true
            "#,
        )
        .unwrap();

        assert_eq!(config.death_penalty(), PenaltyPolicy::new(12.5, 10));
        assert_eq!(config.vampirism(), PenaltyPolicy::new(3.0, 0));
        assert!(config.stat_loss_enabled(SkillType::Mining));
        assert!(!config.stat_loss_enabled(SkillType::Swords));
        assert!(config.vampirism_enabled(SkillType::Archery));
        assert!(!config.vampirism_enabled(SkillType::Mining));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = HardcoreConfig::from_toml("").unwrap();
        assert_eq!(config, HardcoreConfig::default());
    }

    #[test]
    fn test_child_skills_stay_disabled() {
        let config = HardcoreConfig::from_toml(
            r#"
            [death_penalty]
            penalty_percentage = 10.0
            level_threshold = 0

            [death_penalty.enabled]
            smelting = true
            "#,
        )
        .unwrap();
        assert!(!config.stat_loss_enabled(SkillType::Smelting));
    }

    #[test]
    fn test_rejects_out_of_range_percentage() {
        let result = HardcoreConfig::from_toml(
            r#"
            [vampirism]
            penalty_percentage = 150.0
            level_threshold = 0
            "#,
        );
        assert!(matches!(result, Err(HardcoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let mut config = HardcoreConfig::default();
        config.death_penalty.policy.level_threshold = -1;
        let err = config.validate().unwrap_err();
        assert!(err.contains("death_penalty.level_threshold"));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let result = HardcoreConfig::from_toml("[death_penalty\npenalty_percentage = ");
        assert!(matches!(result, Err(HardcoreError::Toml(_))));
    }

    #[test]
    fn test_toggles_round_trip_through_map() {
        let toggles = SkillToggles::only(&[SkillType::Axes, SkillType::Taming]);
        let map: BTreeMap<SkillType, bool> = toggles.into();
        assert_eq!(map.len(), 2);
        assert_eq!(SkillToggles::from(map), toggles);
    }

    #[test]
    fn test_all_toggles_cover_primary_skills() {
        let toggles = SkillToggles::all();
        assert!(SkillType::PRIMARY.iter().all(|s| toggles.is_enabled(*s)));
        assert!(!toggles.is_enabled(SkillType::Salvage));
    }
}
