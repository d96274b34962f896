//! Death penalties and PvP vampirism
//!
//! The manager computes how much a death or a kill should cost, announces it
//! on the event bus, and tells the players involved. It never writes to a
//! profile: the host settles accepted events itself (see `settle`).

use serde::Serialize;

use crate::core::types::Player;
use crate::hardcore::calc::{can_be_leeched, loses_stats, penalty_share};
use crate::hardcore::deltas::{SkillDelta, SkillDeltas};
use crate::hardcore::ports::{
    HardcoreEventBus, Notifier, PenaltyConfig, ProfileStore, SkillCapabilities, ZoneGuard,
};
use crate::notify::{MessageKey, NotificationType};

/// Why an operation stopped before computing anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    ZoneNotHardcore,
    MissingProfile,
}

/// What happened, for the caller. Players only ever see notifications.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PenaltyOutcome {
    Skipped(SkipReason),
    Cancelled,
    Applied {
        total_levels: i32,
        deltas: SkillDeltas,
    },
}

impl PenaltyOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, PenaltyOutcome::Applied { .. })
    }

    pub fn total_levels(&self) -> i32 {
        match self {
            PenaltyOutcome::Applied { total_levels, .. } => *total_levels,
            _ => 0,
        }
    }
}

pub struct HardcoreManager<'a> {
    zones: &'a dyn ZoneGuard,
    config: &'a dyn PenaltyConfig,
    profiles: &'a dyn ProfileStore,
    skills: &'a dyn SkillCapabilities,
    events: &'a dyn HardcoreEventBus,
    notifier: &'a dyn Notifier,
}

impl<'a> HardcoreManager<'a> {
    pub fn new(
        zones: &'a dyn ZoneGuard,
        config: &'a dyn PenaltyConfig,
        profiles: &'a dyn ProfileStore,
        skills: &'a dyn SkillCapabilities,
        events: &'a dyn HardcoreEventBus,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            zones,
            config,
            profiles,
            skills,
            events,
            notifier,
        }
    }

    /// Charge a dead player a share of every enabled skill
    pub fn apply_death_penalty(&self, player: &Player) -> PenaltyOutcome {
        if !self.in_hardcore_zone(player) {
            tracing::debug!("{} died outside a hardcore zone", player.name);
            return PenaltyOutcome::Skipped(SkipReason::ZoneNotHardcore);
        }

        let Some(profile) = self.profiles.profile(player.id) else {
            tracing::debug!("No profile loaded for {} ({})", player.name, player.id);
            return PenaltyOutcome::Skipped(SkipReason::MissingProfile);
        };

        // Config is read fresh on every death
        let policy = self.config.death_penalty();
        let mut deltas = SkillDeltas::new();
        let mut total_levels: i32 = 0;

        for &skill in self.skills.primary_skills() {
            let level = profile.skill_level(skill);

            // Disabled or protected skills still get a zero entry
            if !self.skills.stat_loss_enabled(skill)
                || !loses_stats(level, policy.level_threshold)
            {
                deltas.record(skill, SkillDelta::ZERO);
                continue;
            }

            let share = penalty_share(
                level,
                profile.skill_xp_level(skill),
                policy.penalty_percentage,
            );
            deltas.record(skill, share);
            total_levels = total_levels.saturating_add(share.levels);
        }

        // Listeners may veto; the host settles only accepted events
        if !self.events.publish_stat_loss(player, &deltas) {
            tracing::debug!("Stat loss for {} was cancelled", player.name);
            return PenaltyOutcome::Cancelled;
        }

        tracing::info!(
            player = %player.id,
            total_levels,
            "{} lost {} levels on death",
            player.name,
            total_levels
        );
        self.notifier.notify(
            player,
            NotificationType::HardcoreMode,
            MessageKey::DeathStatLoss,
            &[total_levels.to_string()],
        );

        PenaltyOutcome::Applied {
            total_levels,
            deltas,
        }
    }

    /// Let a killer leech a share of the victim's skills
    pub fn apply_vampirism(&self, killer: &Player, victim: &Player) -> PenaltyOutcome {
        if !self.in_hardcore_zone(killer) || !self.in_hardcore_zone(victim) {
            tracing::debug!(
                "{} killed {} outside a hardcore zone",
                killer.name, victim.name
            );
            return PenaltyOutcome::Skipped(SkipReason::ZoneNotHardcore);
        }

        let (Some(killer_profile), Some(victim_profile)) = (
            self.profiles.profile(killer.id),
            self.profiles.profile(victim.id),
        ) else {
            tracing::debug!("Missing profile for {} or {}", killer.name, victim.name);
            return PenaltyOutcome::Skipped(SkipReason::MissingProfile);
        };

        let policy = self.config.vampirism();
        let mut deltas = SkillDeltas::new();
        let mut total_levels: i32 = 0;

        for &skill in self.skills.primary_skills() {
            // Only the victim's level and xp are taxed; the killer's level gates it
            let killer_level = killer_profile.skill_level(skill);
            let victim_level = victim_profile.skill_level(skill);
            if !self.skills.vampirism_enabled(skill)
                || !can_be_leeched(killer_level, victim_level, policy.level_threshold)
            {
                deltas.record(skill, SkillDelta::ZERO);
                continue;
            }

            let share = penalty_share(
                victim_level,
                victim_profile.skill_xp_level(skill),
                policy.penalty_percentage,
            );
            deltas.record(skill, share);
            total_levels = total_levels.saturating_add(share.levels);
        }

        if !self.events.publish_vampirism(killer, victim, &deltas) {
            tracing::debug!(
                "Vampirism of {} by {} was cancelled",
                victim.name, killer.name
            );
            return PenaltyOutcome::Cancelled;
        }

        // Both players hear about it, success or not
        let kind = NotificationType::HardcoreMode;
        if total_levels > 0 {
            tracing::info!(
                killer = %killer.id,
                victim = %victim.id,
                total_levels,
                "{} stole {} levels from {}",
                killer.name,
                total_levels,
                victim.name
            );
            self.notifier.notify(
                killer,
                kind,
                MessageKey::VampirismKillerSuccess,
                &[total_levels.to_string(), victim.name.clone()],
            );
            self.notifier.notify(
                victim,
                kind,
                MessageKey::VampirismVictimSuccess,
                &[killer.name.clone(), total_levels.to_string()],
            );
        } else {
            self.notifier.notify(
                killer,
                kind,
                MessageKey::VampirismKillerFailure,
                &[victim.name.clone()],
            );
            self.notifier.notify(
                victim,
                kind,
                MessageKey::VampirismVictimFailure,
                &[killer.name.clone()],
            );
        }

        PenaltyOutcome::Applied {
            total_levels,
            deltas,
        }
    }

    /// True if any skill loses stats on death
    pub fn is_stat_loss_enabled(&self) -> bool {
        self.skills
            .primary_skills()
            .iter()
            .any(|s| self.skills.stat_loss_enabled(*s))
    }

    /// True if any skill can be leeched
    pub fn is_vampirism_enabled(&self) -> bool {
        self.skills
            .primary_skills()
            .iter()
            .any(|s| self.skills.vampirism_enabled(*s))
    }

    fn in_hardcore_zone(&self, player: &Player) -> bool {
        !self.zones.is_integration_active() || self.zones.has_hardcore_flag(player)
    }
}
