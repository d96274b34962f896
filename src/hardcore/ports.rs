//! Collaborators the hardcore rules call into
//!
//! All of them are owned by the host server. The manager only reads through
//! these traits and never caches what they return.

use crate::core::config::PenaltyPolicy;
use crate::core::types::{Player, PlayerId};
use crate::hardcore::deltas::SkillDeltas;
use crate::notify::{MessageKey, NotificationType};
use crate::skills::{PlayerProfile, SkillType};

/// Region-flag integration
pub trait ZoneGuard {
    /// False when no region plugin is loaded; flags are then ignored
    fn is_integration_active(&self) -> bool;

    fn has_hardcore_flag(&self, player: &Player) -> bool;
}

pub trait PenaltyConfig {
    fn death_penalty(&self) -> PenaltyPolicy;

    fn vampirism(&self) -> PenaltyPolicy;
}

pub trait ProfileStore {
    fn profile(&self, id: PlayerId) -> Option<&PlayerProfile>;
}

pub trait SkillCapabilities {
    /// Non-child skills in catalog order
    fn primary_skills(&self) -> &[SkillType];

    fn stat_loss_enabled(&self, skill: SkillType) -> bool;

    fn vampirism_enabled(&self, skill: SkillType) -> bool;
}

/// Cancellable announcements. `false` means a listener vetoed the event.
pub trait HardcoreEventBus {
    fn publish_stat_loss(&self, player: &Player, deltas: &SkillDeltas) -> bool;

    fn publish_vampirism(&self, killer: &Player, victim: &Player, deltas: &SkillDeltas) -> bool;
}

pub trait Notifier {
    fn notify(&self, player: &Player, kind: NotificationType, key: MessageKey, args: &[String]);
}
