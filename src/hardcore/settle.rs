//! Applying accepted outcomes to profiles

use crate::events::HardcoreEvent;
use crate::hardcore::deltas::SkillDeltas;
use crate::skills::{InMemoryProfiles, PlayerProfile};

/// Take each recorded loss off a profile. Nothing drops below zero.
pub fn apply_stat_loss(profile: &mut PlayerProfile, deltas: &SkillDeltas) {
    for (skill, delta) in deltas.iter() {
        profile.add_levels(skill, -delta.levels);
        profile.add_experience(skill, -delta.experience);
    }
}

/// Credit a killer with what was taken from the victim
pub fn apply_leech_gain(profile: &mut PlayerProfile, deltas: &SkillDeltas) {
    for (skill, delta) in deltas.iter() {
        profile.add_levels(skill, delta.levels);
        profile.add_experience(skill, delta.experience);
    }
}

/// Settle one accepted event against the store.
///
/// Returns false if a profile went away between the event firing and now;
/// in that case nothing is changed.
pub fn settle_event(profiles: &mut InMemoryProfiles, event: &HardcoreEvent) -> bool {
    match event {
        HardcoreEvent::StatLoss(e) => match profiles.profile_mut(e.player.id) {
            Some(profile) => {
                apply_stat_loss(profile, &e.deltas);
                true
            }
            None => false,
        },
        HardcoreEvent::Vampirism(e) => {
            if profiles.get(e.killer.id).is_none() || profiles.get(e.victim.id).is_none() {
                return false;
            }
            if let Some(victim) = profiles.profile_mut(e.victim.id) {
                apply_stat_loss(victim, &e.deltas);
            }
            if let Some(killer) = profiles.profile_mut(e.killer.id) {
                apply_leech_gain(killer, &e.deltas);
            }
            true
        }
    }
}
