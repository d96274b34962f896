//! Zone-flag checks
//!
//! With no region integration every zone counts as hardcore. With it, a
//! player is only subject to hardcore rules while standing in a flagged region.

use ahash::{AHashMap, AHashSet};

use crate::core::types::{Player, PlayerId};
use crate::hardcore::ports::ZoneGuard;

/// Used when no region plugin is present
#[derive(Debug, Default, Clone, Copy)]
pub struct NoZoneIntegration;

impl ZoneGuard for NoZoneIntegration {
    fn is_integration_active(&self) -> bool {
        false
    }

    fn has_hardcore_flag(&self, _player: &Player) -> bool {
        true
    }
}

/// Player locations and the regions carrying the hardcore flag
#[derive(Debug, Default, Clone)]
pub struct RegionFlags {
    locations: AHashMap<PlayerId, String>,
    hardcore_regions: AHashSet<String>,
}

impl RegionFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flag_region(&mut self, region: impl Into<String>) {
        self.hardcore_regions.insert(region.into());
    }

    pub fn unflag_region(&mut self, region: &str) -> bool {
        self.hardcore_regions.remove(region)
    }

    pub fn move_player(&mut self, id: PlayerId, region: impl Into<String>) {
        self.locations.insert(id, region.into());
    }

    pub fn region_of(&self, id: PlayerId) -> Option<&str> {
        self.locations.get(&id).map(String::as_str)
    }
}

impl ZoneGuard for RegionFlags {
    fn is_integration_active(&self) -> bool {
        true
    }

    fn has_hardcore_flag(&self, player: &Player) -> bool {
        self.region_of(player.id)
            .is_some_and(|region| self.hardcore_regions.contains(region))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_integration_is_inactive() {
        let guard = NoZoneIntegration;
        assert!(!guard.is_integration_active());
        assert!(guard.has_hardcore_flag(&Player::new("Steve")));
    }

    #[test]
    fn test_region_flags() {
        let steve = Player::new("Steve");
        let alex = Player::new("Alex");
        let nobody = Player::new("Herobrine");

        let mut flags = RegionFlags::new();
        flags.flag_region("arena");
        flags.move_player(steve.id, "arena");
        flags.move_player(alex.id, "spawn");

        assert!(flags.is_integration_active());
        assert!(flags.has_hardcore_flag(&steve));
        assert!(!flags.has_hardcore_flag(&alex));
        assert!(!flags.has_hardcore_flag(&nobody));

        flags.move_player(alex.id, "arena");
        assert!(flags.has_hardcore_flag(&alex));

        assert!(flags.unflag_region("arena"));
        assert!(!flags.has_hardcore_flag(&steve));
    }
}
