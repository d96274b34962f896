//! Hardcore mode: stat loss on death and vampirism on PvP kills

pub mod calc;
pub mod deltas;
pub mod manager;
pub mod ports;
pub mod settle;

pub use deltas::{SkillDelta, SkillDeltas};
pub use manager::{HardcoreManager, PenaltyOutcome, SkipReason};
pub use ports::{
    HardcoreEventBus, Notifier, PenaltyConfig, ProfileStore, SkillCapabilities, ZoneGuard,
};
pub use settle::{apply_leech_gain, apply_stat_loss, settle_event};
