//! Hardcore mode - death penalties and PvP skill vampirism

pub mod core;
pub mod events;
pub mod hardcore;
pub mod notify;
pub mod skills;
pub mod zones;
