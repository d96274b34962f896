//! Skill catalog and per-player skill state

pub mod profile;
pub mod skill_type;

pub use profile::{InMemoryProfiles, PlayerProfile};
pub use skill_type::SkillType;
