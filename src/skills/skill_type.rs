//! The fixed skill list
//!
//! Child skills derive their level from their parents and never take part in
//! hardcore penalties. Everything per-skill is sized by `SkillType::COUNT` and
//! indexed by `SkillType::index`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillType {
    Acrobatics,
    Alchemy,
    Archery,
    Axes,
    Excavation,
    Fishing,
    Herbalism,
    Mining,
    Repair,
    Salvage,
    Smelting,
    Swords,
    Taming,
    Unarmed,
    Woodcutting,
}

impl SkillType {
    pub const COUNT: usize = 15;

    pub const ALL: [SkillType; SkillType::COUNT] = [
        SkillType::Acrobatics,
        SkillType::Alchemy,
        SkillType::Archery,
        SkillType::Axes,
        SkillType::Excavation,
        SkillType::Fishing,
        SkillType::Herbalism,
        SkillType::Mining,
        SkillType::Repair,
        SkillType::Salvage,
        SkillType::Smelting,
        SkillType::Swords,
        SkillType::Taming,
        SkillType::Unarmed,
        SkillType::Woodcutting,
    ];

    /// Non-child skills, in catalog order
    pub const PRIMARY: [SkillType; 13] = [
        SkillType::Acrobatics,
        SkillType::Alchemy,
        SkillType::Archery,
        SkillType::Axes,
        SkillType::Excavation,
        SkillType::Fishing,
        SkillType::Herbalism,
        SkillType::Mining,
        SkillType::Repair,
        SkillType::Swords,
        SkillType::Taming,
        SkillType::Unarmed,
        SkillType::Woodcutting,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_child(self) -> bool {
        self.parents().is_some()
    }

    /// Parent skills a child skill derives from
    pub fn parents(self) -> Option<[SkillType; 2]> {
        match self {
            SkillType::Salvage => Some([SkillType::Repair, SkillType::Fishing]),
            SkillType::Smelting => Some([SkillType::Mining, SkillType::Repair]),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SkillType::Acrobatics => "Acrobatics",
            SkillType::Alchemy => "Alchemy",
            SkillType::Archery => "Archery",
            SkillType::Axes => "Axes",
            SkillType::Excavation => "Excavation",
            SkillType::Fishing => "Fishing",
            SkillType::Herbalism => "Herbalism",
            SkillType::Mining => "Mining",
            SkillType::Repair => "Repair",
            SkillType::Salvage => "Salvage",
            SkillType::Smelting => "Smelting",
            SkillType::Swords => "Swords",
            SkillType::Taming => "Taming",
            SkillType::Unarmed => "Unarmed",
            SkillType::Woodcutting => "Woodcutting",
        }
    }
}

impl std::fmt::Display for SkillType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
