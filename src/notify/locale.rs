//! Message keys and their English templates

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKey {
    /// `{0}` = levels lost
    DeathStatLoss,
    /// `{0}` = levels stolen, `{1}` = victim
    VampirismKillerSuccess,
    /// `{0}` = victim
    VampirismKillerFailure,
    /// `{0}` = killer, `{1}` = levels stolen
    VampirismVictimSuccess,
    /// `{0}` = killer
    VampirismVictimFailure,
}

impl MessageKey {
    /// Locale file key
    pub fn key(self) -> &'static str {
        match self {
            MessageKey::DeathStatLoss => "Hardcore.DeathStatLoss.PlayerDeath",
            MessageKey::VampirismKillerSuccess => "Hardcore.Vampirism.Killer.Success",
            MessageKey::VampirismKillerFailure => "Hardcore.Vampirism.Killer.Failure",
            MessageKey::VampirismVictimSuccess => "Hardcore.Vampirism.Victim.Success",
            MessageKey::VampirismVictimFailure => "Hardcore.Vampirism.Victim.Failure",
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            MessageKey::DeathStatLoss => "You have lost {0} levels from death.",
            MessageKey::VampirismKillerSuccess => "You have stolen {0} levels from {1}.",
            MessageKey::VampirismKillerFailure => {
                "{0} didn't possess enough knowledge for you to leech."
            }
            MessageKey::VampirismVictimSuccess => "{0} has stolen {1} levels from you!",
            MessageKey::VampirismVictimFailure => "{0} was unable to steal knowledge from you!",
        }
    }

    /// Substitute `{n}` placeholders. Missing arguments leave the placeholder.
    pub fn render(self, args: &[String]) -> String {
        let mut out = self.template().to_string();
        for (i, arg) in args.iter().enumerate() {
            out = out.replace(&format!("{{{i}}}"), arg);
        }
        out
    }
}
