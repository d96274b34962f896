//! Player-facing notifications

pub mod locale;

pub use locale::MessageKey;

use serde::{Deserialize, Serialize};

use crate::core::types::Player;
use crate::hardcore::ports::Notifier;

/// Channel a message is routed through on the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationType {
    HardcoreMode,
}

/// Renders messages and writes them to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, player: &Player, kind: NotificationType, key: MessageKey, args: &[String]) {
        tracing::info!(
            player = %player.name,
            kind = ?kind,
            key = key.key(),
            "{}",
            key.render(args)
        );
    }
}
