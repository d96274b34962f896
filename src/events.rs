//! Hardcore events and an in-process cancellable dispatcher

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use crate::core::types::Player;
use crate::hardcore::deltas::SkillDeltas;
use crate::hardcore::ports::HardcoreEventBus;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatLossEvent {
    pub player: Player,
    pub deltas: SkillDeltas,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VampirismEvent {
    pub killer: Player,
    pub victim: Player,
    pub deltas: SkillDeltas,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum HardcoreEvent {
    StatLoss(StatLossEvent),
    Vampirism(VampirismEvent),
}

impl HardcoreEvent {
    pub fn deltas(&self) -> &SkillDeltas {
        match self {
            HardcoreEvent::StatLoss(e) => &e.deltas,
            HardcoreEvent::Vampirism(e) => &e.deltas,
        }
    }
}

/// A listener's answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Cancel,
}

type Listener = Box<dyn Fn(&HardcoreEvent) -> Verdict>;

/// Runs listeners in registration order. Every listener sees every event,
/// even after an earlier one cancelled it. Events nobody cancelled are
/// queued until the host drains and settles them.
#[derive(Default)]
pub struct EventDispatcher {
    listeners: Vec<Listener>,
    accepted: RefCell<Vec<HardcoreEvent>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl Fn(&HardcoreEvent) -> Verdict + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Take every accepted event, oldest first
    pub fn drain_accepted(&self) -> Vec<HardcoreEvent> {
        std::mem::take(&mut *self.accepted.borrow_mut())
    }

    pub fn pending(&self) -> usize {
        self.accepted.borrow().len()
    }

    fn dispatch(&self, event: HardcoreEvent) -> bool {
        let mut cancelled = false;
        for listener in &self.listeners {
            if listener(&event) == Verdict::Cancel {
                cancelled = true;
            }
        }
        if !cancelled {
            self.accepted.borrow_mut().push(event);
        }
        !cancelled
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.listeners.len())
            .field("accepted", &self.accepted.borrow().len())
            .finish()
    }
}

impl HardcoreEventBus for EventDispatcher {
    fn publish_stat_loss(&self, player: &Player, deltas: &SkillDeltas) -> bool {
        self.dispatch(HardcoreEvent::StatLoss(StatLossEvent {
            player: player.clone(),
            deltas: *deltas,
        }))
    }

    fn publish_vampirism(&self, killer: &Player, victim: &Player, deltas: &SkillDeltas) -> bool {
        self.dispatch(HardcoreEvent::Vampirism(VampirismEvent {
            killer: killer.clone(),
            victim: victim.clone(),
            deltas: *deltas,
        }))
    }
}
