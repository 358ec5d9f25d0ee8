//! Engine events - the observer channel presentation layers subscribe to
//!
//! State changes fan out through an explicit [`EventBus`] instead of a
//! shared controller object; whoever needs to re-render subscribes and
//! reacts to the events it cares about.

use serde::{Deserialize, Serialize};

use crate::repair::RepairOutcome;
use crate::types::{CombatantId, DamageChannel};

/// A state change worth telling the presentation layer about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineEvent {
    AttritionChanged {
        owner: String,
        channel: DamageChannel,
        real_damage_level: u8,
        ac_penalty: i32,
    },
    EquipmentDestroyed {
        owner: String,
    },
    RepairResolved {
        owner: String,
        outcome: RepairOutcome,
        cost: f64,
    },
    FumbleRangeChanged {
        combatant: CombatantId,
        fumble_range: u8,
    },
    ExhaustionEscalated {
        combatant: CombatantId,
        exhaustion_level: u8,
        fatal: bool,
    },
    InitiativeShifted {
        combatant: CombatantId,
        from: f64,
        to: f64,
    },
    InitiativeReverted {
        combatant: CombatantId,
    },
}

/// Subscriber callback invoked for every published event
pub type Subscriber = Box<dyn FnMut(&EngineEvent) + Send>;

/// Fan-out channel for engine state changes
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber; it sees every event published afterwards
    pub fn subscribe(&mut self, subscriber: impl FnMut(&EngineEvent) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Deliver an event to every subscriber in registration order
    pub fn publish(&mut self, event: &EngineEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(event);
        }
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
