//! In-memory host implementations for tests and demos

use std::collections::HashMap;

use super::{PendingRevert, StatusModifierBinder, TurnEntry, TurnOrderTracker};
use crate::types::{CombatantId, PenaltyKind};

/// HashMap-backed status-modifier store
#[derive(Debug, Default)]
pub struct MemoryBinder {
    effects: HashMap<(String, PenaltyKind), String>,
}

impl MemoryBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current penalty value for an owner and kind, if any
    pub fn penalty(&self, owner: &str, kind: PenaltyKind) -> Option<&str> {
        self.effects
            .get(&(owner.to_string(), kind))
            .map(String::as_str)
    }
}

impl StatusModifierBinder for MemoryBinder {
    fn apply_penalty(&mut self, owner: &str, kind: PenaltyKind, value: &str) {
        self.effects
            .insert((owner.to_string(), kind), value.to_string());
    }

    fn clear_penalty(&mut self, owner: &str, kind: PenaltyKind) {
        self.effects.remove(&(owner.to_string(), kind));
    }
}

/// Turn order with a single pending-revert slot
#[derive(Debug, Default)]
pub struct MemoryTurnOrder {
    turns: Vec<TurnEntry>,
    pending: Option<PendingRevert>,
}

impl MemoryTurnOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a combatant to the encounter
    pub fn add_combatant(&mut self, combatant: impl Into<CombatantId>, initiative: f64) {
        self.turns.push(TurnEntry {
            combatant: combatant.into(),
            initiative,
        });
    }

    /// Initiative for one combatant, if present
    pub fn initiative_of(&self, combatant: &CombatantId) -> Option<f64> {
        self.turns
            .iter()
            .find(|t| t.combatant == *combatant)
            .map(|t| t.initiative)
    }
}

impl TurnOrderTracker for MemoryTurnOrder {
    fn current_turns(&self) -> Vec<TurnEntry> {
        let mut turns = self.turns.clone();
        turns.sort_by(|a, b| b.initiative.total_cmp(&a.initiative));
        turns
    }

    fn set_initiative(&mut self, combatant: &CombatantId, value: f64) {
        if let Some(entry) = self.turns.iter_mut().find(|t| t.combatant == *combatant) {
            entry.initiative = value;
        }
    }

    fn tag_pending_revert(&mut self, combatant: &CombatantId, original_initiative: f64) {
        // Earliest tag wins until consumed
        if self.pending.is_none() {
            self.pending = Some(PendingRevert {
                combatant: combatant.clone(),
                initiative: original_initiative,
            });
        }
    }

    fn consume_pending_revert(&mut self) -> Option<PendingRevert> {
        self.pending.take()
    }
}
