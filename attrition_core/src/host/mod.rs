//! Host collaborator contracts - dice rolls, status modifiers, turn order
//!
//! The engine never talks to the host application directly; everything it
//! needs from the outside world comes through these traits. Reference
//! in-memory implementations live alongside them for tests and demos.

mod memory;
mod roller;

pub use memory::{MemoryBinder, MemoryTurnOrder};
pub use roller::{DiceRoller, ScriptedRoller};

use serde::{Deserialize, Serialize};

use crate::types::{CombatantId, PenaltyKind};

/// Result of a resolved skill check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// Roll total, modifiers included
    pub total: i32,
}

impl CheckOutcome {
    /// Whether the roll meets a difficulty
    pub fn beats(&self, difficulty: i32) -> bool {
        self.total >= difficulty
    }
}

/// Provides skill-check rolls for repair attempts.
///
/// `None` signals that the user cancelled the roll dialog; the operation
/// in flight must abort with no state change.
pub trait CheckRoller {
    fn roll_check(&mut self, difficulty: i32) -> Option<CheckOutcome>;
}

/// Persistent status-modifier record owned by a combatant.
///
/// Writes are idempotent "set" semantics keyed by the stable per-kind
/// effect key: the last write wins, it never stacks.
pub trait StatusModifierBinder {
    /// Set the penalty value under the owner's per-kind effect key
    fn apply_penalty(&mut self, owner: &str, kind: PenaltyKind, value: &str);
    /// Remove the owner's penalty record for a kind
    fn clear_penalty(&mut self, owner: &str, kind: PenaltyKind);
}

/// One row of the shared turn order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnEntry {
    pub combatant: CombatantId,
    pub initiative: f64,
}

/// An initiative revert waiting for the next turn advance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingRevert {
    pub combatant: CombatantId,
    /// Initiative value to restore
    pub initiative: f64,
}

/// Shared turn-order tracker owned by the host.
pub trait TurnOrderTracker {
    /// Current turn order, best initiative first
    fn current_turns(&self) -> Vec<TurnEntry>;

    /// Overwrite a combatant's initiative
    fn set_initiative(&mut self, combatant: &CombatantId, value: f64);

    /// Tag a revert to fire on the next turn advance. Implementations must
    /// keep the earliest tag when asked to tag again before consumption,
    /// so stacked shifts still revert to the true original.
    fn tag_pending_revert(&mut self, combatant: &CombatantId, original_initiative: f64);

    /// Take the pending revert, if any. Called once per turn advance;
    /// returning `None` when nothing is pending must be a harmless no-op
    /// for the caller.
    fn consume_pending_revert(&mut self) -> Option<PendingRevert>;
}
