//! Fumble-range escalation and the per-turn initiative revert

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::state::ReactionState;
use crate::config::ReactionConstants;
use crate::host::TurnOrderTracker;
use crate::types::CombatantId;

/// Reaction failure reported before any mutation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReactionError {
    #[error("combatant {0} is not part of an active turn order")]
    NotInCombat(CombatantId),
}

/// Initiative change applied by a reaction operation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitiativeShift {
    pub from: f64,
    pub to: f64,
}

/// Outcome of one escalate/reduce operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionShift {
    /// Whether any state changed at all
    pub changed: bool,
    /// Fumble range after the operation
    pub fumble_range: u8,
    /// Exhaustion level after the operation
    pub exhaustion_level: u8,
    /// The fumble cap was full and exhaustion escalated instead
    pub exhaustion_escalated: bool,
    /// Exhaustion hit its ceiling; the combatant dies
    pub fatal: bool,
    /// Hit points after the operation (zeroed on a fatal escalation)
    pub hit_points: i32,
    /// Temporary turn-order change, reverted on the next turn advance
    pub initiative: Option<InitiativeShift>,
}

impl ReactionShift {
    fn no_change(state: &ReactionState, hit_points: i32) -> Self {
        ReactionShift {
            changed: false,
            fumble_range: state.fumble_range,
            exhaustion_level: state.exhaustion_level,
            exhaustion_escalated: false,
            fatal: false,
            hit_points,
            initiative: None,
        }
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        if !self.changed {
            return "no change".to_string();
        }
        let mut parts = vec![format!("fumble range {}", self.fumble_range)];
        if self.exhaustion_escalated {
            parts.push(format!("exhaustion {}", self.exhaustion_level));
        }
        if self.fatal {
            parts.push("FATAL".to_string());
        }
        if let Some(shift) = self.initiative {
            parts.push(format!("initiative {} -> {}", shift.from, shift.to));
        }
        parts.join(", ")
    }
}

fn initiative_of(
    tracker: &impl TurnOrderTracker,
    combatant: &CombatantId,
) -> Result<f64, ReactionError> {
    tracker
        .current_turns()
        .iter()
        .find(|t| t.combatant == *combatant)
        .map(|t| t.initiative)
        .ok_or_else(|| ReactionError::NotInCombat(combatant.clone()))
}

fn shift_initiative(
    tracker: &mut impl TurnOrderTracker,
    combatant: &CombatantId,
    from: f64,
    to: f64,
) -> InitiativeShift {
    tracker.set_initiative(combatant, to);
    // The tracker keeps the earliest original, so stacked shifts before a
    // turn advance still revert to the true pre-shift position.
    tracker.tag_pending_revert(combatant, from);
    InitiativeShift { from, to }
}

/// Escalate a combatant's fumble range.
///
/// Requires the combatant to be part of an active turn order. The
/// combatant temporarily acts sooner (initiative boosted until the next
/// turn advance) and the fumble range grows by one. At the cap the
/// escalation spills into exhaustion instead; spilling at
/// `exhaustion_limit - 1` is the designed fatal transition - exhaustion
/// pins at the limit and hit points drop to zero.
pub fn escalate_fumble(
    state: &ReactionState,
    hit_points: i32,
    combatant: &CombatantId,
    constants: &ReactionConstants,
    tracker: &mut impl TurnOrderTracker,
) -> Result<(ReactionState, ReactionShift), ReactionError> {
    let initiative = initiative_of(tracker, combatant)?;
    let shift = shift_initiative(
        tracker,
        combatant,
        initiative,
        initiative + constants.initiative_boost,
    );

    let mut next = state.clone();
    let mut result = ReactionShift::no_change(state, hit_points);
    result.changed = true;
    result.initiative = Some(shift);

    if next.fumble_range < next.max_fumble_range {
        next.fumble_range += 1;
    } else {
        result.exhaustion_escalated = true;
        if next.exhaustion_level + 1 >= constants.exhaustion_limit {
            next.exhaustion_level = constants.exhaustion_limit;
            result.fatal = true;
            result.hit_points = 0;
        } else {
            next.exhaustion_level += 1;
        }
    }

    result.fumble_range = next.fumble_range;
    result.exhaustion_level = next.exhaustion_level;
    debug!(
        combatant = %combatant,
        fumble_range = next.fumble_range,
        exhaustion = next.exhaustion_level,
        fatal = result.fatal,
        "fumble range escalated"
    );
    Ok((next, result))
}

/// Reduce a combatant's fumble range.
///
/// Symmetric to [`escalate_fumble`]: the combatant temporarily acts later
/// and the fumble range shrinks by one. A range already at its floor of 1
/// is a silent no-op with no turn-order change.
pub fn reduce_fumble(
    state: &ReactionState,
    hit_points: i32,
    combatant: &CombatantId,
    constants: &ReactionConstants,
    tracker: &mut impl TurnOrderTracker,
) -> Result<(ReactionState, ReactionShift), ReactionError> {
    let initiative = initiative_of(tracker, combatant)?;

    if state.fumble_range <= 1 {
        return Ok((state.clone(), ReactionShift::no_change(state, hit_points)));
    }

    let shift = shift_initiative(
        tracker,
        combatant,
        initiative,
        initiative - constants.initiative_boost,
    );

    let mut next = state.clone();
    next.fumble_range -= 1;

    let mut result = ReactionShift::no_change(&next, hit_points);
    result.changed = true;
    result.initiative = Some(shift);
    debug!(combatant = %combatant, fumble_range = next.fumble_range, "fumble range reduced");
    Ok((next, result))
}

/// Turn-advance callback: consume the pending revert marker, if any, and
/// restore the original initiative. Idempotent - a missing marker is a
/// no-op.
pub fn handle_turn_advance(tracker: &mut impl TurnOrderTracker) -> Option<CombatantId> {
    let revert = tracker.consume_pending_revert()?;
    tracker.set_initiative(&revert.combatant, revert.initiative);
    debug!(combatant = %revert.combatant, initiative = revert.initiative, "initiative reverted");
    Some(revert.combatant)
}
