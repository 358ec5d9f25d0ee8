//! ReactionState - per-combatant fumble range and exhaustion

use serde::{Deserialize, Serialize};

use crate::types::CombatantAttributes;

/// Reaction state owned by one combatant.
///
/// Created once at combatant creation and mutated only through the
/// escalation operations. `fumble_range` stays in `[1, max_fumble_range]`;
/// once it sits at the cap, further escalations spill into exhaustion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionState {
    pub fumble_range: u8,
    pub max_fumble_range: u8,
    pub exhaustion_level: u8,
}

impl Default for ReactionState {
    fn default() -> Self {
        ReactionState {
            fumble_range: 1,
            max_fumble_range: 1,
            exhaustion_level: 0,
        }
    }
}

impl ReactionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the fumble-range cap from combatant attributes.
    ///
    /// Runs on every data refresh; the current fumble range is clamped
    /// back into the new bounds.
    pub fn refresh_cap(&mut self, attributes: &CombatantAttributes) {
        let cap = 1 + attributes.dexterity_modifier().max(0);
        self.max_fumble_range = cap.min(i32::from(u8::MAX)) as u8;
        self.fumble_range = self.fumble_range.clamp(1, self.max_fumble_range);
    }

    /// Whether the fumble range sits at its cap
    pub fn at_cap(&self) -> bool {
        self.fumble_range >= self.max_fumble_range
    }
}
