//! Damage application - the attrition state transition

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::rules::{absorption_rule, AbsorptionRule};
use super::state::{EquipmentAttrition, MAX_DAMAGE_LEVEL};
use crate::config::AttritionConstants;
use crate::types::{DamageChannel, DamageKind, EquipmentClass};

/// Outcome of applying one hit to a piece's attrition state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttritionResult {
    /// Channel the hit landed on
    pub channel: DamageChannel,
    /// Direct or glancing attribution
    pub kind: DamageKind,
    /// Rule the class table selected for this hit
    pub rule: AbsorptionRule,
    /// Whether any state changed at all
    pub changed: bool,
    /// A half-hit was parked on the channel without completing a point
    pub half_pending: bool,
    /// The channel crossed its threshold and escalated a level
    pub escalated: bool,
    /// Channel damage level before the hit
    pub level_before: u8,
    /// Channel damage level after the hit
    pub level_after: u8,
    /// Real (maximum) damage level before the hit
    pub real_level_before: u8,
    /// Real damage level after the hit
    pub real_level_after: u8,
    /// Whether the piece is destroyed after the hit
    pub destroyed: bool,
    /// Derived AC penalty after the hit
    pub ac_penalty: i32,
}

impl AttritionResult {
    fn no_change(
        state: &EquipmentAttrition,
        channel: DamageChannel,
        kind: DamageKind,
        rule: AbsorptionRule,
    ) -> Self {
        AttritionResult {
            channel,
            kind,
            rule,
            changed: false,
            half_pending: false,
            escalated: false,
            level_before: *state.damage_level.get(channel),
            level_after: *state.damage_level.get(channel),
            real_level_before: state.real_damage_level,
            real_level_after: state.real_damage_level,
            destroyed: state.destroyed,
            ac_penalty: state.ac_penalty,
        }
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if !self.changed {
            parts.push("no change".to_string());
        }
        if self.half_pending {
            parts.push(format!("half hit parked on {}", self.channel.label()));
        }
        if self.escalated {
            parts.push(format!(
                "{} level {} -> {}",
                self.channel.label(),
                self.level_before,
                self.level_after
            ));
        }
        if self.real_level_after > self.real_level_before {
            parts.push(format!(
                "damage level {} (AC {})",
                self.real_level_after, self.ac_penalty
            ));
        }
        if self.destroyed && self.real_level_after > self.real_level_before {
            parts.push("DESTROYED".to_string());
        }

        if parts.is_empty() {
            "hit absorbed".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Apply one hit to an equipment piece (immutable API).
///
/// Returns the new attrition state and a result record:
/// 1. The class table picks the absorption rule for the channel and kind
/// 2. The rule accumulates absorbed points (or parks a half hit)
/// 3. The channel's threshold at its current level decides escalation
/// 4. Escalation resets the channel accumulator, raises the real damage
///    level when the channel overtakes it, recomputes the AC penalty and
///    flags destruction at level 6
///
/// Immune channels and already-destroyed pieces report no change.
pub fn apply_damage(
    state: &EquipmentAttrition,
    class: EquipmentClass,
    channel: DamageChannel,
    kind: DamageKind,
    tables: &AttritionConstants,
) -> (EquipmentAttrition, AttritionResult) {
    let rule = absorption_rule(class, channel, kind);

    if state.destroyed || rule == AbsorptionRule::Immune {
        return (
            state.clone(),
            AttritionResult::no_change(state, channel, kind, rule),
        );
    }

    let mut next = state.clone();
    let mut result = AttritionResult::no_change(state, channel, kind, rule);
    result.changed = true;

    match rule {
        AbsorptionRule::Immune => unreachable!("immune handled above"),
        AbsorptionRule::Full => *next.absorbed.get_mut(channel) += 1,
        AbsorptionRule::Double => *next.absorbed.get_mut(channel) += 2,
        AbsorptionRule::HalfThenFull => {
            let pending = next.half_absorbed.get_mut(channel);
            if *pending {
                *pending = false;
                *next.absorbed.get_mut(channel) += 1;
            } else {
                *pending = true;
                result.half_pending = true;
                debug!(channel = channel.label(), "half hit parked");
                return (next, result);
            }
        }
    }

    let level = *next.damage_level.get(channel);
    let threshold = tables.thresholds(class)[level as usize];
    if u32::from(*next.absorbed.get(channel)) >= threshold {
        *next.damage_level.get_mut(channel) = level + 1;
        *next.absorbed.get_mut(channel) = 0;
        result.escalated = true;

        if level + 1 > next.real_damage_level {
            next.real_damage_level = level + 1;
            next.ac_penalty = EquipmentAttrition::penalty_for_level(
                next.real_damage_level,
                tables.penalties(class),
            );
            next.destroyed = next.real_damage_level == MAX_DAMAGE_LEVEL;
        }
    }

    result.level_after = *next.damage_level.get(channel);
    result.real_level_after = next.real_damage_level;
    result.destroyed = next.destroyed;
    result.ac_penalty = next.ac_penalty;

    if result.escalated {
        debug!(
            channel = channel.label(),
            level = result.level_after,
            real_level = result.real_level_after,
            destroyed = result.destroyed,
            "damage level escalated"
        );
    }

    (next, result)
}
