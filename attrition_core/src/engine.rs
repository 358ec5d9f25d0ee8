//! AttritionEngine - the surface UI actions call into
//!
//! Wraps the pure transitions with configured constants and publishes the
//! matching [`EngineEvent`]s. Persisting the returned records stays with
//! the caller.

use crate::attrition::{self, AttritionResult, EquipmentAttrition};
use crate::config::EngineConstants;
use crate::currency::CurrencyPurse;
use crate::events::{EngineEvent, EventBus};
use crate::host::{CheckRoller, TurnOrderTracker};
use crate::reaction::{self, ReactionError, ReactionShift, ReactionState};
use crate::repair::{self, EquipmentProfile, RepairError, RepairReceipt};
use crate::types::{CombatantId, DamageChannel, DamageKind, EquipmentClass};

/// Configured engine instance with an event channel
pub struct AttritionEngine {
    constants: EngineConstants,
    bus: EventBus,
}

impl AttritionEngine {
    /// Engine with explicit (already validated) constants
    pub fn new(constants: EngineConstants) -> Self {
        AttritionEngine {
            constants,
            bus: EventBus::new(),
        }
    }

    /// Engine with default constants
    pub fn with_defaults() -> Self {
        Self::new(EngineConstants::default())
    }

    pub fn constants(&self) -> &EngineConstants {
        &self.constants
    }

    /// Register an event subscriber
    pub fn subscribe(&mut self, subscriber: impl FnMut(&EngineEvent) + Send + 'static) {
        self.bus.subscribe(subscriber);
    }

    /// Apply one hit to an equipment piece and publish the change
    pub fn apply_damage(
        &mut self,
        owner: &str,
        class: EquipmentClass,
        channel: DamageChannel,
        kind: DamageKind,
        state: &EquipmentAttrition,
    ) -> (EquipmentAttrition, AttritionResult) {
        let (next, result) =
            attrition::apply_damage(state, class, channel, kind, &self.constants.attrition);

        if result.changed {
            self.bus.publish(&EngineEvent::AttritionChanged {
                owner: owner.to_string(),
                channel,
                real_damage_level: next.real_damage_level,
                ac_penalty: next.ac_penalty,
            });
            if next.destroyed && !state.destroyed {
                self.bus.publish(&EngineEvent::EquipmentDestroyed {
                    owner: owner.to_string(),
                });
            }
        }
        (next, result)
    }

    /// Repair up to `levels` damage levels against the owner's purse
    pub fn repair_partial(
        &mut self,
        owner: &str,
        profile: &EquipmentProfile,
        state: &EquipmentAttrition,
        purse: &CurrencyPurse,
        levels: u8,
        roller: &mut impl CheckRoller,
    ) -> Result<RepairReceipt, RepairError> {
        let receipt =
            repair::repair_partial(profile, state, purse, levels, &self.constants, roller)?;
        self.publish_repair(owner, &receipt);
        Ok(receipt)
    }

    /// Restore a piece completely against the owner's purse
    pub fn repair_full(
        &mut self,
        owner: &str,
        profile: &EquipmentProfile,
        state: &EquipmentAttrition,
        purse: &CurrencyPurse,
        via_craftsman: bool,
    ) -> Result<RepairReceipt, RepairError> {
        let receipt =
            repair::repair_full(profile, state, purse, via_craftsman, &self.constants)?;
        self.publish_repair(owner, &receipt);
        Ok(receipt)
    }

    fn publish_repair(&mut self, owner: &str, receipt: &RepairReceipt) {
        self.bus.publish(&EngineEvent::RepairResolved {
            owner: owner.to_string(),
            outcome: receipt.outcome,
            cost: receipt.cost,
        });
    }

    /// Escalate a combatant's fumble range and publish the shifts
    pub fn escalate_reaction(
        &mut self,
        combatant: &CombatantId,
        state: &ReactionState,
        hit_points: i32,
        tracker: &mut impl TurnOrderTracker,
    ) -> Result<(ReactionState, ReactionShift), ReactionError> {
        let (next, shift) = reaction::escalate_fumble(
            state,
            hit_points,
            combatant,
            &self.constants.reaction,
            tracker,
        )?;
        self.publish_reaction(combatant, &shift);
        Ok((next, shift))
    }

    /// Reduce a combatant's fumble range and publish the shifts
    pub fn reduce_reaction(
        &mut self,
        combatant: &CombatantId,
        state: &ReactionState,
        hit_points: i32,
        tracker: &mut impl TurnOrderTracker,
    ) -> Result<(ReactionState, ReactionShift), ReactionError> {
        let (next, shift) = reaction::reduce_fumble(
            state,
            hit_points,
            combatant,
            &self.constants.reaction,
            tracker,
        )?;
        self.publish_reaction(combatant, &shift);
        Ok((next, shift))
    }

    fn publish_reaction(&mut self, combatant: &CombatantId, shift: &ReactionShift) {
        if !shift.changed {
            return;
        }
        if let Some(initiative) = shift.initiative {
            self.bus.publish(&EngineEvent::InitiativeShifted {
                combatant: combatant.clone(),
                from: initiative.from,
                to: initiative.to,
            });
        }
        if shift.exhaustion_escalated {
            self.bus.publish(&EngineEvent::ExhaustionEscalated {
                combatant: combatant.clone(),
                exhaustion_level: shift.exhaustion_level,
                fatal: shift.fatal,
            });
        } else {
            self.bus.publish(&EngineEvent::FumbleRangeChanged {
                combatant: combatant.clone(),
                fumble_range: shift.fumble_range,
            });
        }
    }

    /// Forward a turn-advance event from the host's tracker
    pub fn turn_advanced(&mut self, tracker: &mut impl TurnOrderTracker) -> Option<CombatantId> {
        let reverted = reaction::handle_turn_advance(tracker)?;
        self.bus.publish(&EngineEvent::InitiativeReverted {
            combatant: reverted.clone(),
        });
        Some(reverted)
    }
}
