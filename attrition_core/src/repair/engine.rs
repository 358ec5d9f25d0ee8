//! Repair resolution - affordability, skill checks and state transitions

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::outcome::{RepairError, RepairOutcome, RepairReceipt};
use crate::attrition::EquipmentAttrition;
use crate::config::EngineConstants;
use crate::currency::{can_afford, debit, normalize, CurrencyPurse};
use crate::host::CheckRoller;
use crate::types::{EquipmentClass, Rarity};

/// The slice of an equipment document the repair engine needs
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EquipmentProfile {
    pub class: EquipmentClass,
    pub rarity: Rarity,
    /// Base price in gold pieces
    pub base_price: f64,
}

/// Repair one or more damage levels.
///
/// Cost is `base_price * repair_fee_rate * levels`, gated on affordability
/// before anything mutates. The repair is attempted against a skill check
/// at the rarity-derived difficulty: success applies one level reduction
/// per requested level, failure still consumes the fee but leaves the
/// attrition state untouched. A cancelled roll aborts with every record
/// unchanged.
///
/// Requesting zero levels or repairing a pristine piece is a user no-op,
/// not an error.
pub fn repair_partial(
    profile: &EquipmentProfile,
    state: &EquipmentAttrition,
    purse: &CurrencyPurse,
    levels: u8,
    constants: &EngineConstants,
    roller: &mut impl CheckRoller,
) -> Result<RepairReceipt, RepairError> {
    if levels == 0 || state.real_damage_level == 0 {
        return Ok(RepairReceipt::unchanged(
            state,
            purse,
            RepairOutcome::NothingToRepair,
        ));
    }

    let cost = profile.base_price * constants.repair.repair_fee_rate * f64::from(levels);
    let funds = normalize(purse).total;
    if !can_afford(cost, purse) {
        return Err(RepairError::TooExpensive { cost, funds });
    }

    let difficulty = constants.repair.difficulty_for(profile.rarity);
    let Some(roll) = roller.roll_check(difficulty) else {
        debug!(difficulty, "repair roll cancelled");
        return Ok(RepairReceipt::unchanged(
            state,
            purse,
            RepairOutcome::Cancelled,
        ));
    };

    // Affordability was checked above; the debit cannot fail past here.
    let new_purse = debit(cost, purse).ok_or(RepairError::TooExpensive { cost, funds })?;

    if roll.beats(difficulty) {
        let penalties = constants.attrition.penalties(profile.class);
        let mut next = state.clone();
        for _ in 0..levels {
            next = next.repaired_one_level(penalties);
        }
        debug!(
            levels,
            cost,
            real_level = next.real_damage_level,
            "partial repair succeeded"
        );
        Ok(RepairReceipt {
            state: next,
            purse: new_purse,
            cost,
            outcome: RepairOutcome::Repaired,
        })
    } else {
        debug!(total = roll.total, difficulty, cost, "repair check failed");
        Ok(RepairReceipt {
            state: state.clone(),
            purse: new_purse,
            cost,
            outcome: RepairOutcome::RepairFailed,
        })
    }
}

/// Restore a piece completely.
///
/// Cost is `base_price * full_repair_fee_rate`, or the bare base price when
/// a craftsman does the work. No skill check is involved. Reports
/// `Reconstructed` when the piece had been destroyed, `Repaired` otherwise.
pub fn repair_full(
    profile: &EquipmentProfile,
    state: &EquipmentAttrition,
    purse: &CurrencyPurse,
    via_craftsman: bool,
    constants: &EngineConstants,
) -> Result<RepairReceipt, RepairError> {
    if state.real_damage_level == 0 {
        return Ok(RepairReceipt::unchanged(
            state,
            purse,
            RepairOutcome::NothingToRepair,
        ));
    }

    let rate = if via_craftsman {
        1.0
    } else {
        constants.repair.full_repair_fee_rate
    };
    let cost = profile.base_price * rate;
    let funds = normalize(purse).total;
    if !can_afford(cost, purse) {
        return Err(RepairError::TooExpensive { cost, funds });
    }

    let new_purse = debit(cost, purse).ok_or(RepairError::TooExpensive { cost, funds })?;
    let outcome = if state.destroyed {
        RepairOutcome::Reconstructed
    } else {
        RepairOutcome::Repaired
    };
    debug!(cost, via_craftsman, ?outcome, "full repair applied");

    Ok(RepairReceipt {
        state: state.fully_repaired(),
        purse: new_purse,
        cost,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrition::{apply_damage, MAX_DAMAGE_LEVEL};
    use crate::currency::total_copper;
    use crate::host::ScriptedRoller;
    use crate::types::{DamageChannel, DamageKind};

    fn profile() -> EquipmentProfile {
        EquipmentProfile {
            class: EquipmentClass::Light,
            rarity: Rarity::Common,
            base_price: 120.0,
        }
    }

    fn damaged_state(levels: u8) -> EquipmentAttrition {
        // Drive a light piece with direct slashing hits until the real
        // level reaches the target.
        let constants = EngineConstants::default();
        let mut state = EquipmentAttrition::new();
        while state.real_damage_level < levels {
            state = apply_damage(
                &state,
                EquipmentClass::Light,
                DamageChannel::Slashing,
                DamageKind::Direct,
                &constants.attrition,
            )
            .0;
        }
        state
    }

    #[test]
    fn test_zero_levels_is_silent_noop() {
        let constants = EngineConstants::default();
        let state = damaged_state(2);
        let purse = CurrencyPurse::from_gold(100);
        let mut roller = ScriptedRoller::cancelling();

        let receipt =
            repair_partial(&profile(), &state, &purse, 0, &constants, &mut roller).unwrap();
        assert_eq!(receipt.outcome, RepairOutcome::NothingToRepair);
        assert_eq!(receipt.state, state);
        assert_eq!(receipt.purse, purse);
    }

    #[test]
    fn test_pristine_piece_is_noop_and_free() {
        let constants = EngineConstants::default();
        let state = EquipmentAttrition::new();
        let purse = CurrencyPurse::from_gold(100);
        let mut roller = ScriptedRoller::new([Some(20)]);

        let receipt =
            repair_partial(&profile(), &state, &purse, 1, &constants, &mut roller).unwrap();
        assert_eq!(receipt.outcome, RepairOutcome::NothingToRepair);
        assert_eq!(total_copper(&receipt.purse), total_copper(&purse));
    }

    #[test]
    fn test_too_expensive_fails_before_rolling() {
        let constants = EngineConstants::default();
        let state = damaged_state(2);
        let purse = CurrencyPurse::from_gold(5);
        // A roller that would panic the test if consulted
        let mut roller = ScriptedRoller::cancelling();

        // Cost: 120 * 0.1 * 2 = 24 gp against 5 gp
        let err =
            repair_partial(&profile(), &state, &purse, 2, &constants, &mut roller).unwrap_err();
        assert_eq!(
            err,
            RepairError::TooExpensive {
                cost: 24.0,
                funds: 5.0
            }
        );
    }

    #[test]
    fn test_cancelled_roll_changes_nothing() {
        let constants = EngineConstants::default();
        let state = damaged_state(1);
        let purse = CurrencyPurse::from_gold(100);
        let mut roller = ScriptedRoller::cancelling();

        let receipt =
            repair_partial(&profile(), &state, &purse, 1, &constants, &mut roller).unwrap();
        assert_eq!(receipt.outcome, RepairOutcome::Cancelled);
        assert_eq!(receipt.state, state);
        assert_eq!(receipt.purse, purse);
        assert!((receipt.cost - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_failed_check_spends_fee_but_keeps_damage() {
        let constants = EngineConstants::default();
        let state = damaged_state(1);
        let purse = CurrencyPurse::from_gold(100);
        let mut roller = ScriptedRoller::new([Some(2)]);

        let receipt =
            repair_partial(&profile(), &state, &purse, 1, &constants, &mut roller).unwrap();
        assert_eq!(receipt.outcome, RepairOutcome::RepairFailed);
        assert_eq!(receipt.state, state);
        // 120 * 0.1 = 12 gp gone
        assert!((normalize(&receipt.purse).total - 88.0).abs() < 1e-9);
    }

    #[test]
    fn test_successful_partial_repair() {
        let constants = EngineConstants::default();
        let state = damaged_state(2);
        let purse = CurrencyPurse::from_gold(100);
        let mut roller = ScriptedRoller::new([Some(15)]);

        let receipt =
            repair_partial(&profile(), &state, &purse, 2, &constants, &mut roller).unwrap();
        assert_eq!(receipt.outcome, RepairOutcome::Repaired);
        assert_eq!(receipt.state.real_damage_level, 0);
        assert_eq!(receipt.state.ac_penalty, 0);
        assert!((normalize(&receipt.purse).total - 76.0).abs() < 1e-9);
        assert!(receipt.state.is_consistent());
    }

    #[test]
    fn test_repair_more_levels_than_damage_clamps_at_zero() {
        let constants = EngineConstants::default();
        let state = damaged_state(1);
        let purse = CurrencyPurse::from_gold(500);
        let mut roller = ScriptedRoller::new([Some(20)]);

        let receipt =
            repair_partial(&profile(), &state, &purse, 3, &constants, &mut roller).unwrap();
        assert_eq!(receipt.state.real_damage_level, 0);
        assert!(receipt.state.is_consistent());
    }

    #[test]
    fn test_rarity_raises_difficulty() {
        let constants = EngineConstants::default();
        let mut rare_profile = profile();
        rare_profile.rarity = Rarity::Rare;
        let state = damaged_state(1);
        let purse = CurrencyPurse::from_gold(100);

        // 12 beats the common difficulty of 10 but not the rare 15.
        let mut roller = ScriptedRoller::new([Some(12)]);
        let receipt =
            repair_partial(&rare_profile, &state, &purse, 1, &constants, &mut roller).unwrap();
        assert_eq!(receipt.outcome, RepairOutcome::RepairFailed);
    }

    #[test]
    fn test_full_repair_reports_repaired() {
        let constants = EngineConstants::default();
        let state = damaged_state(3);
        let purse = CurrencyPurse::from_gold(500);

        let receipt = repair_full(&profile(), &state, &purse, false, &constants).unwrap();
        assert_eq!(receipt.outcome, RepairOutcome::Repaired);
        assert!(receipt.state.is_pristine());
        // 120 * 2.0 = 240 gp
        assert!((normalize(&receipt.purse).total - 260.0).abs() < 1e-9);
    }

    #[test]
    fn test_full_repair_of_destroyed_piece_reconstructs() {
        let constants = EngineConstants::default();
        let state = damaged_state(MAX_DAMAGE_LEVEL);
        assert!(state.destroyed);
        let purse = CurrencyPurse::from_gold(500);

        let receipt = repair_full(&profile(), &state, &purse, false, &constants).unwrap();
        assert_eq!(receipt.outcome, RepairOutcome::Reconstructed);
        assert!(receipt.state.is_pristine());
        assert!(!receipt.state.destroyed);
    }

    #[test]
    fn test_craftsman_charges_base_price_only() {
        let constants = EngineConstants::default();
        let state = damaged_state(2);
        let purse = CurrencyPurse::from_gold(500);

        let receipt = repair_full(&profile(), &state, &purse, true, &constants).unwrap();
        assert!((receipt.cost - 120.0).abs() < f64::EPSILON);
        assert!((normalize(&receipt.purse).total - 380.0).abs() < 1e-9);
    }

    #[test]
    fn test_full_repair_too_expensive() {
        let constants = EngineConstants::default();
        let state = damaged_state(2);
        let purse = CurrencyPurse::from_gold(100);

        let err = repair_full(&profile(), &state, &purse, false, &constants).unwrap_err();
        assert!(matches!(err, RepairError::TooExpensive { .. }));
    }
}
