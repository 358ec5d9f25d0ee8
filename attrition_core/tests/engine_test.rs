//! Integration test: wear equipment down -> bind penalties -> repair -> react
//!
//! Drives the engine the way a host session would: every record round-trips
//! through the pure transitions and the collaborator traits, never through
//! internal mutation.

use attrition_core::{
    apply_damage, can_afford, debit, escalate_fumble, normalize,
    repair_full, repair_partial, sync_penalty, AttritionEngine, CombatantId, CurrencyPurse,
    DamageChannel, DamageKind, EngineConstants, EngineEvent, EquipmentAttrition,
    EquipmentClass, EquipmentProfile, MemoryBinder, MemoryTurnOrder, PenaltyKind, Rarity,
    ReactionState, RepairError, RepairOutcome, ScriptedRoller, TurnOrderTracker, MAX_DAMAGE_LEVEL,
};
use std::sync::{Arc, Mutex};

fn hit(
    state: &EquipmentAttrition,
    class: EquipmentClass,
    channel: DamageChannel,
    constants: &EngineConstants,
) -> EquipmentAttrition {
    apply_damage(state, class, channel, DamageKind::Direct, &constants.attrition).0
}

#[test]
fn light_armor_slashing_walkthrough() {
    // Threshold table [2, 4, 6, 8, 10, 20]: two direct slashing hits reach
    // damage level 1 with the index-0 armor penalty.
    let constants = EngineConstants::default();
    let mut state = EquipmentAttrition::new();

    state = hit(&state, EquipmentClass::Light, DamageChannel::Slashing, &constants);
    assert_eq!(state.absorbed.slashing, 1);
    assert_eq!(state.real_damage_level, 0);

    state = hit(&state, EquipmentClass::Light, DamageChannel::Slashing, &constants);
    assert_eq!(state.damage_level.slashing, 1);
    assert_eq!(state.absorbed.slashing, 0);
    assert_eq!(state.real_damage_level, 1);
    assert_eq!(state.ac_penalty, constants.attrition.armor_penalties[0]);
}

#[test]
fn shield_piercing_half_hits_walkthrough() {
    let constants = EngineConstants::default();
    let state = EquipmentAttrition::new();

    let first = hit(&state, EquipmentClass::Shield, DamageChannel::Piercing, &constants);
    assert!(first.half_absorbed.piercing);
    assert_eq!(first.absorbed.piercing, 0);

    let second = hit(&first, EquipmentClass::Shield, DamageChannel::Piercing, &constants);
    assert!(!second.half_absorbed.piercing);
    assert_eq!(second.absorbed.piercing, 1);
}

#[test]
fn immune_channel_reports_no_change() {
    let constants = EngineConstants::default();
    let state = EquipmentAttrition::new();

    let (after, result) = apply_damage(
        &state,
        EquipmentClass::Light,
        DamageChannel::Bludgeoning,
        DamageKind::Direct,
        &constants.attrition,
    );
    assert!(!result.changed);
    assert_eq!(after.absorbed.bludgeoning, 0);
    assert_eq!(after.damage_level.bludgeoning, 0);
    assert_eq!(after.real_damage_level, 0);
}

#[test]
fn currency_scenario_from_the_table() {
    // An empty purse normalizes to zero...
    assert!((normalize(&CurrencyPurse::new()).total - 0.0).abs() < f64::EPSILON);

    // ...and 15 gp covers a 12 gp repair, leaving exactly 3 gp.
    let purse = CurrencyPurse::from_gold(15);
    assert!(can_afford(12.0, &purse));
    let change = debit(12.0, &purse).unwrap();
    assert!((normalize(&change).total - 3.0).abs() < 1e-9);
}

#[test]
fn full_repair_always_round_trips_to_pristine() {
    let constants = EngineConstants::default();
    let profile = EquipmentProfile {
        class: EquipmentClass::Heavy,
        rarity: Rarity::Uncommon,
        base_price: 75.0,
    };
    let purse = CurrencyPurse::from_gold(5_000);

    // From every reachable damage level, including destroyed
    let mut state = EquipmentAttrition::new();
    loop {
        let receipt = repair_full(&profile, &state, &purse, false, &constants).unwrap();
        if state.real_damage_level > 0 {
            assert_eq!(receipt.state.real_damage_level, 0);
            assert!(!receipt.state.destroyed);
            assert!(receipt.state.is_pristine());
        }
        if state.destroyed {
            assert_eq!(receipt.outcome, RepairOutcome::Reconstructed);
            break;
        }
        state = hit(&state, EquipmentClass::Heavy, DamageChannel::Bludgeoning, &constants);
    }
}

#[test]
fn failed_affordability_leaves_records_byte_for_byte_unchanged() {
    let constants = EngineConstants::default();
    let profile = EquipmentProfile {
        class: EquipmentClass::Medium,
        rarity: Rarity::Rare,
        base_price: 400.0,
    };
    let mut state = EquipmentAttrition::new();
    for _ in 0..4 {
        state = hit(&state, EquipmentClass::Medium, DamageChannel::Slashing, &constants);
    }
    let purse = CurrencyPurse {
        gp: 3,
        sp: 7,
        cp: 2,
        ..CurrencyPurse::default()
    };

    let state_bytes = serde_json::to_vec(&state).unwrap();
    let purse_bytes = serde_json::to_vec(&purse).unwrap();

    let mut roller = ScriptedRoller::new([Some(20)]);
    let err = repair_partial(&profile, &state, &purse, 1, &constants, &mut roller).unwrap_err();
    assert!(matches!(err, RepairError::TooExpensive { .. }));

    assert_eq!(serde_json::to_vec(&state).unwrap(), state_bytes);
    assert_eq!(serde_json::to_vec(&purse).unwrap(), purse_bytes);
}

#[test]
fn cancelled_roll_is_a_complete_abort() {
    let constants = EngineConstants::default();
    let profile = EquipmentProfile {
        class: EquipmentClass::Light,
        rarity: Rarity::Common,
        base_price: 60.0,
    };
    let mut state = EquipmentAttrition::new();
    for _ in 0..2 {
        state = hit(&state, EquipmentClass::Light, DamageChannel::Piercing, &constants);
    }
    let purse = CurrencyPurse::from_gold(40);

    let mut roller = ScriptedRoller::cancelling();
    let receipt = repair_partial(&profile, &state, &purse, 1, &constants, &mut roller).unwrap();
    assert_eq!(receipt.outcome, RepairOutcome::Cancelled);
    assert_eq!(receipt.state, state);
    assert_eq!(receipt.purse, purse);
}

#[test]
fn exhaustion_overflow_zeroes_hit_points() {
    let constants = EngineConstants::default();
    let combatant = CombatantId::from("brakk");
    let mut tracker = MemoryTurnOrder::new();
    tracker.add_combatant("brakk", 14.0);

    let mut state = ReactionState::new();
    state.max_fumble_range = 2;
    state.fumble_range = 2;
    state.exhaustion_level = constants.reaction.exhaustion_limit - 1;

    let (next, shift) =
        escalate_fumble(&state, 27, &combatant, &constants.reaction, &mut tracker).unwrap();
    assert_eq!(next.exhaustion_level, constants.reaction.exhaustion_limit);
    assert!(shift.fatal);
    assert_eq!(shift.hit_points, 0);
}

#[test]
fn engine_session_walkthrough() {
    // A short mock session through the facade: wear a shield down, bind the
    // penalty, repair at the smith, spend a reaction, advance the turn.
    let mut engine = AttritionEngine::with_defaults();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    engine.subscribe(move |event: &EngineEvent| sink.lock().unwrap().push(event.clone()));

    let mut binder = MemoryBinder::new();
    let mut tracker = MemoryTurnOrder::new();
    tracker.add_combatant("brakk", 11.0);
    tracker.add_combatant("vex", 16.0);

    let shield = EquipmentProfile {
        class: EquipmentClass::Shield,
        rarity: Rarity::Common,
        base_price: 10.0,
    };
    let mut shield_state = EquipmentAttrition::new();
    let mut purse = CurrencyPurse::from_gold(25);

    // Direct bludgeoning lands at double rate against shield thresholds
    // [3, 5, ...]: the 2nd hit reaches level 1 and the 5th reaches level 2.
    for _ in 0..5 {
        let (next, _) = engine.apply_damage(
            "brakk-shield",
            shield.class,
            DamageChannel::Bludgeoning,
            DamageKind::Direct,
            &shield_state,
        );
        shield_state = next;
    }
    assert_eq!(shield_state.real_damage_level, 2);
    sync_penalty(&mut binder, "brakk", shield.class, &shield_state);
    assert_eq!(
        binder.penalty("brakk", PenaltyKind::Shield),
        Some(
            engine.constants().attrition.shield_penalties[1]
                .to_string()
                .as_str()
        )
    );

    // Smith rolls well: one level comes off, 1 gp is paid.
    let mut roller = ScriptedRoller::new([Some(14)]);
    let receipt = engine
        .repair_partial("brakk-shield", &shield, &shield_state, &purse, 1, &mut roller)
        .unwrap();
    assert_eq!(receipt.outcome, RepairOutcome::Repaired);
    assert_eq!(receipt.state.real_damage_level, 1);
    assert!((normalize(&receipt.purse).total - 24.0).abs() < 1e-9);
    shield_state = receipt.state;
    purse = receipt.purse;

    // Reaction: act sooner this round, revert on the turn advance.
    let combatant = CombatantId::from("brakk");
    let mut reaction = ReactionState::new();
    reaction.max_fumble_range = 3;
    let (reaction, _) = engine
        .escalate_reaction(&combatant, &reaction, 27, &mut tracker)
        .unwrap();
    assert_eq!(reaction.fumble_range, 2);
    assert_eq!(tracker.current_turns()[0].combatant, combatant);

    assert_eq!(engine.turn_advanced(&mut tracker), Some(combatant.clone()));
    assert!((tracker.initiative_of(&combatant).unwrap() - 11.0).abs() < f64::EPSILON);
    // Second advance in the same round finds nothing to revert.
    assert_eq!(engine.turn_advanced(&mut tracker), None);

    // Full restoration at the craftsman charges the bare base price.
    let receipt = engine
        .repair_full("brakk-shield", &shield, &shield_state, &purse, true)
        .unwrap();
    assert!(receipt.state.is_pristine());
    assert!((normalize(&receipt.purse).total - 14.0).abs() < 1e-9);
    sync_penalty(&mut binder, "brakk", shield.class, &receipt.state);
    assert_eq!(binder.penalty("brakk", PenaltyKind::Shield), None);

    let events = events.lock().unwrap();
    assert!(events
        .iter()
        .any(|e| matches!(e, EngineEvent::AttritionChanged { .. })));
    assert!(events
        .iter()
        .any(|e| matches!(e, EngineEvent::RepairResolved { .. })));
    assert!(events
        .iter()
        .any(|e| matches!(e, EngineEvent::InitiativeReverted { .. })));
}

#[test]
fn destroyed_shield_needs_reconstruction() {
    let constants = EngineConstants::default();
    let mut state = EquipmentAttrition::new();
    // Double-rate bludgeoning against shield thresholds [3,5,7,9,11,15]
    while !state.destroyed {
        state = hit(&state, EquipmentClass::Shield, DamageChannel::Bludgeoning, &constants);
    }
    assert_eq!(state.real_damage_level, MAX_DAMAGE_LEVEL);
    assert_eq!(state.ac_penalty, constants.attrition.shield_penalties[5]);

    let profile = EquipmentProfile {
        class: EquipmentClass::Shield,
        rarity: Rarity::Common,
        base_price: 10.0,
    };
    let purse = CurrencyPurse::from_gold(30);
    let receipt = repair_full(&profile, &state, &purse, false, &constants).unwrap();
    assert_eq!(receipt.outcome, RepairOutcome::Reconstructed);
    assert!(receipt.state.is_pristine());
}
