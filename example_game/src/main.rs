//! Example Game - a seeded command-line skirmish demonstrating attrition_core
//!
//! This demo shows:
//! - Equipment wearing down under incoming hits (attrition state machine)
//! - AC penalties bound to the combatant as the damage level climbs
//! - Partial and full repairs paid from a coin purse, gated by dice
//! - Agile reactions trading turn order for fumble-range risk

use attrition_core::{
    AttritionEngine, CombatantAttributes, CombatantId, CurrencyPurse, DamageChannel, DamageKind,
    DiceRoller, EngineEvent, EquipmentAttrition, EquipmentClass, EquipmentProfile, MemoryBinder,
    MemoryTurnOrder, PenaltyKind, Rarity, ReactionState, RepairError, TurnOrderTracker,
};
use attrition_core::{normalize, sync_penalty};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Helper to print a separator
fn separator(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {}", title);
    println!("{}\n", "=".repeat(60));
}

fn print_attrition(label: &str, state: &EquipmentAttrition) {
    println!(
        "  {label}: damage level {} (AC {}){}",
        state.real_damage_level,
        state.ac_penalty,
        if state.destroyed { " [DESTROYED]" } else { "" }
    );
}

fn print_purse(purse: &CurrencyPurse) {
    println!(
        "  Purse: {} pp, {} gp, {} ep, {} sp, {} cp ({:.2} gp total)",
        purse.pp,
        purse.gp,
        purse.ep,
        purse.sp,
        purse.cp,
        normalize(purse).total
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut engine = AttritionEngine::with_defaults();
    engine.subscribe(|event: &EngineEvent| {
        if let EngineEvent::EquipmentDestroyed { owner } = event {
            println!("  !! {owner} is destroyed");
        }
    });

    let mut binder = MemoryBinder::new();
    let mut tracker = MemoryTurnOrder::new();
    tracker.add_combatant("brakk", 11.0);
    tracker.add_combatant("gnoll-raider", 16.0);

    let brakk = CombatantId::from("brakk");
    let mut hit_points = 27;
    let mut purse = CurrencyPurse {
        pp: 1,
        gp: 22,
        sp: 14,
        ..CurrencyPurse::default()
    };

    let armor = EquipmentProfile {
        class: EquipmentClass::Medium,
        rarity: Rarity::Uncommon,
        base_price: 50.0,
    };
    let mut armor_state = EquipmentAttrition::new();

    separator("The raider hammers Brakk's breastplate");
    let channels = [
        DamageChannel::Slashing,
        DamageChannel::Piercing,
        DamageChannel::Bludgeoning,
    ];
    for round in 1..=12 {
        let channel = channels[rng.gen_range(0..channels.len())];
        let kind = if rng.gen_bool(0.3) {
            DamageKind::Glancing
        } else {
            DamageKind::Direct
        };
        let (next, result) =
            engine.apply_damage("brakk-armor", armor.class, channel, kind, &armor_state);
        println!("  round {round:>2}: {:?} {} - {}", kind, channel.label(), result.summary());
        armor_state = next;
    }
    sync_penalty(&mut binder, "brakk", armor.class, &armor_state);
    print_attrition("Breastplate", &armor_state);
    if let Some(penalty) = binder.penalty("brakk", PenaltyKind::Armor) {
        println!("  Bound penalty: {penalty} AC");
    }

    separator("At the smith: partial repair");
    print_purse(&purse);
    let mut roller = DiceRoller::with_modifier(ChaCha8Rng::seed_from_u64(7), 4);
    match engine.repair_partial("brakk-armor", &armor, &armor_state, &purse, 1, &mut roller) {
        Ok(receipt) => {
            println!("  {}", receipt.summary());
            armor_state = receipt.state;
            purse = receipt.purse;
        }
        Err(RepairError::TooExpensive { cost, funds }) => {
            println!("  Smith wants {cost:.2} gp, purse holds {funds:.2} gp");
        }
    }
    sync_penalty(&mut binder, "brakk", armor.class, &armor_state);
    print_attrition("Breastplate", &armor_state);
    print_purse(&purse);

    separator("Next fight: agile reactions");
    let mut reaction = ReactionState::new();
    reaction.refresh_cap(&CombatantAttributes::new(16));
    println!(
        "  Fumble range {}/{} (dexterity 16)",
        reaction.fumble_range, reaction.max_fumble_range
    );

    for attempt in 1..=4 {
        match engine.escalate_reaction(&brakk, &reaction, hit_points, &mut tracker) {
            Ok((next, shift)) => {
                println!("  reaction {attempt}: {}", shift.summary());
                reaction = next;
                if shift.fatal {
                    hit_points = shift.hit_points;
                }
            }
            Err(err) => println!("  reaction {attempt}: {err}"),
        }
        let order: Vec<String> = tracker
            .current_turns()
            .iter()
            .map(|t| format!("{} ({})", t.combatant, t.initiative))
            .collect();
        println!("    turn order: {}", order.join(", "));
        if let Some(reverted) = engine.turn_advanced(&mut tracker) {
            println!("    turn advances, {reverted} slides back");
        }
    }
    println!("  Hit points: {hit_points}");

    separator("Back in town: full restoration");
    match engine.repair_full("brakk-armor", &armor, &armor_state, &purse, true) {
        Ok(receipt) => {
            println!("  {}", receipt.summary());
            armor_state = receipt.state;
            purse = receipt.purse;
        }
        Err(err) => println!("  {err}"),
    }
    sync_penalty(&mut binder, "brakk", armor.class, &armor_state);
    print_attrition("Breastplate", &armor_state);
    print_purse(&purse);
    println!(
        "  Penalty record: {:?}",
        binder.penalty("brakk", PenaltyKind::Armor)
    );
}
