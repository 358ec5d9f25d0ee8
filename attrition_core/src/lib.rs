//! attrition_core - Equipment attrition, repair and reaction engine
//!
//! This library provides:
//! - EquipmentAttrition: per-piece damage-level state machine with
//!   class-specific absorption rules and threshold tables
//! - Repair engine: partial and full repairs gated by the currency ledger
//!   and an external skill-check roll
//! - ReactionState: fumble-range escalation bound to a shared turn-order
//!   tracker, overflowing into exhaustion
//! - Currency ledger: purse normalization, affordability and change-making
//!
//! All transitions are pure `(state, op) -> (new_state, result)` functions;
//! persisting the returned records is the host's job.

pub mod attrition;
pub mod binder;
pub mod config;
pub mod currency;
pub mod engine;
pub mod events;
pub mod host;
pub mod prelude;
pub mod reaction;
pub mod repair;
pub mod types;

// Re-export core types for convenience
pub use attrition::{
    absorption_rule, apply_damage, AbsorptionRule, AttritionResult, ChannelMap,
    EquipmentAttrition, MAX_DAMAGE_LEVEL,
};
pub use binder::sync_penalty;
pub use config::{
    load_constants, parse_constants, AttritionConstants, ConfigError, EngineConstants,
    ReactionConstants, RepairConstants,
};
pub use currency::{can_afford, debit, normalize, total_copper, CurrencyPurse, Denomination};
pub use engine::AttritionEngine;
pub use events::{EngineEvent, EventBus};
pub use host::{
    CheckOutcome, CheckRoller, DiceRoller, MemoryBinder, MemoryTurnOrder, PendingRevert,
    ScriptedRoller, StatusModifierBinder, TurnEntry, TurnOrderTracker,
};
pub use reaction::{
    escalate_fumble, handle_turn_advance, reduce_fumble, InitiativeShift, ReactionError,
    ReactionShift, ReactionState,
};
pub use repair::{
    repair_full, repair_partial, EquipmentProfile, RepairError, RepairOutcome, RepairReceipt,
};
pub use types::{
    CombatantAttributes, CombatantId, DamageChannel, DamageKind, EquipmentClass, PenaltyKind,
    Rarity,
};
