//! Prelude module for convenient imports
//!
//! ```rust
//! use attrition_core::prelude::*;
//! ```

// Core types
pub use crate::types::{
    CombatantAttributes, CombatantId, DamageChannel, DamageKind, EquipmentClass, PenaltyKind,
    Rarity,
};

// Attrition state machine
pub use crate::attrition::{apply_damage, AttritionResult, EquipmentAttrition, MAX_DAMAGE_LEVEL};

// Repair engine
pub use crate::repair::{
    repair_full, repair_partial, EquipmentProfile, RepairError, RepairOutcome, RepairReceipt,
};

// Reaction system
pub use crate::reaction::{
    escalate_fumble, handle_turn_advance, reduce_fumble, ReactionError, ReactionShift,
    ReactionState,
};

// Currency ledger
pub use crate::currency::{can_afford, debit, normalize, CurrencyPurse, Denomination};

// Host contracts
pub use crate::host::{CheckRoller, StatusModifierBinder, TurnOrderTracker};

// Engine facade and events
pub use crate::engine::AttritionEngine;
pub use crate::events::{EngineEvent, EventBus};

// Config
pub use crate::config::EngineConstants;
