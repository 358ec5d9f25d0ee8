//! Repair engine - reversing attrition against the currency ledger

mod engine;
mod outcome;

pub use engine::{repair_full, repair_partial, EquipmentProfile};
pub use outcome::{RepairError, RepairOutcome, RepairReceipt};
