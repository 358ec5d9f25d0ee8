//! Repair outcomes and errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::attrition::EquipmentAttrition;
use crate::currency::CurrencyPurse;

/// Narrative outcome code of a repair operation.
///
/// The engine only reports the code; localizing and rendering it is the
/// presentation layer's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairOutcome {
    /// Damage levels were reduced or cleared
    Repaired,
    /// A destroyed piece was rebuilt from scratch
    Reconstructed,
    /// The fee was paid but the skill check failed
    RepairFailed,
    /// The roll dialog was cancelled; nothing happened
    Cancelled,
    /// Zero levels requested or the piece was already pristine
    NothingToRepair,
}

/// Everything one repair call resolves to.
///
/// `state` and `purse` are a matched pair: the caller persists both or
/// neither, which is what keeps debit and repair atomic from the host's
/// perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairReceipt {
    pub state: EquipmentAttrition,
    pub purse: CurrencyPurse,
    /// Gold actually charged
    pub cost: f64,
    pub outcome: RepairOutcome,
}

impl RepairReceipt {
    /// Receipt that leaves every record untouched
    pub(crate) fn unchanged(
        state: &EquipmentAttrition,
        purse: &CurrencyPurse,
        outcome: RepairOutcome,
    ) -> Self {
        RepairReceipt {
            state: state.clone(),
            purse: *purse,
            cost: 0.0,
            outcome,
        }
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        match self.outcome {
            RepairOutcome::Repaired => {
                format!("repaired to damage level {} for {:.2} gp", self.state.real_damage_level, self.cost)
            }
            RepairOutcome::Reconstructed => format!("reconstructed for {:.2} gp", self.cost),
            RepairOutcome::RepairFailed => {
                format!("repair failed, {:.2} gp spent", self.cost)
            }
            RepairOutcome::Cancelled => "repair cancelled".to_string(),
            RepairOutcome::NothingToRepair => "nothing to repair".to_string(),
        }
    }
}

/// Repair failure reported before any mutation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepairError {
    #[error("repair costs {cost:.2} gp but the purse holds {funds:.2} gp")]
    TooExpensive { cost: f64, funds: f64 },
}
