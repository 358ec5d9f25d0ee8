//! Engine constants configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::ConfigError;
use crate::types::{EquipmentClass, Rarity};

/// Tunable engine constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConstants {
    #[serde(default)]
    pub attrition: AttritionConstants,
    #[serde(default)]
    pub repair: RepairConstants,
    #[serde(default)]
    pub reaction: ReactionConstants,
}

impl Default for EngineConstants {
    fn default() -> Self {
        EngineConstants {
            attrition: AttritionConstants::default(),
            repair: RepairConstants::default(),
            reaction: ReactionConstants::default(),
        }
    }
}

impl EngineConstants {
    /// Validate domain constraints the type system cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.attrition.validate()?;
        self.repair.validate()?;
        self.reaction.validate()
    }
}

/// Threshold and penalty tables for the damage absorption state machine.
///
/// Thresholds are indexed by a channel's current damage level; penalties by
/// `real_damage_level - 1`. The three armor families share one pair of
/// tables, shields use a distinct pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttritionConstants {
    #[serde(default = "default_armor_thresholds")]
    pub armor_thresholds: [u32; 6],
    #[serde(default = "default_shield_thresholds")]
    pub shield_thresholds: [u32; 6],
    #[serde(default = "default_armor_penalties")]
    pub armor_penalties: [i32; 6],
    #[serde(default = "default_shield_penalties")]
    pub shield_penalties: [i32; 6],
}

impl Default for AttritionConstants {
    fn default() -> Self {
        AttritionConstants {
            armor_thresholds: default_armor_thresholds(),
            shield_thresholds: default_shield_thresholds(),
            armor_penalties: default_armor_penalties(),
            shield_penalties: default_shield_penalties(),
        }
    }
}

impl AttritionConstants {
    /// Escalation thresholds for an equipment class
    pub fn thresholds(&self, class: EquipmentClass) -> &[u32; 6] {
        match class {
            EquipmentClass::Shield => &self.shield_thresholds,
            _ => &self.armor_thresholds,
        }
    }

    /// Penalty table for an equipment class
    pub fn penalties(&self, class: EquipmentClass) -> &[i32; 6] {
        match class {
            EquipmentClass::Shield => &self.shield_penalties,
            _ => &self.armor_penalties,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, table) in [
            ("armor_thresholds", &self.armor_thresholds),
            ("shield_thresholds", &self.shield_thresholds),
        ] {
            if table.iter().any(|t| *t == 0) {
                return Err(ConfigError::ValidationError(format!(
                    "{name} entries must be at least 1"
                )));
            }
            if table.windows(2).any(|w| w[0] > w[1]) {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be non-decreasing"
                )));
            }
        }
        for (name, table) in [
            ("armor_penalties", &self.armor_penalties),
            ("shield_penalties", &self.shield_penalties),
        ] {
            if table.iter().any(|p| *p > 0) {
                return Err(ConfigError::ValidationError(format!(
                    "{name} entries must be zero or negative"
                )));
            }
        }
        Ok(())
    }
}

fn default_armor_thresholds() -> [u32; 6] {
    [2, 4, 6, 8, 10, 20]
}
fn default_shield_thresholds() -> [u32; 6] {
    [3, 5, 7, 9, 11, 15]
}
fn default_armor_penalties() -> [i32; 6] {
    [-1, -2, -3, -4, -5, -10]
}
fn default_shield_penalties() -> [i32; 6] {
    [-1, -1, -2, -2, -3, -5]
}

/// Repair economy constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairConstants {
    /// Fee per damage level as a fraction of the item's base price
    #[serde(default = "default_repair_fee_rate")]
    pub repair_fee_rate: f64,
    /// Full-restoration fee as a multiple of the item's base price
    #[serde(default = "default_full_repair_fee_rate")]
    pub full_repair_fee_rate: f64,
    /// Skill-check difficulty when the rarity table has no entry
    #[serde(default = "default_fallback_difficulty")]
    pub fallback_difficulty: i32,
    /// Skill-check difficulty per item rarity
    #[serde(default = "default_rarity_difficulty")]
    pub rarity_difficulty: HashMap<Rarity, i32>,
}

impl Default for RepairConstants {
    fn default() -> Self {
        RepairConstants {
            repair_fee_rate: default_repair_fee_rate(),
            full_repair_fee_rate: default_full_repair_fee_rate(),
            fallback_difficulty: default_fallback_difficulty(),
            rarity_difficulty: default_rarity_difficulty(),
        }
    }
}

impl RepairConstants {
    /// Skill-check difficulty for an item rarity
    pub fn difficulty_for(&self, rarity: Rarity) -> i32 {
        *self
            .rarity_difficulty
            .get(&rarity)
            .unwrap_or(&self.fallback_difficulty)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.repair_fee_rate <= 0.0 || self.full_repair_fee_rate <= 0.0 {
            return Err(ConfigError::ValidationError(
                "repair fee rates must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_repair_fee_rate() -> f64 {
    0.1
}
fn default_full_repair_fee_rate() -> f64 {
    2.0
}
fn default_fallback_difficulty() -> i32 {
    10
}
fn default_rarity_difficulty() -> HashMap<Rarity, i32> {
    HashMap::from([
        (Rarity::Common, 10),
        (Rarity::Uncommon, 12),
        (Rarity::Rare, 15),
        (Rarity::VeryRare, 18),
        (Rarity::Legendary, 20),
    ])
}

/// Agile-reaction constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionConstants {
    /// World rule for the exhaustion ceiling; 6 or 10
    #[serde(default = "default_exhaustion_limit")]
    pub exhaustion_limit: u8,
    /// Initiative delta applied while a reaction shift is pending
    #[serde(default = "default_initiative_boost")]
    pub initiative_boost: f64,
}

impl Default for ReactionConstants {
    fn default() -> Self {
        ReactionConstants {
            exhaustion_limit: default_exhaustion_limit(),
            initiative_boost: default_initiative_boost(),
        }
    }
}

impl ReactionConstants {
    fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.exhaustion_limit, 6 | 10) {
            return Err(ConfigError::ValidationError(format!(
                "exhaustion_limit must be 6 or 10, got {}",
                self.exhaustion_limit
            )));
        }
        if self.initiative_boost <= 0.0 {
            return Err(ConfigError::ValidationError(
                "initiative_boost must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_exhaustion_limit() -> u8 {
    6
}
fn default_initiative_boost() -> f64 {
    20.0
}
