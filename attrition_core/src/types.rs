//! Core types shared across the attrition engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical damage channel tracked per equipment piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageChannel {
    Bludgeoning,
    Piercing,
    Slashing,
}

impl DamageChannel {
    /// Get all damage channels
    pub fn all() -> &'static [DamageChannel] {
        &[
            DamageChannel::Bludgeoning,
            DamageChannel::Piercing,
            DamageChannel::Slashing,
        ]
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            DamageChannel::Bludgeoning => "bludgeoning",
            DamageChannel::Piercing => "piercing",
            DamageChannel::Slashing => "slashing",
        }
    }
}

/// How an incoming hit is attributed to the equipment piece.
///
/// Direct and glancing hits use different absorption-rate mappings for the
/// same equipment class; the tables in [`crate::attrition`] are the source
/// of truth for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageKind {
    /// A full hit absorbed by the piece
    Direct,
    /// A half/glancing hit
    Glancing,
}

/// Equipment family, decides absorption rules and threshold tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentClass {
    Light,
    Medium,
    Heavy,
    Shield,
}

impl EquipmentClass {
    /// Get all equipment classes
    pub fn all() -> &'static [EquipmentClass] {
        &[
            EquipmentClass::Light,
            EquipmentClass::Medium,
            EquipmentClass::Heavy,
            EquipmentClass::Shield,
        ]
    }

    /// Which persistent status-modifier record this class binds its penalty to
    pub fn penalty_kind(&self) -> PenaltyKind {
        match self {
            EquipmentClass::Shield => PenaltyKind::Shield,
            _ => PenaltyKind::Armor,
        }
    }
}

/// Kind of persistent AC-penalty record owned by a combatant.
///
/// Each kind maps to one stable effect key so repeated writes replace the
/// same host-side record instead of stacking new ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyKind {
    Armor,
    Shield,
}

impl PenaltyKind {
    /// Stable effect key identifying the penalty record on the host
    pub fn effect_key(&self) -> &'static str {
        match self {
            PenaltyKind::Armor => "attrition-armor-penalty",
            PenaltyKind::Shield => "attrition-shield-penalty",
        }
    }
}

/// Item rarity, drives the repair skill-check difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    VeryRare,
    Legendary,
}

/// Identifier for a combatant in the shared turn order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatantId(pub String);

impl From<&str> for CombatantId {
    fn from(s: &str) -> Self {
        CombatantId(s.to_string())
    }
}

impl From<String> for CombatantId {
    fn from(s: String) -> Self {
        CombatantId(s)
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attributes a combatant contributes to derived reaction values
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CombatantAttributes {
    /// Ability score, 1-30
    pub dexterity: i32,
}

impl CombatantAttributes {
    pub fn new(dexterity: i32) -> Self {
        CombatantAttributes { dexterity }
    }

    /// Standard ability modifier: `(score - 10) / 2`, rounded down
    pub fn dexterity_modifier(&self) -> i32 {
        (self.dexterity - 10).div_euclid(2)
    }
}
