//! Absorption rules - how each equipment class wears under each channel

use serde::{Deserialize, Serialize};

use crate::types::{DamageChannel, DamageKind, EquipmentClass};

/// How a hit on one channel accumulates toward the next damage level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsorptionRule {
    /// The class shrugs this channel off; state never changes
    Immune,
    /// One absorbed point per hit
    Full,
    /// Two absorbed points per hit
    Double,
    /// Two hits park and complete a half-hit toggle before counting as one
    HalfThenFull,
}

/// Canonical absorption table.
///
/// Direct and glancing hits map the same class/channel pair to different
/// rates on purpose; the asymmetry is game design, not an accident. Treat
/// this table as the source of truth and do not unify the two kinds.
pub fn absorption_rule(
    class: EquipmentClass,
    channel: DamageChannel,
    kind: DamageKind,
) -> AbsorptionRule {
    use AbsorptionRule::*;
    use DamageChannel::*;
    use DamageKind::*;
    use EquipmentClass::*;

    match (class, channel, kind) {
        // Light armor: padding soaks bludgeoning entirely
        (Light, Bludgeoning, _) => Immune,
        (Light, Piercing, Direct) => Full,
        (Light, Piercing, Glancing) => HalfThenFull,
        (Light, Slashing, Direct) => Full,
        (Light, Slashing, Glancing) => HalfThenFull,

        // Medium armor
        (Medium, Bludgeoning, Direct) => Full,
        (Medium, Bludgeoning, Glancing) => HalfThenFull,
        (Medium, Piercing, _) => HalfThenFull,
        (Medium, Slashing, Direct) => Full,
        (Medium, Slashing, Glancing) => HalfThenFull,

        // Heavy armor: plate dents badly under blunt force but glancing
        // slashes do nothing at all
        (Heavy, Bludgeoning, Direct) => Double,
        (Heavy, Bludgeoning, Glancing) => Full,
        (Heavy, Piercing, Direct) => Full,
        (Heavy, Piercing, Glancing) => HalfThenFull,
        (Heavy, Slashing, Direct) => HalfThenFull,
        (Heavy, Slashing, Glancing) => Immune,

        // Shields
        (Shield, Bludgeoning, Direct) => Double,
        (Shield, Bludgeoning, Glancing) => Full,
        (Shield, Piercing, Direct) => HalfThenFull,
        (Shield, Piercing, Glancing) => Immune,
        (Shield, Slashing, Direct) => Full,
        (Shield, Slashing, Glancing) => HalfThenFull,
    }
}
