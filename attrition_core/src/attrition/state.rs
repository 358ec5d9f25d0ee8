//! EquipmentAttrition - cumulative combat damage absorbed by one piece

use serde::{Deserialize, Serialize};

use crate::types::DamageChannel;

/// Terminal damage level; a piece at this level is destroyed
pub const MAX_DAMAGE_LEVEL: u8 = 6;

/// Per-channel storage for attrition bookkeeping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMap<T> {
    pub bludgeoning: T,
    pub piercing: T,
    pub slashing: T,
}

impl<T> ChannelMap<T> {
    pub fn get(&self, channel: DamageChannel) -> &T {
        match channel {
            DamageChannel::Bludgeoning => &self.bludgeoning,
            DamageChannel::Piercing => &self.piercing,
            DamageChannel::Slashing => &self.slashing,
        }
    }

    pub fn get_mut(&mut self, channel: DamageChannel) -> &mut T {
        match channel {
            DamageChannel::Bludgeoning => &mut self.bludgeoning,
            DamageChannel::Piercing => &mut self.piercing,
            DamageChannel::Slashing => &mut self.slashing,
        }
    }
}

impl<T: Copy + Ord> ChannelMap<T> {
    /// Largest value across all channels
    pub fn max(&self) -> T {
        self.bludgeoning.max(self.piercing).max(self.slashing)
    }
}

/// Attrition state owned by one equipment piece.
///
/// Created all-zero the first time a piece is evaluated and mutated only
/// through [`crate::attrition::apply_damage`] and the repair transitions
/// below. `real_damage_level` always equals the maximum channel level and
/// drives the AC penalty; `destroyed` is derived, never set independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentAttrition {
    /// Per-channel escalation counter (damage level)
    #[serde(default)]
    pub damage_level: ChannelMap<u8>,
    /// Hits accumulated toward the next level in each channel
    #[serde(default)]
    pub absorbed: ChannelMap<u8>,
    /// Pending half-hit flags for channels absorbing at half rate
    #[serde(default)]
    pub half_absorbed: ChannelMap<bool>,
    /// Maximum damage level across channels
    pub real_damage_level: u8,
    /// Derived armor-class penalty (0 or negative)
    pub ac_penalty: i32,
    /// True once `real_damage_level` reaches [`MAX_DAMAGE_LEVEL`]
    pub destroyed: bool,
}

impl EquipmentAttrition {
    /// Fresh, undamaged state
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the piece carries no attrition at all
    pub fn is_pristine(&self) -> bool {
        *self == Self::default()
    }

    /// Penalty for a given real damage level. Level 0 always means no
    /// penalty; above that the table is indexed at `level - 1`.
    pub(crate) fn penalty_for_level(level: u8, penalties: &[i32; 6]) -> i32 {
        if level == 0 {
            0
        } else {
            penalties[(level - 1).min(5) as usize]
        }
    }

    /// Repair transition: reduce the real damage level by one.
    ///
    /// No-op at level 0. Every channel level is clamped down to the new
    /// real level, all accumulated hits and half-hit flags are wiped, and
    /// the penalty is recomputed from the class penalty table.
    pub fn repaired_one_level(&self, penalties: &[i32; 6]) -> EquipmentAttrition {
        if self.real_damage_level == 0 {
            return self.clone();
        }

        let real = self.real_damage_level - 1;
        let mut next = self.clone();
        next.real_damage_level = real;
        for channel in DamageChannel::all() {
            let level = next.damage_level.get_mut(*channel);
            *level = (*level).min(real);
            *next.absorbed.get_mut(*channel) = 0;
            *next.half_absorbed.get_mut(*channel) = false;
        }
        next.ac_penalty = Self::penalty_for_level(real, penalties);
        next.destroyed = false;
        next
    }

    /// Repair transition: restore the piece completely
    pub fn fully_repaired(&self) -> EquipmentAttrition {
        EquipmentAttrition::default()
    }

    /// Check the structural invariants; used by tests and property checks
    pub fn is_consistent(&self) -> bool {
        self.real_damage_level == self.damage_level.max()
            && self.real_damage_level <= MAX_DAMAGE_LEVEL
            && self.destroyed == (self.real_damage_level == MAX_DAMAGE_LEVEL)
            && (self.real_damage_level > 0 || self.ac_penalty == 0)
    }
}
