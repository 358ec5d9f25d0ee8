//! Penalty binding - pushing derived AC penalties into the host

use tracing::debug;

use crate::attrition::EquipmentAttrition;
use crate::host::StatusModifierBinder;
use crate::types::EquipmentClass;

/// Persist a piece's derived AC penalty on its owner.
///
/// Writes the signed penalty under the class's stable effect key (armor
/// and shield penalties live in separate records) and removes the record
/// entirely when the penalty is zero. Safe to call after every
/// transition; the binder's set semantics make repeats idempotent.
pub fn sync_penalty(
    binder: &mut impl StatusModifierBinder,
    owner: &str,
    class: EquipmentClass,
    state: &EquipmentAttrition,
) {
    let kind = class.penalty_kind();
    if state.ac_penalty == 0 {
        binder.clear_penalty(owner, kind);
        debug!(owner, key = kind.effect_key(), "penalty cleared");
    } else {
        let value = state.ac_penalty.to_string();
        binder.apply_penalty(owner, kind, &value);
        debug!(owner, key = kind.effect_key(), value = value.as_str(), "penalty bound");
    }
}
