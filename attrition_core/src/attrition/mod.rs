//! Damage absorption state machine - per-piece attrition tracking

mod apply;
mod rules;
mod state;

pub use apply::{apply_damage, AttritionResult};
pub use rules::{absorption_rule, AbsorptionRule};
pub use state::{ChannelMap, EquipmentAttrition, MAX_DAMAGE_LEVEL};
