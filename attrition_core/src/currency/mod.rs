//! Currency ledger - purse normalization, affordability and change-making

mod ledger;
mod purse;

pub use ledger::{can_afford, debit, normalize, total_copper, NormalizedPurse};
pub use purse::{CurrencyPurse, Denomination};
