//! Ledger operations - normalization, affordability checks and debit

use super::purse::{CurrencyPurse, Denomination};

/// A purse together with its canonical total value in gold pieces
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPurse {
    /// Canonical value in gold pieces
    pub total: f64,
    /// The renormalized purse (no denomination above its roll-up ratio)
    pub purse: CurrencyPurse,
}

/// Canonical purse value in copper pieces.
///
/// All comparisons go through copper so no floating-point drift can flip
/// an affordability check.
pub fn total_copper(purse: &CurrencyPurse) -> u64 {
    Denomination::ascending()
        .iter()
        .map(|d| purse.count(*d) as u64 * d.copper_value())
        .sum()
}

/// Settle a gold-denominated cost to whole copper pieces
fn cost_to_copper(cost: f64) -> u64 {
    if cost <= 0.0 {
        return 0;
    }
    (cost * 100.0).round() as u64
}

/// Normalize a purse: walk denominations from lowest to highest value and
/// fold every denomination's excess into its parent (10 cp become 1 sp,
/// 5 sp become 1 ep, and so on). The ascending order is fixed.
pub fn normalize(purse: &CurrencyPurse) -> NormalizedPurse {
    let mut folded = *purse;
    for denom in Denomination::ascending() {
        if let Some((parent, ratio)) = denom.rolls_up_into() {
            let count = folded.count(*denom);
            let carry = count / ratio;
            if carry > 0 {
                *folded.count_mut(*denom) = count % ratio;
                *folded.count_mut(parent) += carry;
            }
        }
    }
    NormalizedPurse {
        total: total_copper(purse) as f64 / 100.0,
        purse: folded,
    }
}

/// Whether the purse covers a gold-denominated cost
pub fn can_afford(cost: f64, purse: &CurrencyPurse) -> bool {
    cost_to_copper(cost) <= total_copper(purse)
}

/// Debit a gold-denominated cost and make change.
///
/// The remainder is re-expanded from the HIGHEST denomination downward:
/// each denomination takes the integer share of what is left and the rest
/// carries down, with copper absorbing the final fraction. The descending
/// order is intentional and decides which denominations the change is paid
/// out in; it is the opposite of [`normalize`].
///
/// Returns `None` when the purse cannot cover the cost.
pub fn debit(cost: f64, purse: &CurrencyPurse) -> Option<CurrencyPurse> {
    let funds = total_copper(purse);
    let cost_cp = cost_to_copper(cost);
    if cost_cp > funds {
        return None;
    }

    let mut remainder = funds - cost_cp;
    let mut change = CurrencyPurse::new();
    for denom in Denomination::descending() {
        let value = denom.copper_value();
        *change.count_mut(*denom) = (remainder / value) as u32;
        remainder %= value;
    }
    Some(change)
}
