//! CurrencyPurse - denormalized multi-denomination coin counts

use serde::{Deserialize, Serialize};

/// A coin denomination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Denomination {
    Copper,
    Silver,
    Electrum,
    Gold,
    Platinum,
}

impl Denomination {
    /// Denominations ordered from lowest to highest value.
    /// Normalization folds excess coins upward in this order.
    pub fn ascending() -> &'static [Denomination] {
        &[
            Denomination::Copper,
            Denomination::Silver,
            Denomination::Electrum,
            Denomination::Gold,
            Denomination::Platinum,
        ]
    }

    /// Denominations ordered from highest to lowest value.
    /// Change-making pays out in this order.
    pub fn descending() -> &'static [Denomination] {
        &[
            Denomination::Platinum,
            Denomination::Gold,
            Denomination::Electrum,
            Denomination::Silver,
            Denomination::Copper,
        ]
    }

    /// Value of one coin in copper pieces
    pub fn copper_value(&self) -> u64 {
        match self {
            Denomination::Copper => 1,
            Denomination::Silver => 10,
            Denomination::Electrum => 50,
            Denomination::Gold => 100,
            Denomination::Platinum => 1_000,
        }
    }

    /// The denomination this one rolls up into, and how many coins make one
    /// of the parent. `None` for the top denomination.
    pub fn rolls_up_into(&self) -> Option<(Denomination, u32)> {
        match self {
            Denomination::Copper => Some((Denomination::Silver, 10)),
            Denomination::Silver => Some((Denomination::Electrum, 5)),
            Denomination::Electrum => Some((Denomination::Gold, 2)),
            Denomination::Gold => Some((Denomination::Platinum, 10)),
            Denomination::Platinum => None,
        }
    }

    /// Short symbol ("cp", "sp", ...)
    pub fn symbol(&self) -> &'static str {
        match self {
            Denomination::Copper => "cp",
            Denomination::Silver => "sp",
            Denomination::Electrum => "ep",
            Denomination::Gold => "gp",
            Denomination::Platinum => "pp",
        }
    }
}

/// Coin counts per denomination, as handed over by the host document layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyPurse {
    #[serde(default)]
    pub pp: u32,
    #[serde(default)]
    pub gp: u32,
    #[serde(default)]
    pub ep: u32,
    #[serde(default)]
    pub sp: u32,
    #[serde(default)]
    pub cp: u32,
}

impl CurrencyPurse {
    /// Empty purse
    pub fn new() -> Self {
        Self::default()
    }

    /// Purse holding only gold
    pub fn from_gold(gp: u32) -> Self {
        CurrencyPurse {
            gp,
            ..Self::default()
        }
    }

    /// Coin count for a denomination
    pub fn count(&self, denomination: Denomination) -> u32 {
        match denomination {
            Denomination::Copper => self.cp,
            Denomination::Silver => self.sp,
            Denomination::Electrum => self.ep,
            Denomination::Gold => self.gp,
            Denomination::Platinum => self.pp,
        }
    }

    /// Mutable coin count for a denomination
    pub fn count_mut(&mut self, denomination: Denomination) -> &mut u32 {
        match denomination {
            Denomination::Copper => &mut self.cp,
            Denomination::Silver => &mut self.sp,
            Denomination::Electrum => &mut self.ep,
            Denomination::Gold => &mut self.gp,
            Denomination::Platinum => &mut self.pp,
        }
    }

    /// Whether the purse holds no coins at all
    pub fn is_empty(&self) -> bool {
        Denomination::ascending()
            .iter()
            .all(|d| self.count(*d) == 0)
    }
}
