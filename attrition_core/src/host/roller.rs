//! CheckRoller implementations

use rand::Rng;
use std::collections::VecDeque;

use super::{CheckOutcome, CheckRoller};

/// d20 roller backed by any `Rng`; deterministic with a seeded generator
pub struct DiceRoller<R: Rng> {
    rng: R,
    modifier: i32,
}

impl<R: Rng> DiceRoller<R> {
    /// Roller with no modifier
    pub fn new(rng: R) -> Self {
        DiceRoller { rng, modifier: 0 }
    }

    /// Roller adding a flat modifier to every check
    pub fn with_modifier(rng: R, modifier: i32) -> Self {
        DiceRoller { rng, modifier }
    }
}

impl<R: Rng> CheckRoller for DiceRoller<R> {
    fn roll_check(&mut self, _difficulty: i32) -> Option<CheckOutcome> {
        let total = self.rng.gen_range(1..=20) + self.modifier;
        Some(CheckOutcome { total })
    }
}

/// Queue of scripted roll results for deterministic tests and demos.
///
/// A `None` entry (or an exhausted queue) models the user cancelling the
/// roll dialog.
pub struct ScriptedRoller {
    outcomes: VecDeque<Option<i32>>,
}

impl ScriptedRoller {
    pub fn new(outcomes: impl IntoIterator<Item = Option<i32>>) -> Self {
        ScriptedRoller {
            outcomes: outcomes.into_iter().collect(),
        }
    }

    /// Roller that always cancels
    pub fn cancelling() -> Self {
        Self::new([])
    }
}

impl CheckRoller for ScriptedRoller {
    fn roll_check(&mut self, _difficulty: i32) -> Option<CheckOutcome> {
        self.outcomes
            .pop_front()
            .flatten()
            .map(|total| CheckOutcome { total })
    }
}
