//! Dice rolling for character generation.
//!
//! The frontier runs on d6 pools: attributes are rolled as 4d6 drop
//! lowest, starting money as 3d6 x 10.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error type for building dice pools.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiceError {
    #[error("Dice pool must have at least one die with at least one side")]
    EmptyPool,
    #[error("Cannot drop {drop} dice from a pool of {count}")]
    InvalidDropCount { drop: u32, count: u32 },
}

/// A pool of identical dice with an optional drop-lowest rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollSpec {
    pub count: u32,
    pub sides: u32,
    pub drop_lowest: u32,
}

impl RollSpec {
    /// Build a pool of `count` dice with `sides` sides each.
    pub fn new(count: u32, sides: u32) -> Result<Self, DiceError> {
        if count == 0 || sides == 0 {
            return Err(DiceError::EmptyPool);
        }
        Ok(Self {
            count,
            sides,
            drop_lowest: 0,
        })
    }

    /// Drop the lowest `drop` dice before summing.
    pub fn drop_lowest(mut self, drop: u32) -> Result<Self, DiceError> {
        if drop >= self.count {
            return Err(DiceError::InvalidDropCount {
                drop,
                count: self.count,
            });
        }
        self.drop_lowest = drop;
        Ok(self)
    }

    /// The standard attribute pool: 4d6 drop lowest.
    pub fn attribute() -> Self {
        Self {
            count: 4,
            sides: 6,
            drop_lowest: 1,
        }
    }

    /// Roll the pool and return the full outcome.
    pub fn roll(&self) -> RollOutcome {
        self.roll_with_rng(&mut rand::thread_rng())
    }

    /// Roll with a specific RNG (useful for testing).
    pub fn roll_with_rng<R: Rng>(&self, rng: &mut R) -> RollOutcome {
        let rolls: Vec<u32> = (0..self.count)
            .map(|_| rng.gen_range(1..=self.sides))
            .collect();

        let mut sorted = rolls.clone();
        sorted.sort_unstable();
        let (dropped, kept) = sorted.split_at(self.drop_lowest.min(self.count) as usize);

        let kept = kept.to_vec();
        let dropped = dropped.to_vec();
        let total = kept.iter().sum();

        RollOutcome {
            rolls,
            kept,
            dropped,
            total,
        }
    }
}

impl fmt::Display for RollSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.drop_lowest > 0 {
            write!(f, "{}d{} drop {}", self.count, self.sides, self.drop_lowest)
        } else {
            write!(f, "{}d{}", self.count, self.sides)
        }
    }
}

/// Complete result of rolling a pool: every die, the kept dice, and the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    pub rolls: Vec<u32>,
    pub kept: Vec<u32>,
    pub dropped: Vec<u32>,
    pub total: u32,
}

impl fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Dropped dice are shown in parentheses, in roll order.
        let mut dropped_used = vec![false; self.dropped.len()];
        let shown: Vec<String> = self
            .rolls
            .iter()
            .map(|&roll| {
                let is_dropped = self.dropped.iter().enumerate().any(|(i, &d)| {
                    if d == roll && !dropped_used[i] {
                        dropped_used[i] = true;
                        true
                    } else {
                        false
                    }
                });
                if is_dropped {
                    format!("({roll})")
                } else {
                    format!("{roll}")
                }
            })
            .collect();
        write!(f, "[{}] = {}", shown.join(", "), self.total)
    }
}

/// Roll 4d6, drop the lowest die, and sum the rest. Always in [3, 18].
pub fn roll_attribute() -> u8 {
    roll_attribute_with_rng(&mut rand::thread_rng())
}

/// Attribute roll with a specific RNG.
pub fn roll_attribute_with_rng<R: Rng>(rng: &mut R) -> u8 {
    RollSpec::attribute().roll_with_rng(rng).total as u8
}

/// Attribute roll keeping the individual dice for display.
pub fn roll_attribute_detailed() -> RollOutcome {
    RollSpec::attribute().roll()
}

/// Roll 3d6 x 10 for starting money.
pub fn roll_starting_money() -> u16 {
    roll_starting_money_with_rng(&mut rand::thread_rng())
}

/// Starting money roll with a specific RNG.
pub fn roll_starting_money_with_rng<R: Rng>(rng: &mut R) -> u16 {
    let pool = RollSpec {
        count: 3,
        sides: 6,
        drop_lowest: 0,
    };
    (pool.roll_with_rng(rng).total * 10) as u16
}
