//! Age bracket rules.
//!
//! A character's age places them in one of four life-stage brackets. The
//! bracket decides a one-time attribute adjustment, the skill-point budget,
//! and how many distinct skills may be trained. This module is the single
//! source of truth for bracket boundaries.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Youngest playable age.
pub const MIN_AGE: u8 = 14;

/// Oldest playable age.
pub const MAX_AGE: u8 = 57;

/// Error type for age resolution.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AgeError {
    #[error("age {age} is outside the playable range ({MIN_AGE}-{MAX_AGE})")]
    OutOfRange { age: u8 },
}

/// One-time attribute adjustment owned by a bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDeltas {
    pub vigor: i8,
    pub finesse: i8,
    pub smarts: i8,
}

/// The four life-stage brackets.
///
/// Ranges are closed, contiguous, and non-overlapping across [14, 57].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBracket {
    Young,
    Prime,
    Experienced,
    Elder,
}

impl AgeBracket {
    /// Map an age to its bracket.
    pub fn resolve(age: u8) -> Result<AgeBracket, AgeError> {
        match age {
            14..=22 => Ok(AgeBracket::Young),
            23..=34 => Ok(AgeBracket::Prime),
            35..=52 => Ok(AgeBracket::Experienced),
            53..=57 => Ok(AgeBracket::Elder),
            _ => Err(AgeError::OutOfRange { age }),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBracket::Young => "Young",
            AgeBracket::Prime => "Prime",
            AgeBracket::Experienced => "Experienced",
            AgeBracket::Elder => "Elder",
        }
    }

    /// Inclusive age range covered by this bracket.
    pub fn age_range(&self) -> (u8, u8) {
        match self {
            AgeBracket::Young => (14, 22),
            AgeBracket::Prime => (23, 34),
            AgeBracket::Experienced => (35, 52),
            AgeBracket::Elder => (53, 57),
        }
    }

    /// Attribute adjustment applied once at creation.
    ///
    /// The young get a physical edge; hard years on the trail take it back
    /// with interest.
    pub fn attribute_deltas(&self) -> AttributeDeltas {
        match self {
            AgeBracket::Young => AttributeDeltas {
                vigor: 1,
                finesse: 1,
                smarts: 0,
            },
            AgeBracket::Prime => AttributeDeltas {
                vigor: 0,
                finesse: 0,
                smarts: 0,
            },
            AgeBracket::Experienced => AttributeDeltas {
                vigor: -1,
                finesse: -1,
                smarts: 0,
            },
            AgeBracket::Elder => AttributeDeltas {
                vigor: -2,
                finesse: -2,
                smarts: 0,
            },
        }
    }

    /// Skill points granted at creation.
    pub fn skill_points(&self) -> u16 {
        match self {
            AgeBracket::Young => 6,
            AgeBracket::Prime => 10,
            AgeBracket::Experienced => 13,
            AgeBracket::Elder => 15,
        }
    }

    /// Maximum number of distinct skills that may hold points.
    pub fn skill_cap(&self) -> usize {
        match self {
            AgeBracket::Young => 4,
            AgeBracket::Prime => 6,
            AgeBracket::Experienced => 8,
            AgeBracket::Elder => 10,
        }
    }

    pub fn all() -> [AgeBracket; 4] {
        [
            AgeBracket::Young,
            AgeBracket::Prime,
            AgeBracket::Experienced,
            AgeBracket::Elder,
        ]
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
