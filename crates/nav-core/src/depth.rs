//! Depth budget and per-node expansion decisions.

use serde::{Deserialize, Serialize};

use crate::error::NavError;

/// How deep to expand menu entries that are not on the active path.
///
/// Entries on the active path are always expanded. Serialized as an integer
/// where `-1` means [`Depth::Unlimited`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Depth {
    /// Expand up to this many levels below the first.
    Levels(u32),
    /// Expand everything.
    Unlimited,
}

impl Default for Depth {
    fn default() -> Self {
        Self::Levels(0)
    }
}

impl TryFrom<i64> for Depth {
    type Error = NavError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value == -1 {
            return Ok(Self::Unlimited);
        }
        u32::try_from(value)
            .map(Self::Levels)
            .map_err(|_| NavError::InvalidDepth(value))
    }
}

impl From<Depth> for i64 {
    fn from(depth: Depth) -> Self {
        match depth {
            Depth::Levels(levels) => i64::from(levels),
            Depth::Unlimited => -1,
        }
    }
}

/// Expansion state of a menu entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expansion {
    /// On the active path: expand, restarting the depth count.
    Active,
    /// Within the depth budget: expand one level further.
    WithinBudget {
        /// Depth count for the entry's children.
        next: u32,
    },
    /// No budget limit: expand.
    Unlimited,
    /// Budget exhausted: leave the children out.
    AtBudgetLimit,
}

impl Expansion {
    /// Decide how an entry is expanded.
    ///
    /// `curdepth` counts how many levels the entry lies below the nearest
    /// active ancestor.
    #[must_use]
    pub fn decide(active: bool, curdepth: u32, depth: Depth) -> Self {
        if active {
            return Self::Active;
        }
        match depth {
            Depth::Levels(max) if curdepth < max => Self::WithinBudget {
                next: curdepth + 1,
            },
            Depth::Levels(_) => Self::AtBudgetLimit,
            Depth::Unlimited => Self::Unlimited,
        }
    }

    /// Depth count to recurse with, or `None` if the entry is not expanded.
    #[must_use]
    pub fn child_depth(self) -> Option<u32> {
        match self {
            Self::Active | Self::Unlimited => Some(0),
            Self::WithinBudget { next } => Some(next),
            Self::AtBudgetLimit => None,
        }
    }
}
