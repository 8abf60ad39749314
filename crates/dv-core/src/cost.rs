//! Link and path cost.
//!
//! Costs are unsigned, so a negative link cost cannot be expressed at all.
//! `Cost::INFINITY` (`u32::MAX`) marks an absent link or an unreachable
//! destination.  Addition saturates at the sentinel, which makes
//! `link + INFINITY == INFINITY` hold without special cases in the
//! relaxation loop.

use std::fmt;

/// A non-negative cost, or the `INFINITY` sentinel.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Cost(pub u32);

impl Cost {
    pub const ZERO: Cost = Cost(0);

    /// Unreachable / no link.
    pub const INFINITY: Cost = Cost(u32::MAX);

    #[inline]
    pub fn is_finite(self) -> bool {
        self != Cost::INFINITY
    }

    #[inline]
    pub fn is_infinite(self) -> bool {
        self == Cost::INFINITY
    }

    /// `None` for the sentinel, the raw value otherwise.
    #[inline]
    pub fn finite(self) -> Option<u32> {
        self.is_finite().then_some(self.0)
    }
}

impl From<u32> for Cost {
    #[inline]
    fn from(v: u32) -> Cost {
        Cost(v)
    }
}

impl From<Option<u32>> for Cost {
    /// `None` maps to `INFINITY`; handy for scenario files where a missing
    /// cost means "link down".
    #[inline]
    fn from(v: Option<u32>) -> Cost {
        v.map_or(Cost::INFINITY, Cost)
    }
}

impl std::ops::Add for Cost {
    type Output = Cost;
    #[inline]
    fn add(self, rhs: Cost) -> Cost {
        Cost(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.finite() {
            Some(v) => write!(f, "{v}"),
            None    => f.write_str("inf"),
        }
    }
}
