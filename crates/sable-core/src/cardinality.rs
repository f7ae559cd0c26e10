//! Occurrence intervals for grammar elements.
//!
//! Every parser element, tree element and transformation element carries a
//! `[lower, upper]` interval. The lower bound is always finite; the upper
//! bound may be unbounded.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound of a cardinality interval.
///
/// `Finite` sorts before `Infinite`, so the derived ordering is the numeric one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bound {
    Finite(u32),
    Infinite,
}

impl Bound {
    pub fn is_infinite(self) -> bool {
        matches!(self, Self::Infinite)
    }

    pub fn finite(self) -> Option<u32> {
        match self {
            Self::Finite(n) => Some(n),
            Self::Infinite => None,
        }
    }

    fn add(self, other: Bound) -> Bound {
        match (self, other) {
            (Self::Finite(a), Self::Finite(b)) => Self::Finite(a.saturating_add(b)),
            _ => Self::Infinite,
        }
    }

    fn mul(self, other: Bound) -> Bound {
        match (self, other) {
            (Self::Finite(0), _) | (_, Self::Finite(0)) => Self::Finite(0),
            (Self::Finite(a), Self::Finite(b)) => Self::Finite(a.saturating_mul(b)),
            _ => Self::Infinite,
        }
    }

    fn map_finite(self, f: impl FnOnce(u32) -> u32) -> Bound {
        match self {
            Self::Finite(n) => Self::Finite(f(n)),
            Self::Infinite => Self::Infinite,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(n) => write!(f, "{n}"),
            Self::Infinite => write!(f, "inf"),
        }
    }
}

/// Closed occurrence interval `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardinalityInterval {
    lower: u32,
    upper: Bound,
}

impl CardinalityInterval {
    pub const ZERO_ZERO: Self = Self::exactly(0);
    pub const ZERO_ONE: Self = Self {
        lower: 0,
        upper: Bound::Finite(1),
    };
    pub const ONE_ONE: Self = Self::exactly(1);
    pub const ZERO_OR_MORE: Self = Self::at_least(0);
    pub const ONE_OR_MORE: Self = Self::at_least(1);

    /// Interval `[lower, upper]`, or `None` when `lower > upper`.
    pub fn new(lower: u32, upper: Bound) -> Option<Self> {
        (Bound::Finite(lower) <= upper).then_some(Self { lower, upper })
    }

    pub const fn exactly(n: u32) -> Self {
        Self {
            lower: n,
            upper: Bound::Finite(n),
        }
    }

    pub const fn at_least(n: u32) -> Self {
        Self {
            lower: n,
            upper: Bound::Infinite,
        }
    }

    pub fn between(lower: u32, upper: u32) -> Option<Self> {
        Self::new(lower, Bound::Finite(upper))
    }

    pub fn lower(&self) -> u32 {
        self.lower
    }

    pub fn upper(&self) -> Bound {
        self.upper
    }

    pub fn is_included_in(&self, other: &CardinalityInterval) -> bool {
        other.lower <= self.lower && self.upper <= other.upper
    }

    /// Whether the interval denotes a single exact count.
    pub fn is_a_number(&self) -> bool {
        self.upper == Bound::Finite(self.lower)
    }

    pub fn is_exactly_one(&self) -> bool {
        *self == Self::ONE_ONE
    }

    pub fn is_at_most_one(&self) -> bool {
        self.upper <= Bound::Finite(1)
    }

    pub fn is_optional(&self) -> bool {
        self.lower == 0
    }

    /// Interval of the sum of one occurrence count from each interval.
    pub fn add(&self, other: &CardinalityInterval) -> CardinalityInterval {
        Self {
            lower: self.lower.saturating_add(other.lower),
            upper: self.upper.add(other.upper),
        }
    }

    /// Smallest interval containing both.
    pub fn union(&self, other: &CardinalityInterval) -> CardinalityInterval {
        Self {
            lower: self.lower.min(other.lower),
            upper: self.upper.max(other.upper),
        }
    }

    /// Interval of `self` repetitions of something occurring `other` times.
    pub fn compose(&self, other: &CardinalityInterval) -> CardinalityInterval {
        Self {
            lower: self.lower.saturating_mul(other.lower),
            upper: self.upper.mul(other.upper),
        }
    }

    /// Both bounds scaled by `factor`.
    pub fn scale(&self, factor: u32) -> CardinalityInterval {
        self.compose(&Self::exactly(factor))
    }

    /// Both bounds lowered by one, saturating at zero.
    pub fn predecessor(&self) -> CardinalityInterval {
        Self {
            lower: self.lower.saturating_sub(1),
            upper: self.upper.map_finite(|n| n.saturating_sub(1)),
        }
    }

    /// Number of occurrences of a single name in `(x sep x)` repeated `self` times.
    pub fn separated_count(&self) -> CardinalityInterval {
        let count = |n: u32| n.saturating_mul(2).saturating_sub(1);
        Self {
            lower: count(self.lower),
            upper: self.upper.map_finite(count),
        }
    }
}

impl fmt::Display for CardinalityInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.lower, self.upper) {
            (1, Bound::Finite(1)) => Ok(()),
            (0, Bound::Finite(1)) => write!(f, "?"),
            (0, Bound::Infinite) => write!(f, "*"),
            (1, Bound::Infinite) => write!(f, "+"),
            (n, Bound::Infinite) => write!(f, "^{n}.."),
            (n, Bound::Finite(m)) if n == m => write!(f, "^{n}"),
            (n, Bound::Finite(m)) => write!(f, "^({n}..{m})"),
        }
    }
}
