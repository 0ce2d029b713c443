use crate::Float;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A scalar box constraint applied to every dimension of a continuous search space.
///
/// Both the particle positions at initialization and the velocity components after every update
/// are confined to `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    /// The lower edge of the box.
    pub lower: Float,
    /// The upper edge of the box.
    pub upper: Float,
}

impl Bound {
    /// Create a new [`Bound`] from its edges.
    pub const fn new(lower: Float, upper: Float) -> Self {
        Self { lower, upper }
    }
    /// Checks whether the given `value` lies inside the bound.
    pub fn contains(&self, value: Float) -> bool {
        value >= self.lower && value <= self.upper
    }
    /// Clamps the given `value` into the bound.
    pub fn clamp(&self, value: Float) -> Float {
        value.clamp(self.lower, self.upper)
    }
    /// Returns `true` if the edges are finite and ordered.
    pub fn is_valid(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite() && self.lower < self.upper
    }
}

impl Default for Bound {
    fn default() -> Self {
        Self {
            lower: -1.0,
            upper: 1.0,
        }
    }
}

impl From<(Float, Float)> for Bound {
    fn from(value: (Float, Float)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lower, self.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_and_clamp() {
        let b = Bound::new(-5.0, 5.0);
        assert!(b.contains(0.0));
        assert!(b.contains(-5.0));
        assert!(!b.contains(5.1));
        assert_eq!(b.clamp(7.3), 5.0);
        assert_eq!(b.clamp(-9.0), -5.0);
        assert_eq!(b.clamp(1.5), 1.5);
    }

    #[test]
    fn test_validity() {
        assert!(Bound::new(-1.0, 1.0).is_valid());
        assert!(!Bound::new(1.0, -1.0).is_valid());
        assert!(!Bound::new(0.0, Float::INFINITY).is_valid());
        assert!(Bound::default().is_valid());
    }

    #[test]
    fn test_from_tuple_and_display() {
        let b: Bound = (-2.0, 3.0).into();
        assert_eq!(format!("{}", b), "(-2, 3)");
    }
}
