//! Interval arithmetic for ray parameter ranges.
//!
//! Provides closed intervals [min, max] used for ray t-values and color clamping.

/// Closed interval [min, max] for range checking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Minimum value of the interval
    pub min: f64,
    /// Maximum value of the interval
    pub max: f64,
}

impl Interval {
    /// Empty interval (min > max), contains nothing
    pub const EMPTY: Interval = Interval {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    /// Interval containing every real number
    pub const UNIVERSE: Interval = Interval {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    /// Create a new interval with given min and max values
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the interval
    pub fn size(&self) -> f64 {
        self.max - self.min
    }

    /// Check if the interval contains the given value (inclusive bounds)
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// Check if the interval surrounds the given value (exclusive bounds)
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    /// Clamp the given value to be within this interval's bounds.
    ///
    /// NaN clamps to `min`.
    pub fn clamp(&self, x: f64) -> f64 {
        if x.is_nan() || x < self.min {
            self.min
        } else if x > self.max {
            self.max
        } else {
            x
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive_and_surrounds_is_not() {
        let i = Interval::new(0.0, 1.0);
        assert!(i.contains(0.0) && i.contains(1.0));
        assert!(!i.surrounds(0.0) && !i.surrounds(1.0));
        assert!(i.surrounds(0.5));
        assert!(!i.contains(1.0001));
    }

    #[test]
    fn empty_and_universe() {
        assert!(!Interval::EMPTY.contains(0.0));
        assert!(Interval::UNIVERSE.contains(-1e300));
        assert_eq!(Interval::new(2.0, 5.0).size(), 3.0);
    }

    #[test]
    fn clamp_handles_out_of_range_and_nan() {
        let i = Interval::new(0.0, 1.0);
        assert_eq!(i.clamp(-3.0), 0.0);
        assert_eq!(i.clamp(3.0), 1.0);
        assert_eq!(i.clamp(0.25), 0.25);
        assert_eq!(i.clamp(f64::NAN), 0.0);
    }
}
