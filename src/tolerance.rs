/// Default tolerance used by near-zero and near-equality checks.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Absolute tolerance for floating point comparisons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance(pub f64);

impl Tolerance {
    pub fn new(epsilon: f64) -> Self {
        Self(epsilon)
    }

    pub fn epsilon(self) -> f64 {
        self.0
    }

    /// Check whether `val` is strictly closer to zero than the tolerance.
    pub fn nearly_zero(self, val: f64) -> bool {
        val.abs() < self.0
    }

    /// Check whether `a` and `b` differ by strictly less than the tolerance.
    pub fn nearly_equal(self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self(DEFAULT_EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_epsilon() {
        assert_eq!(Tolerance::default().epsilon(), 1e-6);
    }

    #[test]
    fn comparisons_are_strict() {
        let tol = Tolerance::new(0.5);
        assert!(tol.nearly_zero(0.499));
        assert!(tol.nearly_zero(-0.499));
        assert!(!tol.nearly_zero(0.5));
        assert!(tol.nearly_equal(1.0, 1.25));
        assert!(!tol.nearly_equal(1.0, 2.0));
    }

    #[test]
    fn tiny_values_are_nearly_zero() {
        let tol = Tolerance::default();
        assert!(tol.nearly_zero(1e-9));
        assert!(!tol.nearly_zero(1e-3));
        assert!(!tol.nearly_zero(f64::NAN));
    }
}
