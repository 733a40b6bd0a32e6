/// Tolerance for every floating-point comparison in the crate.
pub const EPSILON: f64 = 1e-5;

/// True if a and b differ by less than [`EPSILON`].
pub fn equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}
