/// Rounds a value to two decimal places: `trunc(x * 100 + 0.5) / 100`.
///
/// Round-half-up toward positive infinity for non-negative inputs. For
/// negative inputs the `+0.5` before truncation biases rounding toward zero
/// instead of away from it; downstream consumers depend on the exact
/// behavior, so it is preserved as-is.
pub fn round2(value: f64) -> f64 {
    (value * 1e2 + 0.5).trunc() * 1e-2
}
