//! Numeric primitives shared by the estimators.
//!
//! Every helper maps degenerate input to a defined sentinel instead of NaN.

/// Base-2 logarithm; non-positive input yields `0.0`.
pub fn log2(value: f64) -> f64 {
    if value <= 0.0 || value.is_nan() {
        return 0.0;
    }
    value.log2()
}

/// `base` raised to `exponent`; a negative exponent yields `0.0`.
pub fn pow(base: f64, exponent: f64) -> f64 {
    if exponent < 0.0 {
        return 0.0;
    }
    base.powf(exponent)
}

/// Clamps `value` into `[min, max]`. NaN collapses to `min`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}
