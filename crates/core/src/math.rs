//! Numeric helpers used by the sync transform and the summary renderer.

use rand::Rng;

/// Divides `a` by `b`, returning 0 when the divisor is zero.
pub fn safe_divide(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        0.0
    } else {
        a / b
    }
}

/// Uniformly samples an integer from `[min, max]` inclusive.
pub fn random_between(min: i64, max: i64) -> i64 {
    rand::thread_rng().gen_range(min..=max)
}

/// Rounds to `places` decimal places.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
