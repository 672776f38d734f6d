const POW10: [f64; 19] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9,
    1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16, 1e17, 1e18,
];

/// Rounds to `dp` decimal places, half-to-even, matching the reference
/// engine's float formatting for `ToVectorString`.
#[inline(always)]
pub fn round_dp(value: f64, dp: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    if dp < POW10.len() {
        let scale = POW10[dp];
        (value * scale).round_ties_even() / scale
    } else {
        let scale = 10_f64.powi(dp as i32);
        (value * scale).round_ties_even() / scale
    }
}

/// `lrint`: round-half-to-even to the nearest integer, as an `f64`.
/// Non-finite input rounds to `0.0` rather than propagating NaN/inf into a
/// row index.
#[inline(always)]
pub fn lrint_f64(v: f64) -> f64 {
    if !v.is_finite() { 0.0 } else { v.round_ties_even() }
}
