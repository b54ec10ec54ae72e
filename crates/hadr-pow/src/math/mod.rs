pub const ONE_THIRD: f64 = 1.0 / 3.0;

/// Largest exponent magnitude evaluated by repeated multiplication in [`pow_n`].
/// Beyond it the multiplication chain loses both its speed advantage and accuracy
/// against `powf`.
pub const FAST_POW_MAX_EXPONENT: u32 = 8;

/// Integer power of `x`, multiplying for small exponents.
///
/// `x == 0` yields `0` for every exponent, negative ones included.
#[inline]
pub fn pow_n(x: f64, n: i32) -> f64 {
    if x == 0.0 {
        return 0.0;
    }
    if n.unsigned_abs() > FAST_POW_MAX_EXPONENT {
        return x.powf(n as f64);
    }

    let base = if n >= 0 { x } else { 1.0 / x };
    let mut res = 1.0;
    for _ in 0..n.unsigned_abs() {
        res *= base;
    }
    res
}
