//! Fixed bounds of the precomputed tables.

/// Exclusive upper bound of the per-integer tables (cube roots, logs, log-factorials).
pub const MAX_Z: usize = 512;

/// Exclusive upper bound of the exact factorial and `e^(0.5 i)` tables.
/// `170!` no longer fits in an `f64`.
pub const MAX_Z_FACT: usize = 170;

/// Inclusive upper bound of the auxiliary `500^i` tables.
pub const MAX_ENERGY_POWER: usize = 5;

/// Base of the auxiliary energy tables.
pub const ENERGY_BASE: f64 = 500.0;

const _: () = assert!(MAX_Z_FACT <= MAX_Z);

/// Largest real argument served by the interpolated cube root and log.
pub const MAX_A: f64 = MAX_Z as f64 - 0.6;

pub const MAX_A2: f64 = 1.25 + MAX_ENERGY_POWER as f64 * 0.2;

/// Largest magnitude served by the interpolated exponential.
pub const MAX_A_EXP: f64 = MAX_Z_FACT as f64 * 0.5 - 0.76;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolation_bounds_stay_inside_tables() {
        // Rounding the largest accepted argument must still address a valid entry.
        assert!(((MAX_A + 0.5) as usize) < MAX_Z);
        assert!(((2.0 * MAX_A_EXP) as usize) < MAX_Z_FACT);
        assert_eq!(MAX_A2, 2.25);
    }
}
