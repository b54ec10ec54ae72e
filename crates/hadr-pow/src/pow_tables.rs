use std::sync::{
    atomic::{AtomicUsize, Ordering},
    OnceLock,
};

use hadr_time::Timer;

use crate::bounds::{ENERGY_BASE, MAX_A, MAX_A2, MAX_A_EXP, MAX_ENERGY_POWER, MAX_Z, MAX_Z_FACT};
use crate::error::{PowTableError, PowTableResult};
use crate::math::{pow_n, ONE_THIRD};
use crate::table::IndexTable;

static POW_TABLES: OnceLock<PowTables> = OnceLock::new();
static BUILD_COUNT: AtomicUsize = AtomicUsize::new(0);

/// Process-wide tables replacing transcendental calls on small integer arguments.
///
/// Obtained through [`PowTables::instance`], which builds the tables on first use.
/// Nothing is mutated afterwards, so any number of threads may read concurrently.
#[derive(Debug)]
pub struct PowTables {
    z13: IndexTable,
    log_z: IndexTable,
    log_factorial: IndexTable,
    factorial: IndexTable,
    exp_half: IndexTable,

    energy: IndexTable,
    log_energy: IndexTable,
    log_fifth: IndexTable,

    max_a: f64,
    max_a2: f64,
    max_a_exp: f64,
}

impl PowTables {
    pub fn instance() -> &'static Self {
        POW_TABLES.get_or_init(|| {
            BUILD_COUNT.fetch_add(1, Ordering::Relaxed);
            Self::build()
        })
    }

    fn build() -> Self {
        puffin::profile_function!();
        let timer = Timer::new();

        let energy = IndexTable::new("energy", MAX_ENERGY_POWER + 1, 1.0, |i| {
            pow_n(ENERGY_BASE, i as i32)
        });
        let log_energy = IndexTable::new("log energy", MAX_ENERGY_POWER + 1, 0.0, |i| {
            pow_n(ENERGY_BASE, i as i32).ln()
        });
        let log_fifth = IndexTable::new("log fifth", MAX_ENERGY_POWER + 1, 0.0, |i| {
            (1.0 + i as f64 * 0.2).ln()
        });

        let z13 = IndexTable::new("cube root", MAX_Z, 0.0, |i| (i as f64).powf(ONE_THIRD));
        let log_z = IndexTable::new("log", MAX_Z, 0.0, |i| (i as f64).ln()).with_reserved_zero();

        // Running product and running log sum, both carried across indices.
        let mut factorial = vec![0.0; MAX_Z_FACT];
        let mut exp_half = vec![0.0; MAX_Z_FACT];
        let mut log_factorial = vec![0.0; MAX_Z];
        factorial[0] = 1.0;
        exp_half[0] = 1.0;

        let mut f = 1.0;
        let mut log_f = 0.0;
        for i in 1..MAX_Z {
            let x = i as f64;
            if i < MAX_Z_FACT {
                f *= x;
                factorial[i] = f;
                exp_half[i] = (0.5 * x).exp();
            }
            log_f += log_z.at(i);
            log_factorial[i] = log_f;
        }

        log::debug!(
            "Built power tables in {:.3} ms ({} integer entries, {} factorials).",
            timer.elapsed_ms(),
            MAX_Z,
            MAX_Z_FACT
        );

        Self {
            z13,
            log_z,
            log_factorial: IndexTable::from_values("log factorial", log_factorial),
            factorial: IndexTable::from_values("factorial", factorial),
            exp_half: IndexTable::from_values("half exponent", exp_half),
            energy,
            log_energy,
            log_fifth,
            max_a: MAX_A,
            max_a2: MAX_A2,
            max_a_exp: MAX_A_EXP,
        }
    }

    /// Number of times the shared instance has been built. Never exceeds one.
    pub fn build_count() -> usize {
        BUILD_COUNT.load(Ordering::Relaxed)
    }

    /// `z^(1/3)` for `z` in `[0, MAX_Z)`.
    ///
    /// # Panics
    /// When `z` is out of range.
    #[inline]
    #[track_caller]
    pub fn z13(&self, z: usize) -> f64 {
        fatal(self.try_z13(z))
    }

    #[inline]
    pub fn try_z13(&self, z: usize) -> PowTableResult<f64> {
        self.z13.get(z)
    }

    #[inline]
    #[track_caller]
    pub fn z23(&self, z: usize) -> f64 {
        let x = self.z13(z);
        x * x
    }

    /// `ln(z)` for `z` in `[1, MAX_Z)`.
    ///
    /// # Panics
    /// When `z` is zero or out of range.
    #[inline]
    #[track_caller]
    pub fn log_z(&self, z: usize) -> f64 {
        fatal(self.try_log_z(z))
    }

    #[inline]
    pub fn try_log_z(&self, z: usize) -> PowTableResult<f64> {
        self.log_z.get(z)
    }

    #[inline]
    #[track_caller]
    pub fn log10_z(&self, z: usize) -> f64 {
        self.log_z(z) / self.log_z.at(10)
    }

    /// `ln(z!)` for `z` in `[0, MAX_Z)`, valid well past where `z!` overflows.
    ///
    /// # Panics
    /// When `z` is out of range.
    #[inline]
    #[track_caller]
    pub fn log_factorial(&self, z: usize) -> f64 {
        fatal(self.try_log_factorial(z))
    }

    #[inline]
    pub fn try_log_factorial(&self, z: usize) -> PowTableResult<f64> {
        self.log_factorial.get(z)
    }

    /// `z!` for `z` in `[0, MAX_Z_FACT)`.
    ///
    /// # Panics
    /// When `z` is out of range.
    #[inline]
    #[track_caller]
    pub fn factorial(&self, z: usize) -> f64 {
        fatal(self.try_factorial(z))
    }

    #[inline]
    pub fn try_factorial(&self, z: usize) -> PowTableResult<f64> {
        self.factorial.get(z)
    }

    /// `e^(0.5 i)` for `i` in `[0, MAX_Z_FACT)`.
    ///
    /// # Panics
    /// When `i` is out of range.
    #[inline]
    #[track_caller]
    pub fn exp_half(&self, i: usize) -> f64 {
        fatal(self.try_exp_half(i))
    }

    #[inline]
    pub fn try_exp_half(&self, i: usize) -> PowTableResult<f64> {
        self.exp_half.get(i)
    }

    /// `500^i` for `i` in `[0, MAX_ENERGY_POWER]`.
    #[inline]
    #[track_caller]
    pub fn energy_power(&self, i: usize) -> f64 {
        fatal(self.energy.get(i))
    }

    #[inline]
    #[track_caller]
    pub fn log_energy_power(&self, i: usize) -> f64 {
        fatal(self.log_energy.get(i))
    }

    /// `ln(1 + 0.2 i)` for `i` in `[0, MAX_ENERGY_POWER]`.
    #[inline]
    #[track_caller]
    pub fn log_one_plus_fifth(&self, i: usize) -> f64 {
        fatal(self.log_fifth.get(i))
    }

    pub fn max_a(&self) -> f64 {
        self.max_a
    }

    pub fn max_a2(&self) -> f64 {
        self.max_a2
    }

    pub fn max_a_exp(&self) -> f64 {
        self.max_a_exp
    }

    /// Cube root of a real argument, interpolated around the nearest integer entry.
    /// Non-positive arguments give `0`.
    pub fn a13(&self, a: f64) -> f64 {
        if a <= 0.0 {
            return 0.0;
        }

        let b = if a >= 1.0 { a } else { 1.0 / a };
        let res = if b <= self.max_a {
            let i = (b + 0.5) as usize;
            let x = (b / i as f64 - 1.0) * ONE_THIRD;
            self.z13.at(i) * (1.0 + x - x * x * (1.0 - 5.0 * ONE_THIRD * x))
        } else {
            (b.ln() * ONE_THIRD).exp()
        };

        if a < 1.0 {
            1.0 / res
        } else {
            res
        }
    }

    pub fn a23(&self, a: f64) -> f64 {
        let x = self.a13(a);
        x * x
    }

    /// Natural log of a real argument, interpolated around the nearest integer entry.
    ///
    /// # Panics
    /// When `a` is not strictly positive.
    #[track_caller]
    pub fn log_a(&self, a: f64) -> f64 {
        fatal(self.try_log_a(a))
    }

    pub fn try_log_a(&self, a: f64) -> PowTableResult<f64> {
        if a <= 0.0 || a.is_nan() {
            return Err(PowTableError::NonPositiveArgument(a));
        }
        Ok(self.log_positive(a))
    }

    fn log_positive(&self, a: f64) -> f64 {
        let b = if a >= 1.0 { a } else { 1.0 / a };
        if b == 1.0 {
            return 0.0;
        }

        let res = if b <= self.max_a2 {
            // Nearest point of the 1 + 0.2 i grid, capped at its last entry.
            let steps = MAX_ENERGY_POWER as f64;
            let i = ((steps * (b - 1.0) + 0.5) as usize).min(MAX_ENERGY_POWER);
            self.log_fifth.at(i) + log_ratio(b / (1.0 + i as f64 / steps))
        } else if b <= self.max_a {
            let i = (b + 0.5) as usize;
            self.log_z.at(i) + log_ratio(b / i as f64)
        } else {
            b.ln()
        };

        if a < 1.0 {
            -res
        } else {
            res
        }
    }

    /// Natural log over a wider range than [`PowTables::log_a`], rescaling by powers of 500.
    ///
    /// # Panics
    /// When `x` is not strictly positive.
    #[track_caller]
    pub fn log_x(&self, x: f64) -> f64 {
        fatal(self.try_log_x(x))
    }

    pub fn try_log_x(&self, x: f64) -> PowTableResult<f64> {
        if x <= 0.0 || x.is_nan() {
            return Err(PowTableError::NonPositiveArgument(x));
        }

        let b = if x >= 1.0 { x } else { 1.0 / x };
        let res = if b <= self.max_a {
            self.log_positive(b)
        } else if b <= self.energy.at(2) {
            self.log_energy.at(1) + self.log_positive(b / self.energy.at(1))
        } else if b <= self.energy.at(3) {
            self.log_energy.at(2) + self.log_positive(b / self.energy.at(2))
        } else {
            b.ln()
        };

        Ok(if x < 1.0 { -res } else { res })
    }

    #[track_caller]
    pub fn log10_a(&self, a: f64) -> f64 {
        self.log_a(a) / self.log_z.at(10)
    }

    /// `e^a`, expanded around the nearest half-integer entry.
    pub fn exp_a(&self, a: f64) -> f64 {
        let b = a.abs();
        let res = if b <= self.max_a_exp {
            let i = (2.0 * b + 0.5) as usize;
            let x = b - i as f64 * 0.5;
            self.exp_half.at(i) * (1.0 + x * (1.0 + 0.5 * (1.0 + ONE_THIRD * x) * x))
        } else {
            b.exp()
        };

        if a < 0.0 {
            1.0 / res
        } else {
            res
        }
    }

    /// `z^y` for an integer base.
    ///
    /// # Panics
    /// When `z` is zero or out of range.
    #[inline]
    #[track_caller]
    pub fn pow_z(&self, z: usize, y: f64) -> f64 {
        (y * self.log_z(z)).exp()
    }

    /// `a^y` for a real base. A zero base gives `0`.
    ///
    /// # Panics
    /// When `a` is negative.
    #[track_caller]
    pub fn pow_a(&self, a: f64, y: f64) -> f64 {
        if a == 0.0 {
            return 0.0;
        }
        (y * self.log_a(a)).exp()
    }
}

/// `ln(r)` for `r` close to one, from `2 atanh((r - 1) / (r + 1))`.
/// The nearest-entry ratios stay within `[0.8, 1.25]`, where three terms reach `1e-7`.
#[inline]
fn log_ratio(r: f64) -> f64 {
    let y = (r - 1.0) / (r + 1.0);
    let y2 = y * y;
    2.0 * y * (1.0 + y2 * (ONE_THIRD + 0.2 * y2))
}

#[inline]
#[track_caller]
fn fatal(result: PowTableResult<f64>) -> f64 {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}
