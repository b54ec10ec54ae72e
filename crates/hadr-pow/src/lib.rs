//! Precomputed powers, logarithms, cube roots and factorials over a bounded
//! integer domain, shared by every thread of a transport simulation.
//!
//! ```
//! use hadr_pow::PowTables;
//!
//! let tables = PowTables::instance();
//! assert_eq!(tables.factorial(5), 120.0);
//! assert!((tables.a13(26.0) - 26f64.cbrt()).abs() < 1e-6);
//! ```

pub mod bounds;
mod error;
pub mod math;
mod pow_tables;
mod table;

pub use error::{PowTableError, PowTableResult};
pub use math::pow_n;
pub use pow_tables::PowTables;
pub use table::IndexTable;
