use std::fmt;

use hadr::hadr_pow::bounds::{MAX_Z, MAX_Z_FACT};
use hadr::hadr_pow::PowTables;

/// Energy units relative to MeV.
const ENERGY_UNITS: &[(&str, f64)] = &[
    ("eV", 1e-6),
    ("keV", 1e-3),
    ("MeV", 1.0),
    ("GeV", 1e3),
    ("TeV", 1e6),
];

/// Length units relative to mm.
const LENGTH_UNITS: &[(&str, f64)] = &[
    ("nm", 1e-6),
    ("um", 1e-3),
    ("mm", 1.0),
    ("cm", 10.0),
    ("m", 1e3),
    ("km", 1e6),
];

/// Significant digits of the end-of-run report.
const REPORT_DIGITS: usize = 5;

/// `value` rounded to `digits` significant digits, trailing zeros dropped.
/// Switches to exponent notation outside `[1e-5, 10^digits)`.
pub fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return value.to_string();
    }

    let digits = digits.max(1);
    let exponent = value.abs().log10().floor() as i32;
    if exponent < -5 || exponent >= digits as i32 {
        let formatted = format!("{:.*e}", digits - 1, value);
        return match formatted.split_once('e') {
            Some((mantissa, exp)) => format!("{}e{}", trim_fraction(mantissa), exp),
            None => formatted,
        };
    }

    let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
    trim_fraction(&format!("{:.*}", decimals, value)).to_owned()
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Picks the largest unit that keeps the magnitude at or above one.
pub fn best_unit(value: f64, units: &[(&'static str, f64)], digits: usize) -> String {
    let magnitude = value.abs();
    let (name, factor) = units
        .iter()
        .rev()
        .find(|(_, factor)| magnitude >= *factor)
        .or_else(|| units.first())
        .copied()
        .unwrap_or(("", 1.0));

    format!("{} {}", format_significant(value / factor, digits), name)
}

/// What a finished run reports about its setup.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub events: u32,
    pub particle: Option<String>,
    pub energy_mev: f64,
    pub thickness_mm: f64,
    pub material: String,
    pub density_g_cm3: f64,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(particle) = self.particle.as_deref().filter(|_| self.events > 0) else {
            return Ok(());
        };

        write!(
            f,
            "\n The run is of {} {} of {} through {} of {} (density: {} g/cm3)",
            self.events,
            particle,
            best_unit(self.energy_mev, ENERGY_UNITS, REPORT_DIGITS),
            best_unit(self.thickness_mm, LENGTH_UNITS, REPORT_DIGITS),
            self.material,
            format_significant(self.density_g_cm3, REPORT_DIGITS),
        )
    }
}

/// Table values at a caller chosen set of indices.
pub struct TableReport<'a> {
    pub tables: &'a PowTables,
    pub indices: &'a [usize],
}

impl fmt::Display for TableReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.tables;
        writeln!(
            f,
            "\n Power tables: max_a {:.2}, max_a2 {:.2}, max_a_exp {:.2}",
            t.max_a(),
            t.max_a2(),
            t.max_a_exp()
        )?;

        for &z in self.indices {
            if z >= MAX_Z {
                writeln!(f, "  Z = {:>3}: outside tables (bound {})", z, MAX_Z)?;
                continue;
            }

            let log = match t.try_log_z(z) {
                Ok(value) => format!("{:.6}", value),
                Err(_) => "reserved".to_owned(),
            };
            write!(
                f,
                "  Z = {:>3}: Z^1/3 {:.6}  ln Z {}  ln Z! {:.6}",
                z,
                t.z13(z),
                log,
                t.log_factorial(z)
            )?;
            if z < MAX_Z_FACT {
                write!(f, "  Z! {:.6e}  e^(Z/2) {:.6e}", t.factorial(z), t.exp_half(z))?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn significant_digits_drop_trailing_zeros() {
        assert_eq!(format_significant(2.0, 5), "2");
        assert_eq!(format_significant(1.23456789, 5), "1.2346");
        assert_eq!(format_significant(-0.5, 5), "-0.5");
        assert_eq!(format_significant(12345.0, 5), "12345");
        assert_eq!(format_significant(123456.0, 5), "1.2346e5");
        assert_eq!(format_significant(0.000012345, 5), "0.000012345");
        assert_eq!(format_significant(1e-7, 5), "1e-7");
        assert_eq!(format_significant(0.0, 5), "0");
    }

    #[test]
    fn best_unit_scales_to_readable_magnitude() {
        assert_eq!(best_unit(2.0, ENERGY_UNITS, 5), "2 MeV");
        assert_eq!(best_unit(0.025, ENERGY_UNITS, 5), "25 keV");
        assert_eq!(best_unit(14.12345678, ENERGY_UNITS, 5), "14.123 MeV");
        assert_eq!(best_unit(1500.0, LENGTH_UNITS, 5), "1.5 m");
        assert_eq!(best_unit(1e-9, LENGTH_UNITS, 5), "0.001 nm");
    }

    #[test]
    fn summary_needs_events_and_primary() {
        let mut summary = RunSummary {
            events: 1000,
            particle: Some("neutron".to_owned()),
            energy_mev: 2.0,
            thickness_mm: 1000.0,
            material: "Water".to_owned(),
            density_g_cm3: 1.0,
        };
        assert_eq!(
            summary.to_string(),
            "\n The run is of 1000 neutron of 2 MeV through 1 m of Water (density: 1 g/cm3)"
        );

        summary.events = 0;
        assert!(summary.to_string().is_empty());
    }

    #[test]
    fn table_report_marks_reserved_and_unbounded_indices() {
        let indices = [0, 6, 200, MAX_Z];
        let text = TableReport {
            tables: PowTables::instance(),
            indices: &indices,
        }
        .to_string();

        assert!(text.contains("Z =   0: Z^1/3 0.000000  ln Z reserved"));
        assert!(text.contains("Z =   6:"));
        assert!(text.contains("Z! 7.200000e2"));
        assert!(text.contains(&format!("outside tables (bound {})", MAX_Z)));
        assert_eq!(text.matches("  Z! ").count(), 2);
    }
}
