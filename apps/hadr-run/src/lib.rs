use anyhow::Result;
use clap::Parser;
use hadr::Hadr;

pub mod benchmark;
pub mod report;

use benchmark::{ArraySumBenchmark, RayonArraySum};
use report::{RunSummary, TableReport};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Number of events processed by the run
    #[arg(long, default_value_t = 1000)]
    events: u32,

    /// Primary particle name, leave empty when the run had no primary generator
    #[arg(long, default_value = "neutron")]
    particle: String,

    /// Primary energy in MeV
    #[arg(long, default_value_t = 2.0)]
    energy_mev: f64,

    /// Slab thickness in mm
    #[arg(long, default_value_t = 1000.0)]
    thickness_mm: f64,

    /// Slab material name
    #[arg(long, default_value = "Water")]
    material: String,

    /// Slab density in g/cm3
    #[arg(long, default_value_t = 1.0)]
    density: f64,

    /// Indices at which to report the power tables
    #[arg(long, value_delimiter = ',', default_values_t = [1, 6, 26, 82, 92])]
    z: Vec<usize>,

    /// Run the array-sum benchmark after the run
    #[arg(long, default_value_t = false)]
    benchmark: bool,

    /// Number of elements summed by the benchmark
    #[arg(long, default_value_t = 15)]
    array_size: usize,

    /// Seed for the benchmark operands
    #[arg(long, default_value_t = 1)]
    seed: u32,

    /// Record puffin profiling scopes and log the profiled frame after the run
    #[arg(long, default_value_t = false)]
    profile: bool,
}

impl Args {
    fn run_summary(&self) -> RunSummary {
        RunSummary {
            events: self.events,
            particle: Some(self.particle.clone()).filter(|name| !name.is_empty()),
            energy_mev: self.energy_mev,
            thickness_mm: self.thickness_mm,
            material: self.material.clone(),
            density_g_cm3: self.density,
        }
    }
}

/// Reports a finished run, then optionally hands the benchmark collaborator its arrays.
pub struct RunCompletion<'a> {
    hadr: &'a Hadr,
    benchmark: Option<Box<dyn ArraySumBenchmark>>,
}

impl<'a> RunCompletion<'a> {
    pub fn new(hadr: &'a Hadr, benchmark: Option<Box<dyn ArraySumBenchmark>>) -> Self {
        Self { hadr, benchmark }
    }

    pub fn end_of_run(
        &self,
        summary: &RunSummary,
        indices: &[usize],
        array_size: usize,
        seed: u32,
    ) -> String {
        let mut out = String::new();

        match &self.benchmark {
            Some(bench) => {
                let result = benchmark::run(bench.as_ref(), array_size, seed);
                out.push_str(&benchmark::format_result(bench.name(), &result));
            }
            None => out.push_str("\nBenchmarking is disabled.\n"),
        }

        out.push_str(&summary.to_string());
        out.push('\n');

        let report = TableReport {
            tables: self.hadr.pow_tables(),
            indices,
        };
        out.push_str(&report.to_string());

        out
    }
}

pub fn internal_main() -> Result<()> {
    let args = Args::parse();
    let hadr = Hadr::with_profiling("Hadr Run", args.profile);

    if args.array_size == 0 && args.benchmark {
        anyhow::bail!("--array-size must be at least 1 when benchmarking");
    }

    let benchmark: Option<Box<dyn ArraySumBenchmark>> = if args.benchmark {
        Some(Box::new(RayonArraySum))
    } else {
        None
    };

    let run_completion = RunCompletion::new(&hadr, benchmark);
    let output = run_completion.end_of_run(
        &args.run_summary(),
        &args.z,
        args.array_size,
        args.seed,
    );
    println!("{}", output);

    hadr.end_frame();
    log::info!("{} completed.", hadr.app_name());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults_and_index_list() {
        let args = Args::parse_from(["hadr-run", "--z", "0,13,511", "--benchmark"]);
        assert_eq!(args.z, vec![0, 13, 511]);
        assert!(args.benchmark);
        assert_eq!(args.array_size, 15);

        let summary = Args::parse_from(["hadr-run", "--particle", ""]).run_summary();
        assert!(summary.particle.is_none());
    }

    #[test]
    fn end_of_run_without_benchmark() {
        let hadr = Hadr::new("test");
        let summary = Args::parse_from(["hadr-run"]).run_summary();
        let out = RunCompletion::new(&hadr, None).end_of_run(&summary, &[26], 15, 1);

        assert!(out.contains("Benchmarking is disabled."));
        assert!(out.contains("The run is of 1000 neutron"));
        assert!(out.contains("Z =  26:"));
    }

    #[test]
    fn end_of_run_with_benchmark() {
        let hadr = Hadr::new("test");
        let summary = Args::parse_from(["hadr-run", "--events", "0"]).run_summary();
        let out = RunCompletion::new(&hadr, Some(Box::new(RayonArraySum)))
            .end_of_run(&summary, &[], 4, 9);

        assert!(out.contains("***** rayon *****"));
        assert!(!out.contains("The run is of"));
    }
}
