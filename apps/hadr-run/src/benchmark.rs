use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};

use hadr::hadr_time::Timer;

/// Element-wise integer addition used to exercise a numeric accelerator.
pub trait ArraySumBenchmark: Send + Sync {
    fn name(&self) -> &str;

    /// Adds `a` and `b` element by element, wrapping on overflow.
    ///
    /// # Panics
    /// When the slices differ in length.
    fn sum_arrays(&self, a: &[i32], b: &[i32]) -> Vec<i32>;
}

/// Runs the addition on the rayon thread pool.
#[derive(Default)]
pub struct RayonArraySum;

impl ArraySumBenchmark for RayonArraySum {
    fn name(&self) -> &str {
        "rayon"
    }

    fn sum_arrays(&self, a: &[i32], b: &[i32]) -> Vec<i32> {
        assert_eq!(a.len(), b.len(), "array sum operands differ in length");
        a.par_iter()
            .zip(b.par_iter())
            .map(|(x, y)| x.wrapping_add(*y))
            .collect()
    }
}

pub struct BenchmarkResult {
    pub a: Vec<i32>,
    pub b: Vec<i32>,
    pub sum: Vec<i32>,
    pub seconds: f64,
}

/// Fast xorshift generator, good enough for benchmark inputs.
fn xor_shift_u32(state: &mut u32) -> u32 {
    *state ^= *state << 13;
    *state ^= *state >> 17;
    *state ^= *state << 5;
    *state
}

/// `len` integers in `[0, 100)`. A zero seed would lock xorshift at zero, so it is bumped.
pub fn random_operands(len: usize, seed: u32) -> Vec<i32> {
    let mut state = seed.max(1);
    (0..len)
        .map(|_| (xor_shift_u32(&mut state) % 100) as i32)
        .collect()
}

pub fn run(benchmark: &dyn ArraySumBenchmark, len: usize, seed: u32) -> BenchmarkResult {
    let a = random_operands(len, seed);
    let b = random_operands(len, seed.wrapping_mul(747796405).wrapping_add(1));

    let timer = Timer::new();
    let sum = benchmark.sum_arrays(&a, &b);
    let seconds = timer.elapsed();

    log::debug!(
        "{} array sum over {} elements took {:.6} s",
        benchmark.name(),
        len,
        seconds
    );

    BenchmarkResult { a, b, sum, seconds }
}

fn format_array(values: &[i32]) -> String {
    let items = values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", items)
}

pub fn format_result(name: &str, result: &BenchmarkResult) -> String {
    let banner = format!(
        "***************************** {} *****************************",
        name
    );
    format!(
        "\n{banner}\nSum of {}\nand of {}\n Array {}\nComputation done in {} s\n{banner}\n",
        format_array(&result.a),
        format_array(&result.b),
        format_array(&result.sum),
        result.seconds,
    )
}
