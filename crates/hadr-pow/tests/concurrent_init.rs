//! Runs as its own test binary so nothing touches the shared tables before the
//! threads below race for them.

use std::sync::Barrier;

use hadr_pow::bounds::{MAX_ENERGY_POWER, MAX_Z, MAX_Z_FACT};
use hadr_pow::PowTables;

const THREADS: usize = 8;

/// Every table entry as seen by the calling thread, plus the instance address.
fn snapshot() -> (usize, Vec<u64>) {
    let t = PowTables::instance();

    let mut values = Vec::new();
    for z in 0..MAX_Z {
        values.push(t.z13(z));
        values.push(t.try_log_z(z).unwrap_or(-1.0));
        values.push(t.log_factorial(z));
    }
    for z in 0..MAX_Z_FACT {
        values.push(t.factorial(z));
        values.push(t.exp_half(z));
    }
    for i in 0..=MAX_ENERGY_POWER {
        values.push(t.energy_power(i));
        values.push(t.log_energy_power(i));
        values.push(t.log_one_plus_fifth(i));
    }
    values.extend([t.max_a(), t.max_a2(), t.max_a_exp()]);

    (
        t as *const PowTables as usize,
        values.into_iter().map(f64::to_bits).collect(),
    )
}

#[test]
fn concurrent_first_access_builds_once() {
    assert_eq!(PowTables::build_count(), 0);

    let barrier = Barrier::new(THREADS);
    let snapshots = std::thread::scope(|scope| {
        let handles = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    snapshot()
                })
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>()
    });

    assert_eq!(PowTables::build_count(), 1);

    let (address, values) = &snapshots[0];
    assert_eq!(values.len(), 3 * MAX_Z + 2 * MAX_Z_FACT + 3 * (MAX_ENERGY_POWER + 1) + 3);
    assert!(values.iter().all(|bits| f64::from_bits(*bits).is_finite()));
    for (other_address, other_values) in &snapshots[1..] {
        assert_eq!(other_address, address);
        assert_eq!(other_values, values);
    }

    let t = PowTables::instance();
    assert_eq!(
        t.log_factorial(MAX_Z - 1),
        t.log_factorial(MAX_Z - 2) + t.log_z(MAX_Z - 1)
    );
}
