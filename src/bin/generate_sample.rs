use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Duration;

use anyhow::{Context, Result};

use bench_plot::config::{SURVIVAL_LOG, TIMING_LOG};

/// Primitive counts the benchmark harness sweeps over.
const SIZES: [u64; 16] = [
    10, 20, 50, 100, 200, 500, 1000, 2000, 3000, 4000, 5000, 6000, 7000, 8000, 9000, 10000,
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Multiplicative jitter in `[1 - amount, 1 + amount)`.
    fn jitter(&mut self, amount: f64) -> f64 {
        1.0 + amount * (2.0 * self.next_f64() - 1.0)
    }
}

/// Nanoseconds per candidate pair for each method, and whether the cost
/// grows with all pairs (narrow phase only) or with the broad-phase survivors.
const METHODS: [(&str, f64, bool); 6] = [
    ("serial_parry_narrow", 900.0, true),
    ("serial_our_narrow", 650.0, true),
    ("parallel_parry_narrow", 110.0, true),
    ("parallel_our_narrow", 80.0, true),
    ("serial_double", 700.0, false),
    ("parallel_double", 95.0, false),
];

fn all_pairs(n: u64) -> u64 {
    n * (n - 1) / 2
}

/// Fraction of pairs a BVH broad phase lets through for `n` primitives in a
/// fixed volume.
fn survival(n: u64) -> f64 {
    (30.0 / n as f64).min(0.9)
}

/// The timing log, formatted the way `Duration`'s `Debug` prints.
fn write_timing(out: &mut impl Write, rng: &mut SimpleRng) -> Result<()> {
    for n in SIZES {
        writeln!(out, "n={n}")?;
        let pairs = all_pairs(n) as f64;
        for (name, ns_per_pair, narrow_only) in METHODS {
            let work = if narrow_only {
                pairs
            } else {
                // Broad phase cost plus the surviving pairs.
                n as f64 * (n as f64).log2() * 20.0 + pairs * survival(n)
            };
            let nanos = (work * ns_per_pair * rng.jitter(0.1)).max(1.0);
            writeln!(out, "{name}={:?}", Duration::from_nanos(nanos as u64))?;
        }
    }
    Ok(())
}

/// The broad-phase log. `# pairs_to_narrow` is printed once per BVH leaf
/// batch; only the first line of each group carries the total.
fn write_survival(out: &mut impl Write, rng: &mut SimpleRng) -> Result<()> {
    for n in SIZES {
        writeln!(out, "n={n}")?;
        let pairs = all_pairs(n);
        writeln!(out, "#pairs={pairs}")?;
        let survivors = ((pairs as f64) * survival(n) * rng.jitter(0.05)) as u64;
        let survivors = survivors.min(pairs);
        writeln!(out, "# pairs_to_narrow={survivors}")?;
        for batch in 1..=3 {
            writeln!(out, "# pairs_to_narrow={}", survivors / (batch + 1))?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let file = File::create(TIMING_LOG).with_context(|| format!("creating {TIMING_LOG}"))?;
    let mut out = BufWriter::new(file);
    write_timing(&mut out, &mut rng)?;
    out.flush()?;

    let file = File::create(SURVIVAL_LOG).with_context(|| format!("creating {SURVIVAL_LOG}"))?;
    let mut out = BufWriter::new(file);
    write_survival(&mut out, &mut rng)?;
    out.flush()?;

    println!(
        "Wrote {} groups to {TIMING_LOG} and {SURVIVAL_LOG}",
        SIZES.len()
    );
    Ok(())
}
