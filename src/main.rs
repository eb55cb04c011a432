//! Randomized cross-check of the sparse bit set against a dense reference.
//!
//! Drives both structures through the same writes, grows the sparse set part
//! way through, and verifies membership, counts, boolean algebra, subset
//! relations and iteration agree with the dense model.

use std::time::Instant;

use anyhow::{ensure, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sparse_bitset::{BitOp, BitVector, DenseBitSet, SparseBitSet};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sparse-bitset")]
#[command(about = "Cross-check the sparse bit set against a dense reference")]
struct Args {
    /// Total number of random writes
    #[arg(short = 'r', long, default_value = "10000000")]
    rounds: usize,

    /// Number of bits in the reference set
    #[arg(short = 'm', long, default_value = "12000")]
    max_bits: usize,

    /// Seed for the random number generator (random when absent)
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Log filter, e.g. "info" or "sparse_bitset=debug"
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    ensure!(args.max_bits >= 3, "--max-bits must be at least 3");
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(
        "seed {} rounds {} max bits {}",
        seed, args.rounds, args.max_bits
    );
    let mut rng = StdRng::seed_from_u64(seed);

    let start = Instant::now();
    check_writes(&mut rng, &args)?;
    check_algebra(&mut rng, args.max_bits)?;
    info!("all checks passed in {:?}", start.elapsed());
    Ok(())
}

// Writes into the low third, growth, writes over the whole range, then a
// partial clear compared against a freshly built set.
fn check_writes(rng: &mut StdRng, args: &Args) -> Result<()> {
    let max = args.max_bits;
    let mut bs = SparseBitSet::new();
    let mut reference = DenseBitSet::new(max);
    ensure!(bs.capacity() == 4032, "fresh capacity is {}", bs.capacity());

    let low = (max / 3).clamp(1, bs.capacity());
    random_writes(rng, &mut bs, &mut reference, low, args.rounds / 2);

    bs.resize(max);
    bs.set(max - 1, true);
    reference.set(max - 1, true);
    let expected_capacity = max.div_ceil(4032).max(1) * 4032;
    ensure!(
        bs.capacity() == expected_capacity,
        "capacity after resize is {}, expected {}",
        bs.capacity(),
        expected_capacity
    );

    random_writes(rng, &mut bs, &mut reference, max, args.rounds / 2);
    compare(&bs, &reference)?;
    info!(
        "{} bits set in {} data words ({} bytes)",
        bs.count(),
        bs.num_words(),
        bs.heap_bytes()
    );

    // clear the upper half and rebuild the lower half from the reference
    for i in max / 2 + 1..max {
        bs.set(i, false);
    }
    let mut bs2 = SparseBitSet::new();
    bs2.resize(max);
    ensure!(bs2.is_empty(), "resized empty set is not empty");
    for i in 0..=max / 2 {
        if reference.get(i) {
            bs2.set(i, true);
        }
    }
    ensure!(bs == bs2, "rebuilt lower half differs");
    Ok(())
}

// Boolean algebra, subset relations and iteration on two random sets.
fn check_algebra(rng: &mut StdRng, max: usize) -> Result<()> {
    let mut a = SparseBitSet::with_capacity(max);
    let mut b = SparseBitSet::with_capacity(max);
    let mut ra = DenseBitSet::new(a.capacity());
    let mut rb = DenseBitSet::new(b.capacity());
    random_writes(rng, &mut a, &mut ra, max, max / 3);
    random_writes(rng, &mut b, &mut rb, max, max / 3);

    let ops: [(BitOp, fn(bool, bool) -> bool); 4] = [
        (BitOp::And, |x, y| x && y),
        (BitOp::Or, |x, y| x || y),
        (BitOp::Xor, |x, y| x != y),
        (BitOp::Difference, |x, y| x && !y),
    ];
    for (op, f) in ops {
        let combined = a.combine(&b, op);
        let expected = ra.zip_with(&rb, f);
        compare(&combined, &expected)?;

        let mut updated = a.clone();
        updated.update(&b, op);
        ensure!(updated == combined, "in-place {:?} differs from combine", op);
    }

    ensure!(
        (&a & &b).count() + (&a | &b).count() == a.count() + b.count(),
        "inclusion-exclusion does not hold"
    );

    let inter = &a & &b;
    ensure!(inter <= a && inter <= b, "intersection is not a subset");
    ensure!(
        (inter < a) == (inter != a),
        "proper subset disagrees with inequality"
    );
    ensure!(
        (a <= b) == ra.is_subset(&rb),
        "subset relation disagrees with reference"
    );

    ensure!(
        a.iter().eq(ra.ones()),
        "iteration disagrees with reference"
    );
    info!("algebra checks passed with {} and {} bits", a.count(), b.count());
    Ok(())
}

fn random_writes(
    rng: &mut StdRng,
    bs: &mut SparseBitSet,
    reference: &mut DenseBitSet,
    range: usize,
    rounds: usize,
) {
    for _ in 0..rounds {
        let index = rng.gen_range(0..range);
        let value = rng.gen();
        bs.set(index, value);
        reference.set(index, value);
    }
}

fn compare(bs: &SparseBitSet, reference: &DenseBitSet) -> Result<()> {
    ensure!(
        bs.count() == reference.count(),
        "count {} != reference count {}",
        bs.count(),
        reference.count()
    );
    for i in 0..reference.capacity() {
        ensure!(bs.get(i) == reference.get(i), "bit {} disagrees", i);
    }
    Ok(())
}
