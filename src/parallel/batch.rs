//! Batch distribution for parallel seed sweeps.
//!
//! A sweep runs one independent [Generator] per seed. Seeds are split into
//! contiguous batches so each rayon task handles many short sequences.

use rayon::prelude::*;
use serde::Serialize;

use crate::generator::Generator;
use crate::parallel::pool::{PoolError, WorkerPool};

/// Batches handed to rayon per worker thread.
const BATCHES_PER_THREAD: usize = 4;

/// Split `total` items into up to `num_batches` ranges `[start, end)`.
/// Batches are as equal in size as possible; later batches may be smaller.
///
/// # Example
/// ```
/// # use xorseq::parallel::batch_ranges;
/// let ranges = batch_ranges(100, 4);
/// assert_eq!(ranges, vec![(0, 25), (25, 50), (50, 75), (75, 100)]);
/// ```
pub fn batch_ranges(total: usize, num_batches: usize) -> Vec<(usize, usize)> {
    if total == 0 || num_batches == 0 {
        return Vec::new();
    }
    let num_batches = num_batches.min(total);
    let base = total / num_batches;
    let remainder = total % num_batches;
    let mut ranges = Vec::with_capacity(num_batches);
    let mut start = 0;
    for i in 0..num_batches {
        let size = base + if i < remainder { 1 } else { 0 };
        let end = start + size;
        ranges.push((start, end));
        start = end;
    }
    ranges
}

/// Seeds `first_seed, first_seed + 1, ...` (wrapping past `u32::MAX`), `draws` values each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSweep {
    pub first_seed: u32,
    pub seed_count: u32,
    pub draws: usize,
}

impl SeedSweep {
    /// Number of values the sweep holds in memory; a seed with no draws still costs one entry.
    pub fn total_values(&self) -> usize {
        (self.seed_count as usize).saturating_mul(self.draws.max(1))
    }

    fn seed_at(&self, offset: usize) -> u32 {
        // offset < seed_count, so it always fits in u32
        self.first_seed.wrapping_add(offset as u32)
    }

    fn sequence_at(&self, offset: usize) -> SeedSequence {
        let seed = self.seed_at(offset);
        let mut generator = Generator::new(seed);
        SeedSequence {
            seed,
            values: generator.draws().take(self.draws).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedSequence {
    pub seed: u32,
    pub values: Vec<u32>,
}

/// Run the sweep on `pool`. Output is ordered by seed and identical to
/// [run_seed_sweep_sequential].
pub fn run_seed_sweep(sweep: &SeedSweep, pool: &WorkerPool) -> Result<Vec<SeedSequence>, PoolError> {
    pool.install(|| {
        let total = sweep.seed_count as usize;
        let batches = batch_ranges(total, rayon::current_num_threads() * BATCHES_PER_THREAD);
        batches
            .into_par_iter()
            .flat_map_iter(|(start, end)| (start..end).map(|offset| sweep.sequence_at(offset)))
            .collect()
    })
}

pub fn run_seed_sweep_sequential(sweep: &SeedSweep) -> Vec<SeedSequence> {
    (0..sweep.seed_count as usize)
        .map(|offset| sweep.sequence_at(offset))
        .collect()
}
