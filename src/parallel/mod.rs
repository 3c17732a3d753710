pub mod batch;
pub mod pool;

pub use batch::{batch_ranges, run_seed_sweep, run_seed_sweep_sequential, SeedSequence, SeedSweep};
pub use pool::{PoolError, WorkerPool};
