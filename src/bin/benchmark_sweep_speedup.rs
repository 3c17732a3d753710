//! Run a seed sweep once sequentially and once in parallel, then print timings and speedup.
//!
//! Usage: cargo run --release --bin benchmark_sweep_speedup

use std::time::Instant;

use xorseq::parallel::{run_seed_sweep, run_seed_sweep_sequential, SeedSweep, WorkerPool};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sweep = SeedSweep {
        first_seed: 12345,
        seed_count: 20_000,
        draws: 1_000,
    };
    let total_draws = sweep.seed_count as f64 * sweep.draws as f64;

    println!(
        "Seed sweep: {} seeds x {} draws (first_seed={})",
        sweep.seed_count, sweep.draws, sweep.first_seed
    );
    println!();

    let t0 = Instant::now();
    let results_seq = run_seed_sweep_sequential(&sweep);
    let elapsed_seq = t0.elapsed();
    let seq_ms = elapsed_seq.as_secs_f64() * 1000.0;
    println!("Sequential:  {:.2} ms  ({:.1} draws/s)", seq_ms, total_draws / elapsed_seq.as_secs_f64());

    let t0 = Instant::now();
    let results_par = run_seed_sweep(&sweep, &WorkerPool::default_workers())?;
    let elapsed_par = t0.elapsed();
    let par_ms = elapsed_par.as_secs_f64() * 1000.0;
    println!("Parallel:    {:.2} ms  ({:.1} draws/s)", par_ms, total_draws / elapsed_par.as_secs_f64());

    println!();
    println!("Speedup:     {:.2}x faster (parallel vs sequential)", seq_ms / par_ms);

    if results_seq != results_par {
        return Err("parallel sweep diverged from sequential sweep".into());
    }
    println!("(Results match sequential vs parallel)");
    Ok(())
}
