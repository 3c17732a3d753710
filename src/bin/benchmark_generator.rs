//! Run generator benchmark and optionally append one line to a log file for trend tracking.
//!
//! Usage:
//!   cargo run --release --bin benchmark_generator
//!   cargo run --release --bin benchmark_generator -- --log
//!
//! --log  Append one row to benchmark_log.csv (date, draws_per_sec, ranged_per_sec, draws).

use std::fs::OpenOptions;
use std::hint::black_box;
use std::io::Write;
use std::time::Instant;

use xorseq::Generator;

// Run for at least this long or this many draws
const MIN_DURATION_MS: u128 = 2000;
const MIN_DRAWS: u64 = 10_000_000;
const CHUNK: u64 = 100_000;

fn measure(mut draw: impl FnMut()) -> (u64, f64) {
    let start = Instant::now();
    let mut draws: u64 = 0;
    while start.elapsed().as_millis() < MIN_DURATION_MS || draws < MIN_DRAWS {
        for _ in 0..CHUNK {
            draw();
        }
        draws += CHUNK;
    }
    (draws, start.elapsed().as_secs_f64())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log = std::env::args().any(|a| a == "--log");

    let mut rng = Generator::new(7);
    let (raw_draws, raw_secs) = measure(|| {
        black_box(rng.next_raw());
    });
    let raw_per_sec = raw_draws as f64 / raw_secs;

    rng.set_seed(7);
    let (ranged_draws, ranged_secs) = measure(|| {
        black_box(rng.ranged_value(black_box(1.0), black_box(100.0)));
    });
    let ranged_per_sec = ranged_draws as f64 / ranged_secs;

    println!("Generator benchmark:");
    println!("  Raw draws:      {}", raw_draws);
    println!("  Raw draws/s:    {:.2}", raw_per_sec);
    println!("  Ranged draws:   {}", ranged_draws);
    println!("  Ranged draws/s: {:.2}", ranged_per_sec);

    if log {
        let date = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        let line = format!(
            "{},{:.4},{:.4},{}\n",
            date, raw_per_sec, ranged_per_sec, raw_draws
        );
        let path = "benchmark_log.csv";
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        if file.metadata().map(|m| m.len() == 0).unwrap_or(true) {
            file.write_all(b"date,draws_per_sec,ranged_per_sec,draws\n")?;
        }
        file.write_all(line.as_bytes())?;
        file.flush()?;
        println!("Appended to {}", path);
    }
    Ok(())
}
