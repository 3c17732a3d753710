use crate::config::{env_seed, load_config, OutputFormat, DEFAULT_COUNT};
use crate::export::{collect_draws, render, DrawRecord};
use crate::generator::{check_range, Generator};
use crate::parallel::{run_seed_sweep, SeedSweep, WorkerPool};

const USAGE: &str = "usage: xorseq <draw|range|sweep|config>";

/// Records are rendered in memory before printing, so requests are capped.
pub const MAX_DRAW_COUNT: usize = 1_000_000;
pub const MAX_SWEEP_VALUES: usize = 10_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Draw,
    Range,
    Sweep,
    Config,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("draw") => Some(Command::Draw),
        Some("range") => Some(Command::Range),
        Some("sweep") => Some(Command::Sweep),
        Some("config") => Some(Command::Config),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Draw) => handle_draw(args),
        Some(Command::Range) => handle_range(args),
        Some(Command::Sweep) => handle_sweep(args),
        Some(Command::Config) => handle_config(args),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

fn handle_draw(args: &[String]) -> i32 {
    let positional = positional_args(args);
    let count = parse_arg(positional.first().copied(), "count", DEFAULT_COUNT);
    if let Err(msg) = check_limit("count", count, MAX_DRAW_COUNT) {
        eprintln!("{msg}");
        return 2;
    }
    let Some(seed) = resolve_seed(positional.get(1).copied()) else {
        return 1;
    };

    let records = collect_draws(&mut Generator::new(seed), count, None);
    print_records(&records, output_format(args))
}

fn handle_range(args: &[String]) -> i32 {
    let positional = positional_args(args);
    let (Some(min), Some(max)) = (
        positional.first().and_then(|raw| raw.parse::<f64>().ok()),
        positional.get(1).and_then(|raw| raw.parse::<f64>().ok()),
    ) else {
        eprintln!("usage: xorseq range <min> <max> [count] [seed] [--csv|--table]");
        return 2;
    };
    if let Err(err) = check_range(min, max) {
        eprintln!("invalid range: {err}");
        return 1;
    }
    let count = parse_arg(positional.get(2).copied(), "count", DEFAULT_COUNT);
    if let Err(msg) = check_limit("count", count, MAX_DRAW_COUNT) {
        eprintln!("{msg}");
        return 2;
    }
    let Some(seed) = resolve_seed(positional.get(3).copied()) else {
        return 1;
    };

    let records = collect_draws(&mut Generator::new(seed), count, Some((min, max)));
    print_records(&records, output_format(args))
}

fn handle_sweep(args: &[String]) -> i32 {
    let positional = positional_args(args);
    let sweep = SeedSweep {
        first_seed: parse_arg(positional.first().copied(), "first_seed", 0),
        seed_count: parse_arg(positional.get(1).copied(), "seed_count", 8),
        draws: parse_arg(positional.get(2).copied(), "draws", 4),
    };
    if let Err(msg) = check_limit("seed_count x draws", sweep.total_values(), MAX_SWEEP_VALUES) {
        eprintln!("{msg}");
        return 2;
    }
    let workers = flag_value(args, "--workers")
        .map(|raw| parse_arg(Some(raw), "workers", 0))
        .unwrap_or(0);

    let sequences = match run_seed_sweep(&sweep, &WorkerPool::with_workers(workers)) {
        Ok(sequences) => sequences,
        Err(err) => {
            eprintln!("sweep failed: {err}");
            return 1;
        }
    };
    match serde_json::to_string_pretty(&sequences) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize sweep result: {err}");
            1
        }
    }
}

fn handle_config(args: &[String]) -> i32 {
    let Some(path) = args.get(2) else {
        eprintln!("usage: xorseq config <path-to-config.yaml>");
        return 2;
    };

    let config = match load_config(path) {
        Ok(config) => config.with_env_overrides(),
        Err(err) => {
            eprintln!("config failed: {err}");
            return 1;
        }
    };
    if let Err(msg) = check_limit("count", config.count, MAX_DRAW_COUNT) {
        eprintln!("config failed: {msg}");
        return 1;
    }
    let range = match config.range() {
        Ok(range) => range,
        Err(err) => {
            eprintln!("config failed: {err}");
            return 1;
        }
    };

    let records = collect_draws(&mut Generator::new(config.seed), config.count, range);
    print_records(&records, config.format)
}

fn print_records(records: &[DrawRecord], format: OutputFormat) -> i32 {
    match render(records, format) {
        Ok(payload) => {
            print!("{payload}");
            if format == OutputFormat::Json {
                println!();
            }
            0
        }
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn check_limit(name: &str, requested: usize, limit: usize) -> Result<(), String> {
    if requested > limit {
        Err(format!("{name} {requested} exceeds the limit of {limit}"))
    } else {
        Ok(())
    }
}

fn output_format(args: &[String]) -> OutputFormat {
    if args.iter().any(|arg| arg == "--csv") {
        OutputFormat::Csv
    } else if args.iter().any(|arg| arg == "--table") {
        OutputFormat::Table
    } else {
        OutputFormat::Json
    }
}

/// Arguments after the command name, minus flags and the value following `--workers`.
fn positional_args(args: &[String]) -> Vec<&String> {
    let mut positional = Vec::new();
    let mut rest = args.iter().skip(2);
    while let Some(arg) = rest.next() {
        if arg == "--workers" {
            rest.next();
        } else if !arg.starts_with("--") {
            positional.push(arg);
        }
    }
    positional
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|idx| args.get(idx + 1))
}

/// Seed from the argument, then `XORSEQ_SEED`, then OS entropy. An entropy seed is
/// echoed to stderr so the run can be replayed.
fn resolve_seed(raw: Option<&String>) -> Option<u32> {
    if let Some(value) = raw {
        return Some(parse_arg(Some(value), "seed", 0));
    }
    if let Some(seed) = env_seed() {
        return Some(seed);
    }
    let mut bytes = [0_u8; 4];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => {
            let seed = u32::from_le_bytes(bytes);
            eprintln!("seed: {seed}");
            Some(seed)
        }
        Err(err) => {
            eprintln!("failed to read a seed from OS entropy: {err}");
            None
        }
    }
}

fn parse_arg<T>(raw: Option<&String>, name: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    raw.and_then(|value| value.parse::<T>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_command_recognises_subcommands() {
        assert_eq!(parse_command(&args(&["xorseq", "draw"])), Some(Command::Draw));
        assert_eq!(parse_command(&args(&["xorseq", "sweep"])), Some(Command::Sweep));
        assert_eq!(parse_command(&args(&["xorseq", "shuffle"])), None);
        assert_eq!(parse_command(&args(&["xorseq"])), None);
    }

    #[test]
    fn positional_args_skip_flags_and_worker_count() {
        let raw = args(&["xorseq", "sweep", "1", "--workers", "2", "3", "--table", "4"]);
        let positional: Vec<&str> = positional_args(&raw).into_iter().map(String::as_str).collect();
        assert_eq!(positional, vec!["1", "3", "4"]);
        assert_eq!(flag_value(&raw, "--workers").map(String::as_str), Some("2"));
    }

    #[test]
    fn output_format_follows_flags() {
        assert_eq!(output_format(&args(&["xorseq", "draw"])), OutputFormat::Json);
        assert_eq!(output_format(&args(&["xorseq", "draw", "--csv"])), OutputFormat::Csv);
        assert_eq!(output_format(&args(&["xorseq", "draw", "--table"])), OutputFormat::Table);
    }

    #[test]
    fn parse_arg_falls_back_on_invalid_input() {
        let bad = "x".to_string();
        let good = "12".to_string();
        assert_eq!(parse_arg::<u32>(Some(&bad), "count", 3), 3);
        assert_eq!(parse_arg::<u32>(Some(&good), "count", 3), 12);
        assert_eq!(parse_arg::<u32>(None, "count", 3), 3);
    }

    #[test]
    fn check_limit_rejects_only_above_limit() {
        assert!(check_limit("count", MAX_DRAW_COUNT, MAX_DRAW_COUNT).is_ok());
        let err = check_limit("count", MAX_DRAW_COUNT + 1, MAX_DRAW_COUNT)
            .expect_err("count above the limit should be rejected");
        assert!(err.contains("exceeds the limit"));
    }

    #[test]
    fn explicit_seed_wins_over_entropy() {
        let raw = "42".to_string();
        assert_eq!(resolve_seed(Some(&raw)), Some(42));
    }
}
