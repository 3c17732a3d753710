//! Deterministic four-word xorshift generator with ranged output, plus the
//! config, export and seed-sweep plumbing used by the `xorseq` command line.
//!
//! Not cryptographically secure.

pub mod cli;
pub mod config;
pub mod export;
pub mod generator;
pub mod parallel;

pub use generator::{Generator, GeneratorState, RangeError};
