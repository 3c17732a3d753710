//! Draw settings from a YAML file, with `XORSEQ_SEED` / `XORSEQ_COUNT` environment overrides.
//!
//! ```yaml
//! seed: 42
//! count: 5
//! min: 1
//! max: 6
//! format: table
//! ```

use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::generator::{check_range, RangeError};

pub const SEED_ENV_VAR: &str = "XORSEQ_SEED";
pub const COUNT_ENV_VAR: &str = "XORSEQ_COUNT";
pub const DEFAULT_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Table,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "table" | "tsv" => Ok(Self::Table),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DrawConfig {
    #[serde(default)]
    pub seed: u32,
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub format: OutputFormat,
}

/// Parse an `XORSEQ_SEED` value. An unparseable value is reported on stderr and ignored.
pub fn parse_seed_override(raw: &str) -> Option<u32> {
    match raw.trim().parse::<u32>() {
        Ok(value) => Some(value),
        Err(_) => {
            eprintln!("ignoring invalid {SEED_ENV_VAR} '{raw}'");
            None
        }
    }
}

/// `XORSEQ_SEED` from the process environment, if set and valid.
pub fn env_seed() -> Option<u32> {
    env::var(SEED_ENV_VAR)
        .ok()
        .and_then(|raw| parse_seed_override(&raw))
}

fn default_count() -> usize {
    DEFAULT_COUNT
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            count: DEFAULT_COUNT,
            min: None,
            max: None,
            format: OutputFormat::default(),
        }
    }
}

impl DrawConfig {
    /// Apply `XORSEQ_SEED` and `XORSEQ_COUNT` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(env::var(SEED_ENV_VAR).ok(), env::var(COUNT_ENV_VAR).ok())
    }

    /// Apply raw override values; unparseable values are reported and ignored.
    pub fn with_overrides(mut self, seed: Option<String>, count: Option<String>) -> Self {
        if let Some(value) = seed.as_deref().and_then(parse_seed_override) {
            self.seed = value;
        }
        if let Some(raw) = count {
            match raw.trim().parse::<usize>() {
                Ok(value) => self.count = value,
                Err(_) => eprintln!("ignoring invalid {COUNT_ENV_VAR} '{raw}'"),
            }
        }
        self
    }

    /// The requested range, if any. Both bounds must be present and pass the checked-range rules.
    pub fn range(&self) -> Result<Option<(f64, f64)>, ConfigError> {
        match (self.min, self.max) {
            (None, None) => Ok(None),
            (Some(min), Some(max)) => {
                check_range(min, max)?;
                Ok(Some((min, max)))
            }
            (min, max) => Err(ConfigError::IncompleteRange { min, max }),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.range().map(|_| ())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read(std::io::Error),
    Parse(serde_yaml::Error),
    IncompleteRange { min: Option<f64>, max: Option<f64> },
    Range(RangeError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read config file: {err}"),
            Self::Parse(err) => write!(f, "failed to parse config file: {err}"),
            Self::IncompleteRange { min, max } => write!(
                f,
                "range needs both min and max (min={min:?}, max={max:?})"
            ),
            Self::Range(err) => write!(f, "invalid range: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::IncompleteRange { .. } => None,
            Self::Range(err) => Some(err),
        }
    }
}

impl From<RangeError> for ConfigError {
    fn from(err: RangeError) -> Self {
        Self::Range(err)
    }
}

pub fn parse_config(raw: &str) -> Result<DrawConfig, ConfigError> {
    serde_yaml::from_str(raw).map_err(ConfigError::Parse)
}

pub fn load_config(path: impl AsRef<Path>) -> Result<DrawConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(ConfigError::Read)?;
    parse_config(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mapping_uses_defaults() {
        let config = parse_config("{}").expect("empty mapping should parse");
        assert_eq!(config, DrawConfig::default());
    }

    #[test]
    fn full_config_parses() {
        let config = parse_config("seed: 42\ncount: 3\nmin: 1\nmax: 6\nformat: csv\n")
            .expect("config should parse");
        assert_eq!(config.seed, 42);
        assert_eq!(config.count, 3);
        assert_eq!(config.format, OutputFormat::Csv);
        assert_eq!(config.range().expect("range is valid"), Some((1.0, 6.0)));
    }

    #[test]
    fn overrides_replace_seed_and_count() {
        let config = DrawConfig::default()
            .with_overrides(Some("7".to_string()), Some("4".to_string()));
        assert_eq!(config.seed, 7);
        assert_eq!(config.count, 4);
    }

    #[test]
    fn invalid_overrides_are_ignored() {
        let config = DrawConfig::default()
            .with_overrides(Some("-3".to_string()), Some("many".to_string()));
        assert_eq!(config, DrawConfig::default());
    }

    #[test]
    fn seed_override_parses_trimmed_values() {
        assert_eq!(parse_seed_override(" 42 "), Some(42));
        assert_eq!(parse_seed_override("4294967296"), None);
        assert_eq!(parse_seed_override("seed"), None);
    }

    #[test]
    fn fractional_range_is_rejected() {
        let config = DrawConfig {
            min: Some(0.5),
            max: Some(1.2),
            ..DrawConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Range(RangeError::Fractional { .. }))
        ));
    }

    #[test]
    fn half_range_is_rejected() {
        let config = DrawConfig {
            min: Some(1.0),
            ..DrawConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::IncompleteRange { .. })
        ));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let config = DrawConfig {
            min: Some(9.0),
            max: Some(2.0),
            ..DrawConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Range(RangeError::Inverted { .. }))
        ));
    }

    #[test]
    fn unknown_format_fails_to_parse() {
        assert!(matches!(
            parse_config("format: xml"),
            Err(ConfigError::Parse(_))
        ));
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!("TSV".parse::<OutputFormat>(), Ok(OutputFormat::Table));
    }
}
