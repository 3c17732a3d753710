//! Render draw sequences as JSON, CSV or tab-separated text.

use std::fmt;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::config::OutputFormat;
use crate::generator::{map_to_range, Generator};

/// One draw: its position in the sequence, the raw word, and the value reported for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub index: usize,
    pub raw: u32,
    pub value: f64,
}

/// Draw `count` records. With a range each value is mapped exactly as
/// [Generator::ranged_value] would; without one it is the raw word as a float.
pub fn collect_draws(
    generator: &mut Generator,
    count: usize,
    range: Option<(f64, f64)>,
) -> Vec<DrawRecord> {
    generator
        .draws()
        .take(count)
        .enumerate()
        .map(|(index, raw)| DrawRecord {
            index,
            raw,
            value: match range {
                Some((min, max)) => map_to_range(raw, min, max),
                None => f64::from(raw),
            },
        })
        .collect()
}

#[derive(Debug)]
pub enum ExportError {
    Json(serde_json::Error),
    Csv(csv::Error),
    Utf8(std::string::FromUtf8Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "failed to serialize draws as json: {err}"),
            Self::Csv(err) => write!(f, "failed to serialize draws as csv: {err}"),
            Self::Utf8(err) => write!(f, "csv output was not utf-8: {err}"),
        }
    }
}

impl std::error::Error for ExportError {}

pub fn render(records: &[DrawRecord], format: OutputFormat) -> Result<String, ExportError> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(records).map_err(ExportError::Json),
        OutputFormat::Csv => render_csv(records),
        OutputFormat::Table => Ok(render_table(records)),
    }
}

fn render_csv(records: &[DrawRecord]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record).map_err(ExportError::Csv)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Csv(err.into_error().into()))?;
    String::from_utf8(bytes).map_err(ExportError::Utf8)
}

fn render_table(records: &[DrawRecord]) -> String {
    let mut out = String::from("index\traw\tvalue\n");
    for record in records {
        let _ = writeln!(out, "{}\t{}\t{}", record.index, record.raw, record.value);
    }
    out
}
