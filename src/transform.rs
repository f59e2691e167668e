use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AtlasError, Result};

/// Marker the World Bank exports use for "no data".
pub const DEFAULT_SENTINEL: &str = "..";

/// One (country, year, value) triple in long format.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub country: String,
    pub year: i32,
    pub value: f64,
}

impl Observation {
    pub fn new(country: impl Into<String>, year: i32, value: f64) -> Self {
        Self { country: country.into(), year, value }
    }
}

/// A source row in wide format: one country, one cell per column header.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WideRow {
    pub country_name: String,
    pub country_code: Option<String>,
    pub cells: BTreeMap<String, String>,
}

impl WideRow {
    pub fn new(country_name: impl Into<String>) -> Self {
        Self { country_name: country_name.into(), ..Self::default() }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.country_code = Some(code.into());
        self
    }

    pub fn with_cell(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.cells.insert(column.into(), value.into());
        self
    }

    /// Year columns of this row in ascending year order.
    pub fn year_cells(&self) -> Vec<(i32, &str)> {
        let mut out: Vec<(i32, &str)> = self
            .cells
            .iter()
            .filter_map(|(column, value)| parse_year_column(column).map(|y| (y, value.as_str())))
            .collect();
        out.sort_by_key(|(year, _)| *year);
        out
    }
}

/// Recognises `"2000"` and the DataBank form `"2000 [YR2000]"`.
pub fn parse_year_column(column: &str) -> Option<i32> {
    let head = column.trim().split_whitespace().next()?;
    if head.len() != 4 || !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    head.parse().ok()
}

/// Transformer settings: lowest year kept and the missing-value markers.
#[derive(Clone, Debug)]
pub struct TransformOptions {
    pub min_year: i32,
    pub sentinels: Vec<String>,
}

impl TransformOptions {
    pub fn new(min_year: i32) -> Self {
        Self { min_year, sentinels: vec![DEFAULT_SENTINEL.to_string()] }
    }

    fn is_missing(&self, cell: &str) -> bool {
        cell.is_empty() || self.sentinels.iter().any(|s| s == cell)
    }
}

/// Output of a lenient transform: the observations plus every rejected cell.
#[derive(Debug, Default)]
pub struct Transformed {
    pub observations: Vec<Observation>,
    pub rejected: Vec<AtlasError>,
}

/// Converts one row, failing on the first unparseable cell.
pub fn transform_row(row: &WideRow, options: &TransformOptions) -> Result<Vec<Observation>> {
    let mut out = Vec::new();
    for (year, raw) in row.year_cells() {
        if let Some(obs) = convert_cell(row, year, raw, options)? {
            out.push(obs);
        }
    }
    Ok(out)
}

fn convert_cell(
    row: &WideRow,
    year: i32,
    raw: &str,
    options: &TransformOptions,
) -> Result<Option<Observation>> {
    if year < options.min_year {
        return Ok(None);
    }
    let cell = raw.trim();
    if options.is_missing(cell) {
        return Ok(None);
    }
    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(Observation::new(&row.country_name, year, value))),
        _ => Err(AtlasError::DataFormat {
            country: row.country_name.clone(),
            column: year.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Wide-to-long conversion over many rows. Bad cells are skipped, logged and
/// collected; the rest of the row still converts.
pub fn transform(rows: &[WideRow], options: &TransformOptions) -> Transformed {
    let mut result = Transformed::default();
    for row in rows {
        for (year, raw) in row.year_cells() {
            match convert_cell(row, year, raw, options) {
                Ok(Some(obs)) => result.observations.push(obs),
                Ok(None) => {}
                Err(err) => {
                    warn!(country = %row.country_name, year, "skipping cell: {err}");
                    result.rejected.push(err);
                }
            }
        }
    }
    debug!(
        rows = rows.len(),
        observations = result.observations.len(),
        rejected = result.rejected.len(),
        "wide rows transformed"
    );
    result
}
