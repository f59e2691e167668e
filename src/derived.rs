//! Chart-ready views over the selected countries.
//!
//! Every function here is a pure read of a [`SeriesStore`]; countries without
//! the data a chart needs are dropped rather than drawn as zero, except in
//! [`stream_table`] where stacked layers need a value in every cell.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::{AtlasError, Result};
use crate::series::SeriesStore;
use crate::transform::Observation;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BarRow {
    pub country: String,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CountrySeries {
    pub country: String,
    pub points: Vec<Observation>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SlopeRow {
    pub country: String,
    pub start: i32,
    pub end: i32,
    pub start_value: f64,
    pub end_value: f64,
}

impl SlopeRow {
    /// Relative change from start to end; `None` when the start is zero.
    pub fn change(&self) -> Option<f64> {
        (self.start_value != 0.0).then(|| (self.end_value - self.start_value) / self.start_value)
    }
}

/// Year x country matrix; `layers[i].1[j]` is the value of country `i` in `years[j]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StreamTable {
    pub years: Vec<i32>,
    pub layers: Vec<(String, Vec<f64>)>,
}

fn check_range(start: i32, end: i32) -> Result<()> {
    if start > end {
        return Err(AtlasError::InvalidRange { start, end });
    }
    Ok(())
}

/// Values in `year`, largest first; ties by name.
pub fn bar_rows<'a, I>(store: &SeriesStore, countries: I, year: i32) -> Vec<BarRow>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut rows: Vec<BarRow> = countries
        .into_iter()
        .filter_map(|c| store.get(c, year).map(|value| BarRow { country: c.to_string(), value }))
        .collect();
    rows.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.country.cmp(&b.country)));
    rows
}

pub fn line_series<'a, I>(store: &SeriesStore, countries: I, start: i32, end: i32) -> Result<Vec<CountrySeries>>
where
    I: IntoIterator<Item = &'a str>,
{
    check_range(start, end)?;
    let mut out = Vec::new();
    for country in countries {
        let points = store.range(country, start, end)?;
        if !points.is_empty() {
            out.push(CountrySeries { country: country.to_string(), points });
        }
    }
    Ok(out)
}

pub fn slope_rows<'a, I>(store: &SeriesStore, countries: I, start: i32, end: i32) -> Result<Vec<SlopeRow>>
where
    I: IntoIterator<Item = &'a str>,
{
    check_range(start, end)?;
    Ok(countries
        .into_iter()
        .filter_map(|country| {
            let start_value = store.get(country, start)?;
            let end_value = store.get(country, end)?;
            Some(SlopeRow { country: country.to_string(), start, end, start_value, end_value })
        })
        .collect())
}

/// Stacking input over the years any of `countries` has data for in
/// `start..=end`; gaps are filled with zero.
pub fn stream_table<'a, I>(store: &SeriesStore, countries: I, start: i32, end: i32) -> Result<StreamTable>
where
    I: IntoIterator<Item = &'a str>,
{
    check_range(start, end)?;
    let countries: Vec<&str> = countries.into_iter().collect();
    let mut years = BTreeSet::new();
    for country in &countries {
        years.extend(store.range(country, start, end)?.into_iter().map(|o| o.year));
    }
    let years: Vec<i32> = years.into_iter().collect();
    let layers = countries
        .iter()
        .map(|country| {
            let values = years.iter().map(|&y| store.get(country, y).unwrap_or(0.0)).collect();
            (country.to_string(), values)
        })
        .collect();
    Ok(StreamTable { years, layers })
}
