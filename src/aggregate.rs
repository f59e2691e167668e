use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AtlasError, Result};
use crate::names::{Continent, NameTable};
use crate::series::SeriesStore;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContinentAggregate {
    pub continent: Continent,
    pub year: i32,
    pub mean: f64,
    pub sample_count: usize,
}

impl ContinentAggregate {
    pub fn sum(&self) -> f64 {
        self.mean * self.sample_count as f64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PercentileBounds {
    pub low: f64,
    pub high: f64,
}

impl PercentileBounds {
    /// Position of `value` inside the bounds, clamped to `0.0..=1.0`.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.high - self.low;
        if span <= 0.0 {
            return 0.5;
        }
        ((value - self.low) / span).clamp(0.0, 1.0)
    }
}

/// Which values a percentile is taken over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Population {
    Year(i32),
    All,
}

/// Whether colour domains follow the selected year or stay fixed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainScope {
    Global,
    #[default]
    PerYear,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainPolicy {
    pub low: f64,
    pub high: f64,
    pub scope: DomainScope,
}

impl Default for DomainPolicy {
    fn default() -> Self {
        Self { low: 0.10, high: 0.90, scope: DomainScope::PerYear }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Statistic {
    Mean,
    Sum,
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

fn accumulate(store: &SeriesStore, names: &NameTable, year: i32) -> BTreeMap<Continent, Accumulator> {
    let mut acc: BTreeMap<Continent, Accumulator> = BTreeMap::new();
    for (country, value) in store.values_for_year(year) {
        // Aggregate rows (World, OECD members, ...) have no continent and drop out here.
        let Some(continent) = names.continent_of(country) else {
            continue;
        };
        let slot = acc.entry(continent).or_default();
        slot.sum += value;
        slot.count += 1;
    }
    acc
}

/// Per-continent mean for `year`, ordered by continent. Continents without a
/// matched country are absent.
pub fn continent_average(store: &SeriesStore, names: &NameTable, year: i32) -> Vec<ContinentAggregate> {
    accumulate(store, names, year)
        .into_iter()
        .filter(|(_, a)| a.count > 0)
        .map(|(continent, a)| ContinentAggregate {
            continent,
            year,
            mean: a.sum / a.count as f64,
            sample_count: a.count,
        })
        .collect()
}

/// One value per year for every continent with data in `start..=end`.
pub fn continent_series(
    store: &SeriesStore,
    names: &NameTable,
    start: i32,
    end: i32,
    statistic: Statistic,
) -> Result<BTreeMap<Continent, Vec<(i32, f64)>>> {
    if start > end {
        return Err(AtlasError::InvalidRange { start, end });
    }
    let mut out: BTreeMap<Continent, Vec<(i32, f64)>> = BTreeMap::new();
    for year in start..=end {
        for (continent, a) in accumulate(store, names, year) {
            if a.count == 0 {
                continue;
            }
            let value = match statistic {
                Statistic::Mean => a.sum / a.count as f64,
                Statistic::Sum => a.sum,
            };
            out.entry(continent).or_default().push((year, value));
        }
    }
    Ok(out)
}

/// R-7 quantile of an ascending slice: linear interpolation between the
/// order statistics around `(n - 1) * q`.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&q) {
        return Err(AtlasError::InvalidQuantile(q));
    }
    let (first, last) = match (sorted.first(), sorted.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Err(AtlasError::InsufficientData("a percentile")),
    };
    if q == 0.0 {
        return Ok(first);
    }
    if q == 1.0 {
        return Ok(last);
    }
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    Ok(sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo]))
}

fn collect_population(store: &SeriesStore, population: Population, keep: impl Fn(&str) -> bool) -> Vec<f64> {
    let mut values: Vec<f64> = match population {
        Population::Year(year) => store
            .values_for_year(year)
            .filter(|(c, _)| keep(c))
            .map(|(_, v)| v)
            .collect(),
        Population::All => store
            .countries()
            .filter(|c| keep(c))
            .flat_map(|c| store.range(c, i32::MIN, i32::MAX).unwrap_or_default())
            .map(|o| o.value)
            .collect(),
    };
    values.sort_by(f64::total_cmp);
    values
}

/// `q`-quantile over every value in the store or over one year.
pub fn percentile(store: &SeriesStore, population: Population, q: f64) -> Result<f64> {
    quantile_sorted(&collect_population(store, population, |_| true), q)
}

/// Colour-scale domain over real countries only.
pub fn color_domain(
    store: &SeriesStore,
    names: &NameTable,
    year: i32,
    policy: &DomainPolicy,
) -> Result<PercentileBounds> {
    let population = match policy.scope {
        DomainScope::Global => Population::All,
        DomainScope::PerYear => Population::Year(year),
    };
    let values = collect_population(store, population, |c| names.is_real_country(c));
    Ok(PercentileBounds {
        low: quantile_sorted(&values, policy.low)?,
        high: quantile_sorted(&values, policy.high)?,
    })
}
