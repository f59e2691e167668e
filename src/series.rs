use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AtlasError, Result};
use crate::transform::Observation;

/// The two indicators the dashboard can show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Gdp,
    Internet,
}

impl Metric {
    pub fn label(self) -> &'static str {
        match self {
            Metric::Gdp => "GDP (current US$)",
            Metric::Internet => "Internet users (% of population)",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Metric::Gdp => Metric::Internet,
            Metric::Internet => Metric::Gdp,
        }
    }

    pub fn format_value(self, value: f64) -> String {
        match self {
            Metric::Gdp => {
                if value >= 1_000_000_000_000.0 {
                    format!("{:.2}T USD", value / 1_000_000_000_000.0)
                } else if value >= 1_000_000_000.0 {
                    format!("{:.2}B USD", value / 1_000_000_000.0)
                } else if value >= 1_000_000.0 {
                    format!("{:.2}M USD", value / 1_000_000.0)
                } else {
                    format!("{:.2} USD", value)
                }
            }
            Metric::Internet => format!("{:.1}%", value),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Metric::Gdp => "gdp",
            Metric::Internet => "internet",
        })
    }
}

/// Per-metric index: economic country name -> (year -> value).
///
/// Built once from deduplicated observations and read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct SeriesStore {
    series: HashMap<String, BTreeMap<i32, f64>>,
    // Sorted, so every scan over the store visits countries in the same order.
    countries: Vec<String>,
}

impl SeriesStore {
    /// Indexes `observations`. Exact repeats collapse; a repeat with a
    /// different value is an integrity error and nothing is built.
    pub fn build<I>(observations: I) -> Result<Self>
    where
        I: IntoIterator<Item = Observation>,
    {
        let mut series: HashMap<String, BTreeMap<i32, f64>> = HashMap::new();
        let mut duplicates = 0usize;

        for obs in observations {
            let years = series.entry(obs.country.clone()).or_default();
            match years.get(&obs.year) {
                Some(&existing) if existing == obs.value => duplicates += 1,
                Some(&existing) => {
                    return Err(AtlasError::DuplicateObservation {
                        country: obs.country,
                        year: obs.year,
                        existing,
                        incoming: obs.value,
                    });
                }
                None => {
                    years.insert(obs.year, obs.value);
                }
            }
        }

        let mut countries: Vec<String> = series.keys().cloned().collect();
        countries.sort();
        debug!(countries = countries.len(), duplicates, "series store built");
        Ok(Self { series, countries })
    }

    pub fn get(&self, country: &str, year: i32) -> Option<f64> {
        self.series.get(country)?.get(&year).copied()
    }

    pub fn contains_country(&self, country: &str) -> bool {
        self.series.contains_key(country)
    }

    /// Observations for `country` in `start..=end`, ascending, present years only.
    pub fn range(&self, country: &str, start: i32, end: i32) -> Result<Vec<Observation>> {
        if start > end {
            return Err(AtlasError::InvalidRange { start, end });
        }
        Ok(self
            .series
            .get(country)
            .map(|years| {
                years
                    .range(start..=end)
                    .map(|(&year, &value)| Observation::new(country, year, value))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Most recent year with data for `country`.
    pub fn latest(&self, country: &str) -> Option<(i32, f64)> {
        self.series
            .get(country)?
            .last_key_value()
            .map(|(&year, &value)| (year, value))
    }

    /// Countries in ascending name order.
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.countries.iter().map(String::as_str)
    }

    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Every country with a value in `year`, by ascending name.
    pub fn values_for_year(&self, year: i32) -> impl Iterator<Item = (&str, f64)> {
        self.countries
            .iter()
            .filter_map(move |c| self.get(c, year).map(|v| (c.as_str(), v)))
    }

    /// Every stored value, country by country.
    pub fn all_values(&self) -> impl Iterator<Item = f64> {
        self.countries
            .iter()
            .filter_map(|c| self.series.get(c))
            .flat_map(|years| years.values().copied())
    }

    /// Smallest and largest year present, if any data exists.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        self.series.values().fold(None, |acc, years| {
            let (Some((&lo, _)), Some((&hi, _))) = (years.first_key_value(), years.last_key_value())
            else {
                return acc;
            };
            Some(match acc {
                Some((min, max)) => (lo.min(min), hi.max(max)),
                None => (lo, hi),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn store() -> SeriesStore {
        SeriesStore::build(vec![
            Observation::new("Chad", 2001, 100.0),
            Observation::new("Chad", 2003, 120.0),
            Observation::new("Chad", 2002, 110.0),
            Observation::new("Peru", 2001, 5.0),
        ])
        .unwrap()
    }

    #[test]
    fn get_returns_stored_value_or_none() {
        let s = store();
        assert_eq!(s.get("Chad", 2002), Some(110.0));
        assert_eq!(s.get("Chad", 2000), None);
        assert_eq!(s.get("Atlantis", 2001), None);
    }

    #[test]
    fn conflicting_duplicate_fails_build() {
        let err = SeriesStore::build(vec![
            Observation::new("Chad", 2001, 100.0),
            Observation::new("Chad", 2001, 101.0),
        ])
        .unwrap_err();
        assert!(matches!(err, AtlasError::DuplicateObservation { year: 2001, .. }));
    }

    #[test]
    fn identical_duplicate_collapses() {
        let s = SeriesStore::build(vec![
            Observation::new("Chad", 2001, 100.0),
            Observation::new("Chad", 2001, 100.0),
        ])
        .unwrap();
        assert_eq!(s.range("Chad", 2000, 2010).unwrap().len(), 1);
    }

    #[test]
    fn range_is_inclusive_and_ascending() {
        let s = store();
        let years: Vec<i32> = s.range("Chad", 2001, 2002).unwrap().iter().map(|o| o.year).collect();
        assert_eq!(years, vec![2001, 2002]);
        assert!(s.range("Atlantis", 2000, 2001).unwrap().is_empty());
    }

    #[test]
    fn reversed_range_is_an_error() {
        assert!(matches!(
            store().range("Chad", 2003, 2001),
            Err(AtlasError::InvalidRange { start: 2003, end: 2001 })
        ));
    }

    #[test]
    fn latest_and_bounds() {
        let s = store();
        assert_eq!(s.latest("Chad"), Some((2003, 120.0)));
        assert_eq!(s.year_bounds(), Some((2001, 2003)));
        assert_eq!(SeriesStore::default().year_bounds(), None);
    }

    #[test]
    fn random_store_answers_exactly_what_was_inserted() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut input = Vec::new();
        for c in 0..20 {
            for year in 2000..2020 {
                if rng.random_bool(0.6) {
                    input.push(Observation::new(format!("C{c}"), year, rng.random_range(-1e3..1e3)));
                }
            }
        }
        let s = SeriesStore::build(input.clone()).unwrap();
        for obs in &input {
            assert_eq!(s.get(&obs.country, obs.year), Some(obs.value));
        }
        let present = |c: &str, y: i32| input.iter().any(|o| o.country == c && o.year == y);
        for c in 0..20 {
            let name = format!("C{c}");
            for year in 1995..2025 {
                if !present(&name, year) {
                    assert_eq!(s.get(&name, year), None);
                }
            }
        }
    }

    #[test]
    fn formats_metric_values() {
        assert_eq!(Metric::Gdp.format_value(2.5e12), "2.50T USD");
        assert_eq!(Metric::Gdp.format_value(3.0e9), "3.00B USD");
        assert_eq!(Metric::Internet.format_value(42.06), "42.1%");
    }
}
