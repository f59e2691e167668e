use std::cmp::Ordering;

use serde::Serialize;

use crate::error::{AtlasError, Result};
use crate::names::NameTable;
use crate::series::SeriesStore;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimilarCountry {
    pub country: String,
    pub value: f64,
    pub distance: f64,
}

/// Countries ordered by `|value - focal value|` in `year`, ties broken by
/// ascending name. Countries without a value that year are left out.
pub fn rank_by_similarity(
    store: &SeriesStore,
    focal: &str,
    year: i32,
    exclude_self: bool,
) -> Result<Vec<SimilarCountry>> {
    rank_filtered(store, focal, year, exclude_self, |_| true)
}

/// Similar real countries only, truncated to `limit`.
pub fn suggest_similar(
    store: &SeriesStore,
    names: &NameTable,
    focal: &str,
    year: i32,
    limit: usize,
) -> Result<Vec<SimilarCountry>> {
    let mut ranked = rank_filtered(store, focal, year, true, |c| names.is_real_country(c))?;
    ranked.truncate(limit);
    Ok(ranked)
}

fn rank_filtered(
    store: &SeriesStore,
    focal: &str,
    year: i32,
    exclude_self: bool,
    keep: impl Fn(&str) -> bool,
) -> Result<Vec<SimilarCountry>> {
    let focal_value = store.get(focal, year).ok_or_else(|| AtlasError::NoData {
        country: focal.to_string(),
        year,
    })?;

    let mut ranked: Vec<SimilarCountry> = store
        .values_for_year(year)
        .filter(|(country, _)| !(exclude_self && *country == focal) && keep(country))
        .map(|(country, value)| SimilarCountry {
            country: country.to_string(),
            value,
            distance: (value - focal_value).abs(),
        })
        .collect();

    ranked.sort_by(|a, b| match a.distance.total_cmp(&b.distance) {
        Ordering::Equal => a.country.cmp(&b.country),
        other => other,
    });
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::NameTableBuilder;
    use crate::transform::Observation;

    fn store() -> SeriesStore {
        SeriesStore::build(vec![
            Observation::new("A", 2010, 10.0),
            Observation::new("B", 2010, 12.0),
            Observation::new("C", 2010, 8.0),
            Observation::new("D", 2010, 10.0),
            Observation::new("E", 2011, 10.0),
        ])
        .unwrap()
    }

    #[test]
    fn ties_break_alphabetically() {
        let ranked = rank_by_similarity(&store(), "A", 2010, true).unwrap();
        let order: Vec<(&str, f64)> = ranked.iter().map(|s| (s.country.as_str(), s.distance)).collect();
        assert_eq!(order, vec![("D", 0.0), ("B", 2.0), ("C", 2.0)]);
    }

    #[test]
    fn focal_can_be_kept() {
        let ranked = rank_by_similarity(&store(), "A", 2010, false).unwrap();
        assert_eq!(ranked[0].country, "A");
        assert_eq!(ranked[1].country, "D");
    }

    #[test]
    fn missing_focal_value_is_no_data() {
        let err = rank_by_similarity(&store(), "E", 2010, true).unwrap_err();
        assert!(matches!(err, AtlasError::NoData { year: 2010, .. }));
    }

    #[test]
    fn suggestions_skip_aggregates_and_truncate() {
        let s = SeriesStore::build(vec![
            Observation::new("Chad", 2010, 10.0),
            Observation::new("World", 2010, 10.0),
            Observation::new("Mali", 2010, 11.0),
            Observation::new("Niger", 2010, 15.0),
        ])
        .unwrap();
        let names = NameTableBuilder::builtin().build().unwrap();
        let out = suggest_similar(&s, &names, "Chad", 2010, 1).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].country, "Mali");
    }
}
