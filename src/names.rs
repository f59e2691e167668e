use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use serde_json::from_slice;
use tracing::debug;

use crate::country_tables::{AGGREGATE_PATTERNS, CONTINENTS, GEO_RENAMES};
use crate::error::{AtlasError, Result};
use crate::series::SeriesStore;
use crate::transform::WideRow;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Continent {
    Africa,
    Asia,
    Europe,
    #[serde(rename = "North America")]
    NorthAmerica,
    Oceania,
    #[serde(rename = "South America")]
    SouthAmerica,
}

impl Continent {
    pub const ALL: [Continent; 6] = [
        Continent::Africa,
        Continent::Asia,
        Continent::Europe,
        Continent::NorthAmerica,
        Continent::Oceania,
        Continent::SouthAmerica,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Continent::Africa => "Africa",
            Continent::Asia => "Asia",
            Continent::Europe => "Europe",
            Continent::NorthAmerica => "North America",
            Continent::Oceania => "Oceania",
            Continent::SouthAmerica => "South America",
        }
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The three names one country goes by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountryIdentity {
    pub economic_name: String,
    pub geo_name: Option<String>,
    pub iso3: Option<String>,
}

/// Extra reconciliation entries read from a JSON file.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct NameOverrides {
    pub renames: BTreeMap<String, String>,
    pub codes: BTreeMap<String, String>,
    pub continents: BTreeMap<String, Continent>,
    pub aggregate_patterns: Vec<String>,
}

impl NameOverrides {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path)?;
        Ok(from_slice(&bytes)?)
    }
}

/// Collects reconciliation entries; `build` freezes them into a [`NameTable`].
#[derive(Debug, Default)]
pub struct NameTableBuilder {
    geo: BTreeMap<String, String>,
    codes: BTreeMap<String, String>,
    continents: BTreeMap<String, Continent>,
    patterns: Vec<String>,
    overrides: NameOverrides,
    conflict: Option<AtlasError>,
}

impl NameTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the data shipped in `country_tables`.
    pub fn builtin() -> Self {
        let mut builder = Self::new();
        for (economic, geo) in GEO_RENAMES {
            builder = builder.rename(*economic, *geo);
        }
        for (code, continent) in CONTINENTS {
            builder = builder.continent(*code, *continent);
        }
        for pattern in AGGREGATE_PATTERNS {
            builder = builder.aggregate_pattern(*pattern);
        }
        builder
    }

    pub fn rename(mut self, economic: impl Into<String>, geo: impl Into<String>) -> Self {
        let (economic, geo) = (economic.into(), geo.into());
        Self::insert_unique(&mut self.geo, &mut self.conflict, economic, geo);
        self
    }

    pub fn code(mut self, economic: impl Into<String>, iso3: impl Into<String>) -> Self {
        let (economic, iso3) = (economic.into(), iso3.into());
        if iso3.trim().is_empty() {
            self.codes.entry(economic).or_default();
            return self;
        }
        Self::insert_unique(&mut self.codes, &mut self.conflict, economic, iso3);
        self
    }

    pub fn continent(mut self, iso3: impl Into<String>, continent: Continent) -> Self {
        self.continents.insert(iso3.into(), continent);
        self
    }

    pub fn aggregate_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    /// Registers the `Country Code` of every source row.
    pub fn codes_from_rows(mut self, rows: &[WideRow]) -> Self {
        for row in rows {
            let code = row.country_code.clone().unwrap_or_default();
            self = self.code(row.country_name.clone(), code);
        }
        self
    }

    /// Override entries are applied in `build`, after every other entry, so
    /// they replace shipped and row-derived values instead of conflicting.
    pub fn overrides(mut self, overrides: NameOverrides) -> Self {
        self.overrides.renames.extend(overrides.renames);
        self.overrides.codes.extend(overrides.codes);
        self.overrides.continents.extend(overrides.continents);
        self.overrides.aggregate_patterns.extend(overrides.aggregate_patterns);
        self
    }

    fn insert_unique(
        map: &mut BTreeMap<String, String>,
        conflict: &mut Option<AtlasError>,
        key: String,
        value: String,
    ) {
        match map.get(&key) {
            Some(existing) if existing.is_empty() => {
                map.insert(key, value);
            }
            Some(existing) if *existing != value => {
                conflict.get_or_insert(AtlasError::NameConflict {
                    economic_name: key,
                    existing: existing.clone(),
                    incoming: value,
                });
            }
            Some(_) => {}
            None => {
                map.insert(key, value);
            }
        }
    }

    pub fn build(mut self) -> Result<NameTable> {
        if let Some(err) = self.conflict {
            return Err(err);
        }
        let overrides = std::mem::take(&mut self.overrides);
        self.geo.extend(overrides.renames);
        self.codes.extend(overrides.codes);
        self.continents.extend(overrides.continents);
        self.patterns.extend(overrides.aggregate_patterns);

        let mut aggregates = Vec::with_capacity(self.patterns.len());
        for pattern in &self.patterns {
            let re = RegexBuilder::new(pattern).case_insensitive(true).build()?;
            aggregates.push(re);
        }

        let mut reverse: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (economic, geo) in &self.geo {
            reverse.entry(geo.clone()).or_default().insert(economic.clone());
        }
        for economic in self.codes.keys() {
            let geo = self.geo.get(economic).unwrap_or(economic);
            reverse.entry(geo.clone()).or_default().insert(economic.clone());
        }

        let codes = self.codes.into_iter().filter(|(_, code)| !code.is_empty()).collect();
        debug!(renames = self.geo.len(), reverse = reverse.len(), "name table built");
        Ok(NameTable { geo: self.geo, codes, continents: self.continents, reverse, aggregates })
    }
}

/// Immutable mapping between economic names, boundary names and ISO3 codes.
#[derive(Debug)]
pub struct NameTable {
    geo: BTreeMap<String, String>,
    codes: BTreeMap<String, String>,
    continents: BTreeMap<String, Continent>,
    reverse: BTreeMap<String, BTreeSet<String>>,
    aggregates: Vec<Regex>,
}

impl NameTable {
    pub fn builder() -> NameTableBuilder {
        NameTableBuilder::new()
    }

    pub fn builtin() -> Result<Self> {
        NameTableBuilder::builtin().build()
    }

    /// Boundary name for `economic`, itself when unmapped.
    pub fn to_geo_name<'a>(&'a self, economic: &'a str) -> &'a str {
        self.geo.get(economic).map(String::as_str).unwrap_or(economic)
    }

    /// Economic name for a boundary feature.
    ///
    /// With several candidates an exact match wins, then the alphabetically
    /// first one. Unknown names map to themselves.
    pub fn to_economic_name<'a>(&'a self, geo: &'a str) -> &'a str {
        let Some(candidates) = self.reverse.get(geo) else {
            return geo;
        };
        if candidates.contains(geo) {
            return geo;
        }
        candidates.iter().next().map(String::as_str).unwrap_or(geo)
    }

    /// Like [`to_economic_name`](Self::to_economic_name) but prefers the
    /// candidate that has data in `store`.
    pub fn to_economic_name_in<'a>(&'a self, geo: &'a str, store: &SeriesStore) -> &'a str {
        let fallback = self.to_economic_name(geo);
        if store.contains_country(fallback) {
            return fallback;
        }
        self.reverse
            .get(geo)
            .and_then(|set| set.iter().find(|c| store.contains_country(c)))
            .map(String::as_str)
            .unwrap_or(fallback)
    }

    pub fn iso3(&self, economic: &str) -> Option<&str> {
        self.codes.get(economic).map(String::as_str)
    }

    pub fn identity(&self, economic: &str) -> CountryIdentity {
        CountryIdentity {
            economic_name: economic.to_string(),
            geo_name: self.geo.get(economic).cloned(),
            iso3: self.codes.get(economic).cloned(),
        }
    }

    /// Continent via economic name -> ISO3 -> continent. Aggregate rows never
    /// resolve.
    pub fn continent_of(&self, economic: &str) -> Option<Continent> {
        if !self.is_real_country(economic) {
            return None;
        }
        self.continents.get(self.iso3(economic)?).copied()
    }

    /// Heuristic: false for names matching any aggregate pattern.
    pub fn is_real_country(&self, economic: &str) -> bool {
        !self.aggregates.iter().any(|re| re.is_match(economic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Observation;

    fn table() -> NameTable {
        NameTableBuilder::builtin()
            .code("North Macedonia", "MKD")
            .code("United States", "USA")
            .code("World", "WLD")
            .code("Georgia", "GEO")
            .build()
            .unwrap()
    }

    #[test]
    fn geo_name_falls_back_to_identity() {
        let t = table();
        assert_eq!(t.to_geo_name("United States"), "USA");
        assert_eq!(t.to_geo_name("Georgia"), "Georgia");
        assert_eq!(t.to_economic_name("USA"), "United States");
        assert_eq!(t.to_economic_name("Narnia"), "Narnia");
    }

    #[test]
    fn ambiguous_reverse_lookup_is_alphabetical() {
        let t = table();
        assert_eq!(t.to_economic_name("Macedonia"), "Macedonia, FYR");
    }

    #[test]
    fn exact_match_wins_reverse_lookup() {
        let t = NameTable::builder()
            .rename("Old Georgia", "Georgia")
            .code("Georgia", "GEO")
            .build()
            .unwrap();
        assert_eq!(t.to_economic_name("Georgia"), "Georgia");
    }

    #[test]
    fn store_aware_lookup_prefers_active_name() {
        let t = table();
        let store = SeriesStore::build(vec![Observation::new("North Macedonia", 2010, 1.0)]).unwrap();
        assert_eq!(t.to_economic_name_in("Macedonia", &store), "North Macedonia");
    }

    #[test]
    fn continents_resolve_through_codes() {
        let t = table();
        assert_eq!(t.continent_of("North Macedonia"), Some(Continent::Europe));
        assert_eq!(t.continent_of("United States"), Some(Continent::NorthAmerica));
        assert_eq!(t.continent_of("World"), None);
        assert_eq!(t.continent_of("Unknownland"), None);
        assert_eq!(t.identity("United States").geo_name.as_deref(), Some("USA"));
    }

    #[test]
    fn aggregate_rows_are_not_countries() {
        let t = table();
        for name in [
            "World",
            "High income",
            "OECD members",
            "European Union",
            "Euro area",
            "Post-demographic dividend",
            "IDA total",
            "Latin America & Caribbean",
            "Sub-Saharan Africa (excluding high income)",
            "Caribbean small states",
        ] {
            assert!(!t.is_real_country(name), "{name}");
        }
        for name in ["Chad", "Korea, Rep.", "South Africa", "North Macedonia", "Trinidad and Tobago"] {
            assert!(t.is_real_country(name), "{name}");
        }
    }

    #[test]
    fn conflicting_codes_are_rejected() {
        let err = NameTable::builder().code("Chad", "TCD").code("Chad", "CHD").build().unwrap_err();
        assert!(matches!(err, AtlasError::NameConflict { .. }));
    }

    #[test]
    fn empty_codes_register_without_iso3() {
        let rows = vec![WideRow::new("Ex-Region").with_code("")];
        let t = NameTable::builder().codes_from_rows(&rows).build().unwrap();
        assert_eq!(t.iso3("Ex-Region"), None);
        assert_eq!(t.to_economic_name("Ex-Region"), "Ex-Region");
    }

    #[test]
    fn overrides_parse_from_json() {
        let json = br#"{"renames": {"Cabo Verde": "Cape Verde"}, "continents": {"CPV": "Africa"}}"#;
        let overrides: NameOverrides = serde_json::from_slice(json).unwrap();
        let t = NameTable::builder()
            .overrides(overrides)
            .code("Cabo Verde", "CPV")
            .build()
            .unwrap();
        assert_eq!(t.to_geo_name("Cabo Verde"), "Cape Verde");
        assert_eq!(t.continent_of("Cabo Verde"), Some(Continent::Africa));
    }

    #[test]
    fn override_codes_win_over_row_codes() {
        let overrides = NameOverrides {
            codes: BTreeMap::from([("Kosovo".to_string(), "XKX".to_string())]),
            ..NameOverrides::default()
        };
        let rows = vec![WideRow::new("Kosovo").with_code("KSV")];
        let t = NameTableBuilder::builtin()
            .overrides(overrides)
            .codes_from_rows(&rows)
            .build()
            .unwrap();
        assert_eq!(t.iso3("Kosovo"), Some("XKX"));
        assert_eq!(t.continent_of("Kosovo"), Some(Continent::Europe));
    }

    #[test]
    fn override_renames_replace_shipped_ones() {
        let overrides = NameOverrides {
            renames: BTreeMap::from([("Czechia".to_string(), "Czech Rep.".to_string())]),
            ..NameOverrides::default()
        };
        let t = NameTableBuilder::new()
            .rename("Czechia", "Czech Republic")
            .overrides(overrides)
            .build()
            .unwrap();
        assert_eq!(t.to_geo_name("Czechia"), "Czech Rep.");
    }
}
