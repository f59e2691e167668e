use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use geojson::GeoJson;
use tracing::info;

use crate::boundary::{BoundaryFeature, features_from_geojson};
use crate::config::AtlasConfig;
use crate::error::{AtlasError, Result};
use crate::names::{NameOverrides, NameTable, NameTableBuilder};
use crate::series::{Metric, SeriesStore};
use crate::transform::{TransformOptions, WideRow, transform};
use crate::view::YearSpan;

pub const COUNTRY_NAME: &str = "Country Name";
pub const COUNTRY_CODE: &str = "Country Code";

/// Where raw rows and boundary features come from.
pub trait DataSource {
    fn wide_rows(&self, metric: Metric) -> Result<Vec<WideRow>>;
    fn boundaries(&self) -> Result<Vec<BoundaryFeature>>;
}

/// Reads the CSV exports and the GeoJSON file from one directory.
pub struct CsvDirectory {
    base: PathBuf,
    gdp_file: String,
    internet_file: String,
    boundaries_file: String,
    skip_lines: usize,
}

impl CsvDirectory {
    pub fn new<P: AsRef<Path>>(base: P) -> Self {
        Self::from_config(base, &AtlasConfig::default())
    }

    pub fn from_config<P: AsRef<Path>>(base: P, config: &AtlasConfig) -> Self {
        Self {
            base: base.as_ref().to_path_buf(),
            gdp_file: config.gdp_file.clone(),
            internet_file: config.internet_file.clone(),
            boundaries_file: config.boundaries_file.clone(),
            skip_lines: config.skip_lines,
        }
    }

    fn file_for(&self, metric: Metric) -> PathBuf {
        self.base.join(match metric {
            Metric::Gdp => &self.gdp_file,
            Metric::Internet => &self.internet_file,
        })
    }
}

/// Parses wide CSV text whose header names the country columns and one
/// column per year. A repeated non-empty header is an error.
pub fn read_wide_csv(text: &str, skip_lines: usize) -> Result<Vec<WideRow>> {
    let body = text.splitn(skip_lines + 1, '\n').last().unwrap_or("");
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(body.as_bytes());
    let headers = reader.headers()?.clone();

    let mut seen = HashSet::new();
    for header in headers.iter().map(str::trim).filter(|h| !h.is_empty()) {
        if !seen.insert(header) {
            return Err(AtlasError::DuplicateColumn { column: header.to_string() });
        }
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = WideRow::default();
        for (header, cell) in headers.iter().zip(record.iter()) {
            match header.trim() {
                COUNTRY_NAME => row.country_name = cell.trim().to_string(),
                COUNTRY_CODE => row.country_code = Some(cell.trim().to_string()),
                other => {
                    row.cells.insert(other.to_string(), cell.to_string());
                }
            }
        }
        if !row.country_name.is_empty() {
            rows.push(row);
        }
    }
    Ok(rows)
}

impl DataSource for CsvDirectory {
    fn wide_rows(&self, metric: Metric) -> Result<Vec<WideRow>> {
        let text = fs::read_to_string(self.file_for(metric))?;
        read_wide_csv(&text, self.skip_lines)
    }

    fn boundaries(&self) -> Result<Vec<BoundaryFeature>> {
        let txt = fs::read_to_string(self.base.join(&self.boundaries_file))?;
        features_from_geojson(GeoJson::from_str(&txt)?)
    }
}

/// Everything the dashboard queries: both metric stores, the name table,
/// the boundary features and the year span they cover.
#[derive(Debug)]
pub struct Atlas {
    pub gdp: SeriesStore,
    pub internet: SeriesStore,
    pub names: NameTable,
    pub boundaries: Vec<BoundaryFeature>,
    pub span: YearSpan,
    /// Cells skipped as unparseable across both metrics.
    pub rejected_cells: usize,
}

impl Atlas {
    /// Loads the three sources concurrently, then builds both stores
    /// concurrently. Any failure fails the whole load.
    pub fn load<S>(source: &S, config: &AtlasConfig) -> Result<Self>
    where
        S: DataSource + Sync,
    {
        let (gdp_rows, (internet_rows, boundaries)) = rayon::join(
            || source.wide_rows(Metric::Gdp),
            || rayon::join(|| source.wide_rows(Metric::Internet), || source.boundaries()),
        );
        let (gdp_rows, internet_rows, boundaries) = (gdp_rows?, internet_rows?, boundaries?);

        let mut names = NameTableBuilder::builtin();
        if let Some(path) = config.names_path() {
            names = names.overrides(NameOverrides::load(path)?);
        }
        Self::from_parts(gdp_rows, internet_rows, boundaries, names, &config.transform_options())
    }

    pub fn from_parts(
        gdp_rows: Vec<WideRow>,
        internet_rows: Vec<WideRow>,
        boundaries: Vec<BoundaryFeature>,
        names: NameTableBuilder,
        options: &TransformOptions,
    ) -> Result<Self> {
        let names = names.codes_from_rows(&gdp_rows).codes_from_rows(&internet_rows).build()?;

        let build = |rows: &[WideRow]| -> Result<(SeriesStore, usize)> {
            let long = transform(rows, options);
            Ok((SeriesStore::build(long.observations)?, long.rejected.len()))
        };
        let (gdp, internet) = rayon::join(|| build(&gdp_rows), || build(&internet_rows));
        let ((gdp, gdp_rejected), (internet, internet_rejected)) = (gdp?, internet?);

        let span = YearSpan::from_stores([&gdp, &internet])?;
        info!(
            gdp_countries = gdp.country_count(),
            internet_countries = internet.country_count(),
            boundaries = boundaries.len(),
            span_min = span.min,
            span_max = span.max,
            "atlas loaded"
        );
        Ok(Self {
            gdp,
            internet,
            names,
            boundaries,
            span,
            rejected_cells: gdp_rejected + internet_rejected,
        })
    }

    pub fn store(&self, metric: Metric) -> &SeriesStore {
        match metric {
            Metric::Gdp => &self.gdp,
            Metric::Internet => &self.internet,
        }
    }

    /// Economic name behind a boundary feature, preferring the one with data.
    pub fn economic_name<'a>(&'a self, geo: &'a str, metric: Metric) -> &'a str {
        self.names.to_economic_name_in(geo, self.store(metric))
    }

    /// Real countries with data for `metric`, by name.
    pub fn countries(&self, metric: Metric) -> Vec<&str> {
        self.store(metric)
            .countries()
            .filter(|c| self.names.is_real_country(c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AtlasError;

    struct MemorySource {
        gdp: Vec<WideRow>,
        internet: Vec<WideRow>,
    }

    impl DataSource for MemorySource {
        fn wide_rows(&self, metric: Metric) -> Result<Vec<WideRow>> {
            Ok(match metric {
                Metric::Gdp => self.gdp.clone(),
                Metric::Internet => self.internet.clone(),
            })
        }

        fn boundaries(&self) -> Result<Vec<BoundaryFeature>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn parses_world_bank_layout() {
        let text = "\"Data Source\",\"World Development Indicators\",\n\n\
                    \"Country Name\",\"Country Code\",\"Indicator Name\",\"2000\",\"2001\",\n\
                    \"Chad\",\"TCD\",\"GDP\",\"..\",\"100\",\n\
                    \"\",\"\",\"\",\"\",\"\",\n";
        let rows = read_wide_csv(text, 2).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].country_name, "Chad");
        assert_eq!(rows[0].country_code.as_deref(), Some("TCD"));
        assert_eq!(rows[0].cells["2001"], "100");
    }

    #[test]
    fn repeated_year_column_is_rejected() {
        let err = read_wide_csv("Country Name,Country Code,2000,2000\nChad,TCD,1,2\n", 0).unwrap_err();
        assert!(matches!(err, AtlasError::DuplicateColumn { column } if column == "2000"));
    }

    #[test]
    fn load_builds_both_stores_and_codes() {
        let source = MemorySource {
            gdp: vec![
                WideRow::new("Chad").with_code("TCD").with_cell("2001", "100"),
                WideRow::new("World").with_code("WLD").with_cell("2001", "9999"),
            ],
            internet: vec![WideRow::new("Chad").with_code("TCD").with_cell("2005", "2.5").with_cell("2006", "x")],
        };
        let atlas = Atlas::load(&source, &AtlasConfig::default()).unwrap();
        assert_eq!(atlas.gdp.get("Chad", 2001), Some(100.0));
        assert_eq!(atlas.store(Metric::Internet).get("Chad", 2005), Some(2.5));
        assert_eq!(atlas.span, YearSpan { min: 2001, max: 2005 });
        assert_eq!(atlas.rejected_cells, 1);
        assert_eq!(atlas.countries(Metric::Gdp), vec!["Chad"]);
        assert_eq!(atlas.names.continent_of("Chad"), Some(crate::names::Continent::Africa));
    }

    #[test]
    fn conflicting_rows_abort_the_load() {
        let source = MemorySource {
            gdp: vec![
                WideRow::new("Chad").with_cell("2001", "100"),
                WideRow::new("Chad").with_cell("2001", "101"),
            ],
            internet: vec![],
        };
        let err = Atlas::load(&source, &AtlasConfig::default()).unwrap_err();
        assert!(matches!(err, AtlasError::DuplicateObservation { .. }));
    }
}
