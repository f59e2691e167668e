//! Data core of the indicator atlas: reconciles GDP and internet-usage
//! exports with boundary names and serves the per-country, per-continent and
//! per-year queries the dashboard draws from.

pub mod aggregate;
pub mod boundary;
pub mod config;
pub mod country_tables;
pub mod data;
pub mod derived;
pub mod error;
pub mod names;
pub mod series;
pub mod similarity;
pub mod transform;
pub mod view;

pub use aggregate::{
    ContinentAggregate, DomainPolicy, DomainScope, PercentileBounds, Population, Statistic, color_domain,
    continent_average, continent_series, percentile,
};
pub use config::AtlasConfig;
pub use data::{Atlas, CsvDirectory, DataSource};
pub use error::{AtlasError, Result};
pub use names::{Continent, CountryIdentity, NameTable, NameTableBuilder};
pub use series::{Metric, SeriesStore};
pub use similarity::{SimilarCountry, rank_by_similarity, suggest_similar};
pub use transform::{Observation, TransformOptions, WideRow, transform};
pub use view::{ViewParameters, YearSpan};
