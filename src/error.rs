use thiserror::Error;

/// Every failure the data core can report.
///
/// Cell-level `DataFormat` errors are recoverable and collected by the
/// transformer; `DuplicateObservation` aborts a store build; the remaining
/// query-time kinds go straight back to the caller.
#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("unparseable value {value:?} for {country} in column {column:?}")]
    DataFormat {
        country: String,
        column: String,
        value: String,
    },
    #[error("conflicting values for {country} in {year}: {existing} vs {incoming}")]
    DuplicateObservation {
        country: String,
        year: i32,
        existing: f64,
        incoming: f64,
    },
    #[error("column {column:?} appears more than once in the header")]
    DuplicateColumn { column: String },
    #[error("invalid year range {start}..={end}")]
    InvalidRange { start: i32, end: i32 },
    #[error("year {year} is outside the data span {min}..={max}")]
    YearOutOfSpan { year: i32, min: i32, max: i32 },
    #[error("no values to compute {0} over")]
    InsufficientData(&'static str),
    #[error("{country} has no value for {year}")]
    NoData { country: String, year: i32 },
    #[error("quantile {0} is outside [0, 1]")]
    InvalidQuantile(f64),
    #[error("{economic_name} is mapped to both {existing:?} and {incoming:?}")]
    NameConflict {
        economic_name: String,
        existing: String,
        incoming: String,
    },
    #[error("invalid aggregate pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),
}

pub type Result<T> = std::result::Result<T, AtlasError>;
