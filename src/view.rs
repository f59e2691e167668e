use std::collections::BTreeSet;

use crate::error::{AtlasError, Result};
use crate::series::{Metric, SeriesStore};

pub const DEFAULT_YEAR: i32 = 2000;
pub const DEFAULT_RANGE: (i32, i32) = (2000, 2020);

/// Inclusive span of years with data in any loaded series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct YearSpan {
    pub min: i32,
    pub max: i32,
}

impl YearSpan {
    pub fn new(min: i32, max: i32) -> Result<Self> {
        if min > max {
            return Err(AtlasError::InvalidRange { start: min, end: max });
        }
        Ok(Self { min, max })
    }

    /// Union of the years present in `stores`.
    pub fn from_stores<'a, I>(stores: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a SeriesStore>,
    {
        let (min, max) = stores
            .into_iter()
            .filter_map(SeriesStore::year_bounds)
            .reduce(|(a_min, a_max), (b_min, b_max)| (a_min.min(b_min), a_max.max(b_max)))
            .ok_or(AtlasError::InsufficientData("a year span"))?;
        Ok(Self { min, max })
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }

    fn clamp(&self, year: i32) -> i32 {
        year.clamp(self.min, self.max)
    }
}

/// What the dashboard is currently looking at. Only the rendering layer
/// mutates this; queries take it by reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewParameters {
    metric: Metric,
    year: i32,
    range_start: i32,
    range_end: i32,
    selected: BTreeSet<String>,
    span: YearSpan,
}

impl ViewParameters {
    /// Defaults (GDP, 2000, 2000..=2020, nothing selected) clamped into `span`.
    ///
    /// A one-year span yields the degenerate range `(min, min)`. `set_range`
    /// has no valid input then and the range stays as constructed.
    pub fn new(span: YearSpan) -> Self {
        let mut range_start = span.clamp(DEFAULT_RANGE.0);
        let range_end = span.clamp(DEFAULT_RANGE.1);
        if range_start >= range_end {
            range_start = span.min;
        }
        Self {
            metric: Metric::Gdp,
            year: span.clamp(DEFAULT_YEAR),
            range_start,
            range_end,
            selected: BTreeSet::new(),
            span,
        }
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn range(&self) -> (i32, i32) {
        (self.range_start, self.range_end)
    }

    pub fn span(&self) -> YearSpan {
        self.span
    }

    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    pub fn is_selected(&self, country: &str) -> bool {
        self.selected.contains(country)
    }

    pub fn selection_len(&self) -> usize {
        self.selected.len()
    }

    pub fn set_metric(&mut self, metric: Metric) {
        self.metric = metric;
    }

    pub fn set_year(&mut self, year: i32) -> Result<()> {
        if !self.span.contains(year) {
            return Err(AtlasError::YearOutOfSpan { year, min: self.span.min, max: self.span.max });
        }
        self.year = year;
        Ok(())
    }

    /// Requires `start < end`, both inside the data span. On error nothing changes.
    pub fn set_range(&mut self, start: i32, end: i32) -> Result<()> {
        if start >= end || !self.span.contains(start) || !self.span.contains(end) {
            return Err(AtlasError::InvalidRange { start, end });
        }
        self.range_start = start;
        self.range_end = end;
        Ok(())
    }

    /// Flips membership; returns whether `country` is now selected.
    pub fn toggle_country(&mut self, country: &str) -> bool {
        if self.selected.remove(country) {
            false
        } else {
            self.selected.insert(country.to_string());
            true
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }
}
