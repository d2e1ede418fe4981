use crate::dates::{end_of_day, start_of_day};
use crate::error::CoreError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

/// An inclusive numeric interval. Always satisfies `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    min: f64,
    max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Result<Self, CoreError> {
        if min.is_nan() || max.is_nan() {
            return Err(CoreError::InvalidInput(
                "value range".to_string(),
                "bounds must not be NaN".to_string(),
            ));
        }
        if min > max {
            return Err(CoreError::InvertedRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Inclusive on both ends. `NaN` is never contained.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// The full impact score domain, `[-1, 1]`.
impl Default for ValueRange {
    fn default() -> Self {
        Self { min: -1.0, max: 1.0 }
    }
}

/// An inclusive range of instants. `None` leaves that side unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DateRange {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Self, CoreError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(CoreError::InvalidInput(
                    "date range".to_string(),
                    format!("start {start} is after end {end}"),
                ));
            }
        }
        Ok(Self { start, end })
    }

    /// Builds a range from calendar days, covering the whole `end` day.
    pub fn from_days(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, CoreError> {
        Self::new(start.map(start_of_day), end.map(end_of_day))
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        let after_start = self.start.is_none_or(|start| *instant >= start);
        let before_end = self.end.is_none_or(|end| *instant <= end);
        after_start && before_end
    }
}

/// The state of an event filter panel. Built fresh for every interaction.
///
/// Empty sets mean "no restriction". The default criteria let every event with
/// a parseable or unparseable date through, as long as its impact score (if any)
/// lies in `[-1, 1]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FilterCriteria {
    pub allowed_types: BTreeSet<String>,
    pub value_range: ValueRange,
    pub date_range: Option<DateRange>,
    pub symbols: BTreeSet<String>,
    pub min_abs_impact: Option<f64>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_value_range(mut self, value_range: ValueRange) -> Self {
        self.value_range = value_range;
        self
    }

    pub fn with_date_range(mut self, date_range: DateRange) -> Self {
        self.date_range = Some(date_range);
        self
    }

    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_min_abs_impact(mut self, min_abs_impact: f64) -> Self {
        self.min_abs_impact = Some(min_abs_impact);
        self
    }
}
