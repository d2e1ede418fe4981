use crate::dates::parse_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One model, company or asset together with its measured values.
///
/// A metric that is missing, `null` or `NaN` is absent. It is never read as zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricRecord {
    #[serde(alias = "entityId")]
    pub entity_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metrics: BTreeMap<String, Option<f64>>,
}

impl MetricRecord {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            metrics: BTreeMap::new(),
        }
    }

    pub fn with_metric(mut self, metric: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(metric.into(), Some(value));
        self
    }

    /// The comparable value of `metric`, or `None` when it is absent or `NaN`.
    pub fn value(&self, metric: &str) -> Option<f64> {
        self.metrics
            .get(metric)
            .copied()
            .flatten()
            .filter(|value| !value.is_nan())
    }
}

/// The correlation between an event type and a fundamental metric, as computed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    #[serde(alias = "eventType")]
    pub event_type: String,
    pub metric: String,
    pub coefficient: f64,
    #[serde(alias = "pValue")]
    pub p_value: f64,
    #[serde(default, alias = "sampleSize")]
    pub sample_size: u64,
}

impl CorrelationResult {
    pub fn new(
        event_type: impl Into<String>,
        metric: impl Into<String>,
        coefficient: f64,
        p_value: f64,
        sample_size: u64,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            metric: metric.into(),
            coefficient,
            p_value,
            sample_size,
        }
    }
}

/// A single observation of a time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    #[serde(alias = "date")]
    pub timestamp: String,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(timestamp: impl Into<String>, value: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            value,
        }
    }

    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}

/// Per-factor contributions of a single period, e.g. one row of a factor attribution table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContributionPeriod {
    #[serde(alias = "date")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contributions: BTreeMap<String, Option<f64>>,
}

impl ContributionPeriod {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            contributions: BTreeMap::new(),
        }
    }

    pub fn with_contribution(mut self, factor: impl Into<String>, value: f64) -> Self {
        self.contributions.insert(factor.into(), Some(value));
        self
    }
}

/// A detected financial event (earnings, dividend, news, technical signal...).
///
/// Events are immutable once fetched. The raw `date` string is kept exactly as
/// received and parsed on demand with [`Event::timestamp`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: String,
    #[serde(alias = "type", alias = "eventType")]
    pub event_type: String,
    pub date: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, alias = "impactScore")]
    pub impact_score: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Map<String, Value>,
}

impl Event {
    pub fn new(id: impl Into<String>, event_type: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            event_type: event_type.into(),
            date: date.into(),
            ..Self::default()
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_impact(mut self, impact_score: f64) -> Self {
        self.impact_score = Some(impact_score);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// The event date as a UTC instant, or `None` if the backend sent something unparseable.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.date)
    }
}

/// Treats an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
