use core_types::MetricRecord;
use serde::Serialize;

/// Upper end of the normalized scale.
pub const SCALE: f64 = 100.0;
/// Value given to every entity when all of them report the same number.
pub const NEUTRAL: f64 = 50.0;

/// A normalized value paired with the raw value it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedValue {
    pub entity_id: String,
    pub raw: Option<f64>,
    pub normalized: Option<f64>,
}

/// One axis of a radar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarAxis {
    pub metric: String,
    pub values: Vec<NormalizedValue>,
}

/// Finds the min and max of the finite values, or `None` if there are none.
pub fn find_min_max<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
}

/// Normalizes a value to a 0-100 scale.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if min == max {
        return NEUTRAL; // Avoid division by zero if all values are the same
    }
    // Halving first keeps `max - min` finite across the whole f64 range.
    (value / 2.0 - min / 2.0) / (max / 2.0 - min / 2.0) * SCALE
}

/// Min-max normalizes `metric` across `records`, in input order.
///
/// Entities without a finite value keep their raw value (if any) and get no
/// normalized value.
pub fn normalize_metric(records: &[MetricRecord], metric: &str) -> Vec<NormalizedValue> {
    let bounds = find_min_max(records.iter().filter_map(|r| r.value(metric)));

    records
        .iter()
        .map(|record| {
            let raw = record.value(metric);
            let normalized = match (raw, bounds) {
                (Some(value), Some((min, max))) if value.is_finite() => {
                    Some(normalize(value, min, max))
                }
                _ => None,
            };
            NormalizedValue {
                entity_id: record.entity_id.clone(),
                raw,
                normalized,
            }
        })
        .collect()
}

/// One axis per metric, each normalized independently.
pub fn radar_profile<S: AsRef<str>>(records: &[MetricRecord], metrics: &[S]) -> Vec<RadarAxis> {
    metrics
        .iter()
        .map(|metric| RadarAxis {
            metric: metric.as_ref().to_string(),
            values: normalize_metric(records, metric.as_ref()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(values: &[NormalizedValue]) -> Vec<Option<f64>> {
        values.iter().map(|v| v.normalized).collect()
    }

    #[test]
    fn spreads_values_over_zero_to_one_hundred() {
        let records = vec![
            MetricRecord::new("a").with_metric("roe", 10.0),
            MetricRecord::new("b").with_metric("roe", 20.0),
            MetricRecord::new("c").with_metric("roe", 15.0),
        ];
        let values = normalize_metric(&records, "roe");
        assert_eq!(normalized(&values), vec![Some(0.0), Some(100.0), Some(50.0)]);
        assert_eq!(values[1].raw, Some(20.0));
        assert_eq!(values[1].entity_id, "b");
    }

    #[test]
    fn extreme_spreads_stay_on_the_scale() {
        let records = vec![
            MetricRecord::new("low").with_metric("market_cap", -1e308),
            MetricRecord::new("high").with_metric("market_cap", 1e308),
            MetricRecord::new("mid").with_metric("market_cap", 0.0),
        ];
        assert_eq!(
            normalized(&normalize_metric(&records, "market_cap")),
            vec![Some(0.0), Some(100.0), Some(50.0)]
        );
    }

    #[test]
    fn identical_values_are_all_fifty() {
        let records = vec![
            MetricRecord::new("a").with_metric("beta", 1.2),
            MetricRecord::new("b").with_metric("beta", 1.2),
        ];
        assert_eq!(
            normalized(&normalize_metric(&records, "beta")),
            vec![Some(50.0), Some(50.0)]
        );

        let single = vec![MetricRecord::new("solo").with_metric("beta", -3.0)];
        assert_eq!(normalized(&normalize_metric(&single, "beta")), vec![Some(50.0)]);
    }

    #[test]
    fn absent_values_stay_absent() {
        let records = vec![
            MetricRecord::new("a").with_metric("pe", 12.0),
            MetricRecord::new("b"),
            MetricRecord::new("c").with_metric("pe", f64::NAN),
            MetricRecord::new("d").with_metric("pe", 24.0),
            MetricRecord::new("e").with_metric("pe", f64::INFINITY),
        ];
        let values = normalize_metric(&records, "pe");
        assert_eq!(
            normalized(&values),
            vec![Some(0.0), None, None, Some(100.0), None]
        );
        assert_eq!(values[4].raw, Some(f64::INFINITY));
    }

    #[test]
    fn nothing_comparable_means_nothing_normalized() {
        let records = vec![MetricRecord::new("a"), MetricRecord::new("b")];
        assert_eq!(normalized(&normalize_metric(&records, "pe")), vec![None, None]);
        assert!(normalize_metric(&[], "pe").is_empty());
    }

    #[test]
    fn radar_axes_are_independent() {
        let records = vec![
            MetricRecord::new("a").with_metric("x", 1.0).with_metric("y", 5.0),
            MetricRecord::new("b").with_metric("x", 3.0).with_metric("y", 5.0),
        ];
        let axes = radar_profile(&records, &["x", "y"]);
        assert_eq!(axes[0].metric, "x");
        assert_eq!(normalized(&axes[0].values), vec![Some(0.0), Some(100.0)]);
        assert_eq!(normalized(&axes[1].values), vec![Some(50.0), Some(50.0)]);
    }
}
