use core_types::{ContributionPeriod, TimeSeriesPoint};
use serde::Serialize;
use std::collections::BTreeMap;

/// Running per-factor totals after one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CumulativePoint {
    pub timestamp: String,
    pub totals: BTreeMap<String, f64>,
}

/// Running totals per factor, starting from zero.
///
/// One output point per input period, strictly in input order. A factor shows
/// up from the first period that mentions it. Missing or non-finite
/// contributions add nothing.
pub fn cumulative_sum(periods: &[ContributionPeriod]) -> Vec<CumulativePoint> {
    cumulative_sum_from(&BTreeMap::new(), periods)
}

/// Continues running totals from `seed`, e.g. the last totals of an earlier page.
///
/// `cumulative_sum(A ++ B)` equals `cumulative_sum(A)` followed by
/// `cumulative_sum_from(final_totals(cumulative_sum(A)), B)`.
pub fn cumulative_sum_from(
    seed: &BTreeMap<String, f64>,
    periods: &[ContributionPeriod],
) -> Vec<CumulativePoint> {
    let mut totals = seed.clone();

    periods
        .iter()
        .map(|period| {
            for (factor, contribution) in &period.contributions {
                let total = totals.entry(factor.clone()).or_insert(0.0);
                match contribution {
                    Some(value) if value.is_finite() => *total += value,
                    _ => tracing::debug!(
                        factor = %factor,
                        timestamp = %period.timestamp,
                        "Skipping missing or non-finite contribution."
                    ),
                }
            }
            CumulativePoint {
                timestamp: period.timestamp.clone(),
                totals: totals.clone(),
            }
        })
        .collect()
}

/// The totals of the last point, or nothing for an empty sequence.
pub fn final_totals(points: &[CumulativePoint]) -> BTreeMap<String, f64> {
    points
        .last()
        .map(|point| point.totals.clone())
        .unwrap_or_default()
}

/// Running total of a single series. `NaN` observations carry the previous total.
pub fn running_total(points: &[TimeSeriesPoint]) -> Vec<TimeSeriesPoint> {
    let mut total = 0.0;
    points
        .iter()
        .map(|point| {
            if !point.value.is_nan() {
                total += point.value;
            }
            TimeSeriesPoint::new(point.timestamp.clone(), total)
        })
        .collect()
}

/// Sorts ascending by timestamp. Ties keep their insertion order and
/// unparseable timestamps go last.
pub fn sort_by_timestamp(points: &mut [TimeSeriesPoint]) {
    points.sort_by_cached_key(|point| {
        let parsed = point.parsed_timestamp();
        (parsed.is_none(), parsed)
    });
}
