use core_types::{MetricRecord, Polarity, PolarityTable};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// The winning entity for one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Best {
    pub entity_id: String,
    pub value: f64,
    /// Position of the winner in the input slice.
    pub index: usize,
}

/// One row of a per-metric leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntity {
    /// 1-based rank, `None` for entities without a comparable value.
    pub rank: Option<usize>,
    pub entity_id: String,
    pub value: Option<f64>,
}

/// Selects the entity with the optimal value of `metric`.
///
/// A record only replaces the current best on a strict improvement, so the
/// first one in input order wins a tie. Records where the metric is missing or
/// `NaN` are disqualified. Returns `None` when no record has a comparable
/// value, which includes an empty input.
pub fn best_by_metric(records: &[MetricRecord], metric: &str, polarity: Polarity) -> Option<Best> {
    let mut best: Option<Best> = None;

    for (index, record) in records.iter().enumerate() {
        let Some(value) = record.value(metric) else {
            tracing::debug!(entity = %record.entity_id, metric, "No comparable value, disqualified.");
            continue;
        };

        let improves = best
            .as_ref()
            .is_none_or(|current| polarity.improves(value, current.value));
        if improves {
            best = Some(Best {
                entity_id: record.entity_id.clone(),
                value,
                index,
            });
        }
    }

    best
}

/// Evaluates [`best_by_metric`] independently for every metric.
pub fn best_per_metric<S: AsRef<str>>(
    records: &[MetricRecord],
    metrics: &[S],
    table: &PolarityTable,
) -> BTreeMap<String, Option<Best>> {
    metrics
        .iter()
        .map(|metric| {
            let metric = metric.as_ref();
            (
                metric.to_string(),
                best_by_metric(records, metric, table.polarity(metric)),
            )
        })
        .collect()
}

/// Orders all entities by `metric`, best first.
///
/// Ties share neither rank nor order: they keep their input order and get
/// consecutive ranks. Entities without a comparable value come last, unranked.
pub fn rank_by_metric(records: &[MetricRecord], metric: &str, polarity: Polarity) -> Vec<RankedEntity> {
    let mut ordered: Vec<(&MetricRecord, Option<f64>)> =
        records.iter().map(|r| (r, r.value(metric))).collect();

    ordered.sort_by(|(_, a), (_, b)| match (a, b) {
        (Some(a), Some(b)) => match polarity {
            Polarity::HigherIsBetter => b.partial_cmp(a).unwrap_or(Ordering::Equal),
            Polarity::LowerIsBetter => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    ordered
        .into_iter()
        .enumerate()
        .map(|(position, (record, value))| RankedEntity {
            rank: value.map(|_| position + 1),
            entity_id: record.entity_id.clone(),
            value,
        })
        .collect()
}
