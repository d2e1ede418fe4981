use crate::error::AnalyzerError;
use crate::normalize::{SCALE, normalize_metric};
use core_types::{MetricRecord, Polarity, PolarityTable};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// An entity together with its composite score and the per-metric parts of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRecord {
    pub entity_id: String,
    pub score: f64,
    /// Oriented 0-100 value per weighted metric, before weighting.
    pub components: BTreeMap<String, f64>,
}

/// Multi-metric comparison engine: normalizes, orients, weights and ranks.
#[derive(Debug, Clone)]
pub struct WeightedScorer {
    weights: BTreeMap<String, f64>,
    polarity: PolarityTable,
}

impl WeightedScorer {
    pub fn new(
        weights: BTreeMap<String, f64>,
        polarity: PolarityTable,
    ) -> Result<Self, AnalyzerError> {
        if weights.is_empty() {
            return Err(AnalyzerError::NoWeights);
        }
        if let Some((metric, weight)) = weights
            .iter()
            .find(|(_, weight)| !weight.is_finite() || **weight < 0.0)
        {
            return Err(AnalyzerError::InvalidWeight {
                metric: metric.clone(),
                weight: *weight,
            });
        }

        Ok(Self { weights, polarity })
    }

    /// Scores and ranks all records, best first.
    ///
    /// Each weighted metric is min-max normalized across the records and
    /// inverted for lower-is-better metrics so that 100 is always best.
    /// Absent values contribute 0. Ties keep their input order.
    pub fn rank(&self, records: &[MetricRecord]) -> Vec<RankedRecord> {
        let mut ranked: Vec<RankedRecord> = records
            .iter()
            .map(|r| RankedRecord {
                entity_id: r.entity_id.clone(),
                score: 0.0,
                components: BTreeMap::new(),
            })
            .collect();

        for (metric, weight) in &self.weights {
            let polarity = self.polarity.polarity(metric);
            let normalized = normalize_metric(records, metric);

            for (entry, value) in ranked.iter_mut().zip(normalized) {
                let oriented = match (value.normalized, polarity) {
                    (Some(n), Polarity::HigherIsBetter) => n,
                    (Some(n), Polarity::LowerIsBetter) => SCALE - n,
                    (None, _) => 0.0,
                };
                entry.components.insert(metric.clone(), oriented);
                entry.score += oriented * weight;
            }
        }

        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        tracing::info!(
            entities = ranked.len(),
            metrics = self.weights.len(),
            best = ranked.first().map(|r| r.entity_id.as_str()).unwrap_or("-"),
            "Scored entities."
        );
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(m, w)| (m.to_string(), *w)).collect()
    }

    #[test]
    fn rejects_empty_negative_and_nan_weights() {
        let table = PolarityTable::default();
        assert!(matches!(
            WeightedScorer::new(BTreeMap::new(), table.clone()),
            Err(AnalyzerError::NoWeights)
        ));
        assert!(matches!(
            WeightedScorer::new(weights(&[("sharpe", -1.0)]), table.clone()),
            Err(AnalyzerError::InvalidWeight { metric, .. }) if metric == "sharpe"
        ));
        assert!(WeightedScorer::new(weights(&[("sharpe", f64::NAN)]), table).is_err());
    }

    #[test]
    fn lower_is_better_metrics_are_inverted() {
        let records = vec![
            MetricRecord::new("risky").with_metric("return", 0.20).with_metric("drawdown", 0.40),
            MetricRecord::new("steady").with_metric("return", 0.10).with_metric("drawdown", 0.10),
        ];
        let scorer = WeightedScorer::new(
            weights(&[("return", 0.4), ("drawdown", 0.6)]),
            PolarityTable::new(["drawdown"]),
        )
        .unwrap();

        let ranked = scorer.rank(&records);
        assert_eq!(ranked[0].entity_id, "steady");
        assert_eq!(ranked[0].components["drawdown"], 100.0);
        assert_eq!(ranked[0].components["return"], 0.0);
        assert!((ranked[0].score - 60.0).abs() < 1e-9);
        assert!((ranked[1].score - 40.0).abs() < 1e-9);
    }

    #[test]
    fn absent_values_contribute_nothing_and_ties_are_stable() {
        let records = vec![
            MetricRecord::new("a"),
            MetricRecord::new("b").with_metric("sharpe", 1.0),
            MetricRecord::new("c"),
        ];
        let scorer =
            WeightedScorer::new(weights(&[("sharpe", 1.0)]), PolarityTable::default()).unwrap();
        let ids: Vec<String> = scorer.rank(&records).into_iter().map(|r| r.entity_id).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }
}
