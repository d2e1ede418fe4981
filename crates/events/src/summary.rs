use core_types::Event;
use serde::Serialize;

/// Impact statistics of one event type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeImpactSummary {
    pub event_type: String,
    pub count: usize,
    /// Events carrying a finite impact score.
    pub scored: usize,
    pub mean_impact: Option<f64>,
    pub median_impact: Option<f64>,
    pub positive: usize,
    pub negative: usize,
}

/// Summarizes impact scores per event type, in first-appearance order.
///
/// The median is the upper median (element `len / 2` of the sorted scores).
pub fn summarize_by_type(events: &[Event]) -> Vec<TypeImpactSummary> {
    let mut order: Vec<&str> = Vec::new();
    let mut buckets: Vec<(usize, Vec<f64>)> = Vec::new();

    for event in events {
        let slot = match order.iter().position(|t| *t == event.event_type) {
            Some(slot) => slot,
            None => {
                order.push(&event.event_type);
                buckets.push((0, Vec::new()));
                order.len() - 1
            }
        };
        let (count, scores) = &mut buckets[slot];
        *count += 1;
        if let Some(score) = event.impact_score.filter(|s| s.is_finite()) {
            scores.push(score);
        }
    }

    order
        .into_iter()
        .zip(buckets)
        .map(|(event_type, (count, mut scores))| {
            scores.sort_by(f64::total_cmp);
            let mean_impact =
                (!scores.is_empty()).then(|| scores.iter().sum::<f64>() / scores.len() as f64);
            TypeImpactSummary {
                event_type: event_type.to_string(),
                count,
                scored: scores.len(),
                mean_impact,
                median_impact: scores.get(scores.len() / 2).copied(),
                positive: scores.iter().filter(|s| **s > 0.0).count(),
                negative: scores.iter().filter(|s| **s < 0.0).count(),
            }
        })
        .collect()
}
