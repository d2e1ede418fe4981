//! Behavior tests for the factor contribution and correlation views.

use analytics::aggregation::{running_total, sort_by_timestamp};
use analytics::correlation::strongest;
use analytics::{
    CorrelationMatrix, Strength, classify_strength, cumulative_sum, cumulative_sum_from,
    final_totals,
};
use core_types::{ContributionPeriod, CorrelationResult, TimeSeriesPoint};

fn periods() -> Vec<ContributionPeriod> {
    serde_json::from_str(
        r#"[
            {"date":"2023-01-31","contributions":{"market":0.012,"size":-0.004,"value":0.001}},
            {"date":"2023-02-28","contributions":{"market":-0.020,"size":0.003}},
            {"date":"2023-03-31","contributions":{"market":0.015,"value":null,"momentum":0.007}},
            {"date":"2023-04-30","contributions":{"market":0.004,"size":0.002,"value":-0.006}},
            {"date":"2023-05-31","contributions":{}}
        ]"#,
    )
    .expect("fixture is valid JSON")
}

#[test]
fn continuing_from_a_prefix_equals_computing_over_the_whole_sequence() {
    let all = periods();

    for split in 0..=all.len() {
        let (head, tail) = all.split_at(split);

        let mut stitched = cumulative_sum(head);
        let seed = final_totals(&stitched);
        stitched.extend(cumulative_sum_from(&seed, tail));

        assert_eq!(stitched, cumulative_sum(&all), "split at {split}");
    }
}

#[test]
fn last_point_holds_the_total_contribution_of_every_factor() {
    let points = cumulative_sum(&periods());
    let last = points.last().unwrap();

    assert_eq!(points.len(), 5);
    assert_eq!(last.timestamp, "2023-05-31");
    assert!((last.totals["market"] - 0.011).abs() < 1e-12);
    assert!((last.totals["size"] - 0.001).abs() < 1e-12);
    assert!((last.totals["value"] + 0.005).abs() < 1e-12);
    assert!((last.totals["momentum"] - 0.007).abs() < 1e-12);
    assert_eq!(points[3].totals, last.totals);
}

#[test]
fn unsorted_series_can_be_sorted_then_accumulated() {
    let mut points = vec![
        TimeSeriesPoint::new("2023-01-03", 3.0),
        TimeSeriesPoint::new("2023-01-01", 1.0),
        TimeSeriesPoint::new("2023-01-02", 2.0),
    ];
    sort_by_timestamp(&mut points);
    let totals: Vec<f64> = running_total(&points).iter().map(|p| p.value).collect();
    assert_eq!(totals, vec![1.0, 3.0, 6.0]);
}

#[test]
fn strength_holds_on_both_sides_of_the_thresholds() {
    for c in [-1.0, -0.85, -0.7, 0.7, 0.71, 0.99, 1.0] {
        assert_eq!(classify_strength(c), Strength::Strong, "{c}");
    }
    for c in [-0.2999, -0.1, 0.0, 0.1, 0.29] {
        assert_eq!(classify_strength(c), Strength::Weak, "{c}");
    }
    for c in [-0.69, -0.3, 0.3, 0.5, 0.6999] {
        assert_eq!(classify_strength(c), Strength::Moderate, "{c}");
    }
}

#[test]
fn correlation_payload_feeds_table_and_heatmap() {
    let results: Vec<CorrelationResult> = serde_json::from_str(
        r#"[
            {"event_type":"earnings_beat","metric":"revenue_growth","coefficient":0.72,"p_value":0.0004,"sample_size":40},
            {"event_type":"earnings_miss","metric":"revenue_growth","coefficient":-0.35,"p_value":0.04,"sample_size":40},
            {"event_type":"earnings_beat","metric":"net_margin","coefficient":0.05,"p_value":0.7,"sample_size":40}
        ]"#,
    )
    .unwrap();

    let table = strongest(&results, 2);
    assert_eq!(table.len(), 2);
    assert_eq!(table[0].strength.to_string(), "Strong");
    assert_eq!(table[0].significance.to_string(), "Highly Significant");
    assert_eq!(table[1].significance.to_string(), "Significant");

    let matrix = CorrelationMatrix::build(&results);
    assert_eq!(matrix.get("earnings_miss", "net_margin"), None);
    assert_eq!(matrix.get("earnings_beat", "net_margin"), Some(0.05));
}
