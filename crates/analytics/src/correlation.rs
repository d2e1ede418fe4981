use core_types::CorrelationResult;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// `|c|` at or above this is at least Moderate.
pub const MODERATE_THRESHOLD: f64 = 0.3;
/// `|c|` at or above this is Strong.
pub const STRONG_THRESHOLD: f64 = 0.7;

/// The p-value below which the backend flags a result as significant.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Qualitative strength of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Strength {
    Weak,
    Moderate,
    Strong,
}

/// Qualitative significance of a p-value, from most to least significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Significance {
    #[serde(rename = "Highly Significant")]
    HighlySignificant,
    #[serde(rename = "Very Significant")]
    VerySignificant,
    #[serde(rename = "Significant")]
    Significant,
    #[serde(rename = "Marginally Significant")]
    MarginallySignificant,
    #[serde(rename = "Not Significant")]
    NotSignificant,
}

/// Sign of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    Positive,
    Negative,
    None,
}

/// Classifies `|coefficient|`. Values outside `[-1, 1]` use the same
/// thresholds and `NaN` is Weak.
pub fn classify_strength(coefficient: f64) -> Strength {
    let magnitude = coefficient.abs();
    if magnitude >= STRONG_THRESHOLD {
        Strength::Strong
    } else if magnitude >= MODERATE_THRESHOLD {
        Strength::Moderate
    } else {
        Strength::Weak
    }
}

/// Classifies a p-value. `NaN` falls through to Not Significant.
pub fn classify_significance(p_value: f64) -> Significance {
    if p_value < 0.001 {
        Significance::HighlySignificant
    } else if p_value < 0.01 {
        Significance::VerySignificant
    } else if p_value < 0.05 {
        Significance::Significant
    } else if p_value < 0.1 {
        Significance::MarginallySignificant
    } else {
        Significance::NotSignificant
    }
}

pub fn direction(coefficient: f64) -> Direction {
    if coefficient > 0.0 {
        Direction::Positive
    } else if coefficient < 0.0 {
        Direction::Negative
    } else {
        Direction::None
    }
}

impl Strength {
    pub fn label(&self) -> &'static str {
        match self {
            Strength::Weak => "Weak",
            Strength::Moderate => "Moderate",
            Strength::Strong => "Strong",
        }
    }
}

impl Significance {
    pub fn label(&self) -> &'static str {
        match self {
            Significance::HighlySignificant => "Highly Significant",
            Significance::VerySignificant => "Very Significant",
            Significance::Significant => "Significant",
            Significance::MarginallySignificant => "Marginally Significant",
            Significance::NotSignificant => "Not Significant",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Significance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A correlation result decorated with everything a correlation table displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedCorrelation {
    #[serde(flatten)]
    pub result: CorrelationResult,
    pub strength: Strength,
    pub significance: Significance,
    pub direction: Direction,
    pub is_significant: bool,
}

impl From<&CorrelationResult> for ClassifiedCorrelation {
    fn from(result: &CorrelationResult) -> Self {
        Self {
            result: result.clone(),
            strength: classify_strength(result.coefficient),
            significance: classify_significance(result.p_value),
            direction: direction(result.coefficient),
            is_significant: result.p_value < SIGNIFICANCE_LEVEL,
        }
    }
}

/// Returns the `limit` results with the largest `|coefficient|`, classified.
///
/// The sort is stable, so equally strong results keep their input order.
/// `NaN` coefficients sink to the end.
pub fn strongest(results: &[CorrelationResult], limit: usize) -> Vec<ClassifiedCorrelation> {
    let mut ordered: Vec<&CorrelationResult> = results.iter().collect();
    ordered.sort_by(|a, b| by_magnitude_desc(a.coefficient, b.coefficient));
    ordered
        .into_iter()
        .take(limit)
        .map(ClassifiedCorrelation::from)
        .collect()
}

fn by_magnitude_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => b.abs().total_cmp(&a.abs()),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => Ordering::Equal,
    }
}

/// An event-type by metric grid of coefficients, as shown in a heatmap.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CorrelationMatrix {
    pub event_types: Vec<String>,
    pub metrics: Vec<String>,
    /// `cells[row][column]`, `None` where the backend reported nothing.
    pub cells: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Rows and columns appear in first-seen order. A repeated
    /// `(event_type, metric)` pair overwrites the earlier coefficient.
    pub fn build(results: &[CorrelationResult]) -> Self {
        let mut matrix = Self::default();

        for result in results {
            let row = position_or_push(&mut matrix.event_types, &result.event_type);
            let column = position_or_push(&mut matrix.metrics, &result.metric);

            if row == matrix.cells.len() {
                matrix.cells.push(Vec::new());
            }
            for cells in &mut matrix.cells {
                cells.resize(matrix.metrics.len(), None);
            }
            matrix.cells[row][column] = Some(result.coefficient);
        }

        matrix
    }

    pub fn get(&self, event_type: &str, metric: &str) -> Option<f64> {
        let row = self.event_types.iter().position(|t| t == event_type)?;
        let column = self.metrics.iter().position(|m| m == metric)?;
        self.cells[row][column]
    }
}

fn position_or_push(keys: &mut Vec<String>, key: &str) -> usize {
    match keys.iter().position(|k| k == key) {
        Some(index) => index,
        None => {
            keys.push(key.to_string());
            keys.len() - 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strength_boundaries_follow_the_inequalities() {
        assert_eq!(classify_strength(0.0), Strength::Weak);
        assert_eq!(classify_strength(0.2999), Strength::Weak);
        assert_eq!(classify_strength(0.3), Strength::Moderate);
        assert_eq!(classify_strength(-0.3), Strength::Moderate);
        assert_eq!(classify_strength(0.6999), Strength::Moderate);
        assert_eq!(classify_strength(0.7), Strength::Strong);
        assert_eq!(classify_strength(-0.7), Strength::Strong);
        assert_eq!(classify_strength(1.0), Strength::Strong);
    }

    #[test]
    fn out_of_domain_coefficients_degrade_gracefully() {
        assert_eq!(classify_strength(1.7), Strength::Strong);
        assert_eq!(classify_strength(-42.0), Strength::Strong);
        assert_eq!(classify_strength(f64::NAN), Strength::Weak);
    }

    #[test]
    fn significance_labels() {
        assert_eq!(classify_significance(0.0005), Significance::HighlySignificant);
        assert_eq!(classify_significance(0.001), Significance::VerySignificant);
        assert_eq!(classify_significance(0.009), Significance::VerySignificant);
        assert_eq!(classify_significance(0.04), Significance::Significant);
        assert_eq!(classify_significance(0.05), Significance::MarginallySignificant);
        assert_eq!(classify_significance(0.1), Significance::NotSignificant);
        assert_eq!(classify_significance(f64::NAN), Significance::NotSignificant);
        assert_eq!(classify_significance(0.0005).to_string(), "Highly Significant");
        assert_eq!(classify_significance(0.04).to_string(), "Significant");
    }

    #[test]
    fn classified_results_serialize_with_display_labels() {
        let result = CorrelationResult::new("earnings_beat", "revenue", -0.45, 0.02, 24);
        let classified = ClassifiedCorrelation::from(&result);
        let json = serde_json::to_value(&classified).unwrap();

        assert_eq!(json["strength"], "Moderate");
        assert_eq!(json["significance"], "Significant");
        assert_eq!(json["direction"], "Negative");
        assert_eq!(json["is_significant"], true);
        assert_eq!(json["event_type"], "earnings_beat");
    }

    #[test]
    fn strongest_is_stable_and_sinks_nan() {
        let results = vec![
            CorrelationResult::new("a", "m", 0.2, 0.5, 10),
            CorrelationResult::new("b", "m", f64::NAN, 0.5, 10),
            CorrelationResult::new("c", "m", -0.8, 0.01, 10),
            CorrelationResult::new("d", "m", 0.8, 0.01, 10),
        ];
        let top: Vec<String> = strongest(&results, 10)
            .into_iter()
            .map(|c| c.result.event_type)
            .collect();
        assert_eq!(top, vec!["c", "d", "a", "b"]);
        assert_eq!(strongest(&results, 1).len(), 1);
    }

    #[test]
    fn matrix_keeps_first_seen_order_and_fills_gaps() {
        let results = vec![
            CorrelationResult::new("earnings", "revenue", 0.5, 0.01, 12),
            CorrelationResult::new("dividend", "eps", -0.2, 0.3, 12),
            CorrelationResult::new("earnings", "eps", 0.1, 0.6, 12),
            CorrelationResult::new("earnings", "revenue", 0.6, 0.01, 12),
        ];
        let matrix = CorrelationMatrix::build(&results);

        assert_eq!(matrix.event_types, vec!["earnings", "dividend"]);
        assert_eq!(matrix.metrics, vec!["revenue", "eps"]);
        assert_eq!(matrix.get("earnings", "revenue"), Some(0.6));
        assert_eq!(matrix.get("dividend", "revenue"), None);
        assert_eq!(matrix.get("dividend", "eps"), Some(-0.2));
        assert_eq!(matrix.get("merger", "eps"), None);
        assert!(matrix.cells.iter().all(|row| row.len() == 2));
    }
}
