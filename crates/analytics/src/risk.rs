use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const RESIDUAL_ROW: &str = "residual";
pub const TOTAL_ROW: &str = "total";

/// Component contributions to an asset's variance, as returned by a factor model.
///
/// Each component is `beta_i * (Σβ)_i`; `residual` is the residual variance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskComponents {
    #[serde(default)]
    pub components: BTreeMap<String, f64>,
    #[serde(default)]
    pub residual: Option<f64>,
}

/// One row of a risk decomposition table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskShare {
    pub factor: String,
    pub component: f64,
    /// Share of the total in percent; `None` when the total is zero or not finite.
    pub percentage: Option<f64>,
}

/// Turns component contributions into percentages of the total variance.
///
/// Rows follow the factor order of the map, then the residual (if any), then a
/// `total` row whose percentage is 100.
pub fn decompose(risk: &RiskComponents) -> Vec<RiskShare> {
    let mut rows: Vec<(String, f64)> = risk
        .components
        .iter()
        .map(|(factor, component)| (factor.clone(), *component))
        .collect();
    if let Some(residual) = risk.residual {
        rows.push((RESIDUAL_ROW.to_string(), residual));
    }

    let total: f64 = rows.iter().map(|(_, component)| component).sum();
    let usable = total.is_finite() && total != 0.0;
    if !usable {
        tracing::warn!(total, "Risk total is zero or not finite, percentages are undefined.");
    }

    let share = |component: f64| usable.then(|| component / total * 100.0);

    let mut shares: Vec<RiskShare> = rows
        .into_iter()
        .map(|(factor, component)| RiskShare {
            percentage: share(component),
            factor,
            component,
        })
        .collect();

    shares.push(RiskShare {
        factor: TOTAL_ROW.to_string(),
        component: total,
        percentage: usable.then_some(100.0),
    });

    shares
}
