use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which direction of a metric counts as an improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Polarity {
    #[default]
    HigherIsBetter,
    LowerIsBetter,
}

impl Polarity {
    /// Returns true only if `candidate` strictly beats `incumbent`.
    ///
    /// Equal values never improve, which is what makes the first entity in
    /// input order win a tie.
    pub fn improves(&self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Polarity::HigherIsBetter => candidate > incumbent,
            Polarity::LowerIsBetter => candidate < incumbent,
        }
    }

    /// Returns the opposite polarity.
    pub fn opposite(&self) -> Self {
        match self {
            Polarity::HigherIsBetter => Polarity::LowerIsBetter,
            Polarity::LowerIsBetter => Polarity::HigherIsBetter,
        }
    }
}

/// Per-metric polarity lookup. Metrics not listed are higher-is-better.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolarityTable {
    lower_is_better: BTreeSet<String>,
}

impl PolarityTable {
    pub fn new<I, S>(lower_is_better: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lower_is_better: lower_is_better.into_iter().map(Into::into).collect(),
        }
    }

    pub fn polarity(&self, metric: &str) -> Polarity {
        if self.lower_is_better.contains(metric) {
            Polarity::LowerIsBetter
        } else {
            Polarity::HigherIsBetter
        }
    }

    /// Marks one more metric as lower-is-better.
    pub fn insert(&mut self, metric: impl Into<String>) {
        self.lower_is_better.insert(metric.into());
    }

    pub fn lower_is_better(&self) -> impl Iterator<Item = &str> {
        self.lower_is_better.iter().map(String::as_str)
    }
}
