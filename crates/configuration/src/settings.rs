use crate::error::ConfigError;
use core_types::{PolarityTable, ValueRange};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub ranking: RankingSettings,
    pub filters: FilterDefaults,
}

/// Output format of the log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Pretty,
}

/// Contains parameters for the tracing subscriber.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive such as `info` or `analyzer=debug,info`.
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    pub format: LogFormat,
    /// When set, logs go to a daily-rolling file in this directory instead of stderr.
    pub directory: Option<PathBuf>,
}

/// Contains parameters for comparing and ranking entities.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RankingSettings {
    /// Metrics where a smaller value is better (error metrics, drawdowns...).
    pub lower_is_better: Vec<String>,
    /// Weights for the composite score. Metrics not listed do not contribute.
    pub weights: BTreeMap<String, f64>,
}

/// Default bounds of the impact score filter.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterDefaults {
    pub min_impact: f64,
    pub max_impact: f64,
}

impl Settings {
    /// Checks the invariants the deserializer cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.filters.value_range()?;

        for (metric, weight) in &self.ranking.weights {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "weight for metric '{metric}' must be a finite, non-negative number, got {weight}"
                )));
            }
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.level must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl RankingSettings {
    pub fn polarity_table(&self) -> PolarityTable {
        PolarityTable::new(self.lower_is_better.iter().cloned())
    }
}

impl FilterDefaults {
    pub fn value_range(&self) -> Result<ValueRange, ConfigError> {
        ValueRange::new(self.min_impact, self.max_impact).map_err(|e| {
            ConfigError::ValidationError(format!("filters: {e}"))
        })
    }
}

// --- Default Implementations ---
// This allows a user to omit any section (or the whole file) and still get
// sensible defaults.

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            directory: None,
        }
    }
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            lower_is_better: vec!["mse".to_string(), "rmse".to_string(), "mae".to_string()],
            weights: BTreeMap::new(),
        }
    }
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            min_impact: -1.0,
            max_impact: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Polarity;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.filters.value_range().unwrap(), ValueRange::default());
    }

    #[test]
    fn error_metrics_are_lower_is_better_by_default() {
        let table = RankingSettings::default().polarity_table();
        assert_eq!(table.polarity("rmse"), Polarity::LowerIsBetter);
        assert_eq!(table.polarity("r_squared"), Polarity::HigherIsBetter);
    }

    #[test]
    fn negative_weights_are_rejected() {
        let mut settings = Settings::default();
        settings.ranking.weights.insert("sharpe".to_string(), -0.5);
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::ValidationError(msg)) if msg.contains("sharpe")
        ));
    }

    #[test]
    fn inverted_impact_bounds_are_rejected() {
        let mut settings = Settings::default();
        settings.filters.min_impact = 0.8;
        settings.filters.max_impact = 0.2;
        assert!(settings.validate().is_err());
    }
}
