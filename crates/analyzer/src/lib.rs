//! # Vantage Analyzer
//!
//! Comparative ranking of models, companies and assets that each expose a map
//! of metrics.
//!
//! - `ranking`: the best entity per metric, honoring lower/higher-is-better polarity.
//! - `normalize`: min-max normalization to a 0-100 scale for radar charts.
//! - `scoring`: a weighted composite score built on top of both.

pub mod error;
pub mod normalize;
pub mod ranking;
pub mod scoring;

pub use error::AnalyzerError;
pub use normalize::{NormalizedValue, RadarAxis, normalize_metric, radar_profile};
pub use ranking::{Best, RankedEntity, best_by_metric, best_per_metric, rank_by_metric};
pub use scoring::{RankedRecord, WeightedScorer};
