//! # Vantage Analytics
//!
//! Stateless calculators that turn backend results into chart-ready values.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of external systems.
//!   It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Every function takes its whole input as arguments and
//!   returns a fresh value. Calling it twice with the same input gives the same output.
//!
//! ## Public API
//!
//! - `correlation`: strength and significance labels, strongest results, heatmap matrix.
//! - `aggregation`: cumulative per-factor contributions and running totals.
//! - `risk`: percentage contribution of each factor to total variance.

// Declare the modules that constitute this crate.
pub mod aggregation;
pub mod correlation;
pub mod risk;

// Re-export the key components to create a clean, public-facing API.
pub use aggregation::{CumulativePoint, cumulative_sum, cumulative_sum_from, final_totals};
pub use correlation::{
    ClassifiedCorrelation, CorrelationMatrix, Direction, Significance, Strength,
    classify_significance, classify_strength,
};
pub use risk::{RiskComponents, RiskShare, decompose};
