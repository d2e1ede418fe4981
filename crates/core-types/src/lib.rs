//! # Vantage Core Types
//!
//! The plain data shapes shared by every other crate in the workspace: metric
//! records, correlation results, time series points, financial events and the
//! criteria used to filter them.
//!
//! As a Layer 0 crate it has no knowledge of the transformations built on top
//! of it. It also owns the single date policy of the workspace (see [`dates`]).

pub mod criteria;
pub mod dates;
pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use criteria::{DateRange, FilterCriteria, ValueRange};
pub use enums::{Polarity, PolarityTable};
pub use error::CoreError;
pub use structs::{
    ContributionPeriod, CorrelationResult, Event, MetricRecord, TimeSeriesPoint,
};
