pub mod analysis;
pub mod common;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod intake;
pub mod store;

pub use analysis::{AggregationResult, AnalysisReport, AnalysisRunner, DenseRegionAggregator};
pub use error::{AggregationError, AppError, IntakeError, StoreError};
