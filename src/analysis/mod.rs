mod aggregator;
mod report;
mod tally;

pub use aggregator::{AggregationResult, DenseRegionAggregator};
pub use report::{AnalysisReport, AnalysisRunner};
pub use tally::QuestionnaireTally;
