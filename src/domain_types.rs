pub mod aggregation;
pub mod bucket;
pub mod comparison;
pub mod granularity;
pub mod metrics;
pub mod order;

pub use aggregation::{AggregationConfig, Aggregator, CountPolicy};
pub use bucket::PeriodBucket;
pub use comparison::{Comparator, PeriodComparison, SummaryDelta, WindowSummary};
pub use granularity::Granularity;
pub use metrics::{BucketMetric, ExtremumKind, MetricError};
pub use order::OrderRecord;
