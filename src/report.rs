// 重新導出子模塊
pub mod export;
pub mod metric_set;
pub mod series;
pub mod table;

pub use export::{export_filename, table_to_csv};
pub use metric_set::{Metric, MetricSet, MetricValue};
pub use series::{ChartSeries, NamedSeries, SeriesAxis};
pub use table::{SummaryTable, TableRow};
