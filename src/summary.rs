// 重新導出子模塊
pub mod error;
pub mod service;

pub use error::{SummaryError, SummaryResult};
pub use service::{
    ComparisonReport, ComparisonRequest, EvolutionHighlights, EvolutionReport, EvolutionRequest,
    SummaryService,
};
