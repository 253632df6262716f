use thiserror::Error;

use crate::domain_types::MetricError;

/// 彙總服務錯誤類型
///
/// 以明確的結果型別交給呈現層決定如何顯示，不以例外中斷渲染。
/// 任何錯誤只影響單一請求，不致使進程終止。
#[derive(Error, Debug)]
pub enum SummaryError {
    /// 資料來源連線失敗（不重試，放棄本次請求）
    #[error("資料來源連線失敗: {0}")]
    Connection(String),

    /// 請求參數無效（查詢前即拒絕）
    #[error("無效請求參數: {0}")]
    InvalidArgument(String),

    /// 指標計算錯誤
    #[error("指標計算錯誤: {0}")]
    Metric(#[from] MetricError),

    /// 匯出序列化失敗
    #[error("匯出失敗: {0}")]
    Export(String),
}

/// 彙總服務結果類型別名
pub type SummaryResult<T> = Result<T, SummaryError>;
