use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 期間聚合桶
///
/// 一個 `(period[, country])` 組合的聚合結果。每次請求重新計算，
/// 不落地保存。`country` 為 `None` 時代表全國家彙總。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodBucket {
    /// 桶起點（事件日期截斷至請求粒度）
    pub period: NaiveDate,
    /// 分組國家；`None` = 全國家彙總
    pub country: Option<String>,
    /// 桶內訂單數（計數語義由 CountPolicy 決定）
    pub order_count: i64,
    /// 桶內營收合計
    pub revenue: Decimal,
    /// 桶內件數合計，來源無件數欄位時為 `None`
    pub unit_count: Option<i64>,
    /// 退貨訂單百分比（1 位小數）
    pub return_rate: Option<f64>,
}
