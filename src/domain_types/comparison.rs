use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain_types::aggregation::CountPolicy;
use crate::domain_types::metrics::{self, MetricError};
use crate::domain_types::order::OrderRecord;

/// 單一時間窗的彙總指標
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSummary {
    pub order_count: i64,
    pub revenue: Decimal,
    /// 平均客單價，完整精度；訂單數為 0 時為 0
    pub average_order_value: Decimal,
    pub return_count: i64,
    /// 退貨率百分比（1 位小數）
    pub return_rate: f64,
}

/// 兩窗差值（當前 − 前期）
///
/// 比率類指標在前期無訂單時沒有可比基準，差值為 `None`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryDelta {
    pub order_count: i64,
    pub revenue: Decimal,
    pub average_order_value: Option<Decimal>,
    pub return_count: i64,
    pub return_rate: Option<f64>,
}

/// 期間比較結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodComparison {
    pub current: WindowSummary,
    pub previous: WindowSummary,
    pub delta: SummaryDelta,
}

/// 提供相鄰時間窗比較功能的結構
pub struct Comparator;

impl Comparator {
    /// 比較相鄰兩個時間窗
    ///
    /// 當前窗涵蓋 `[boundary − window_days, boundary)`，前一窗涵蓋
    /// `[boundary − 2·window_days, boundary − window_days)`。兩窗皆為
    /// 半開區間：落在共用邊界上的記錄歸入較晚的窗。區間外的記錄忽略。
    pub fn compare(
        records: &[OrderRecord],
        boundary: NaiveDate,
        window_days: i64,
        count_policy: CountPolicy,
        dedup_fulfillments: bool,
    ) -> Result<PeriodComparison, MetricError> {
        if window_days < 1 {
            return Err(MetricError::InvalidArgument(format!(
                "window_days 必須 ≥ 1，得到 {}",
                window_days
            )));
        }

        let split = boundary - Duration::days(window_days);
        let floor = boundary - Duration::days(2 * window_days);

        let current_rows: Vec<&OrderRecord> = records
            .iter()
            .filter(|r| r.event_date >= split && r.event_date < boundary)
            .collect();
        let previous_rows: Vec<&OrderRecord> = records
            .iter()
            .filter(|r| r.event_date >= floor && r.event_date < split)
            .collect();

        let current = Self::summarize(&current_rows, count_policy, dedup_fulfillments);
        let previous = Self::summarize(&previous_rows, count_policy, dedup_fulfillments);

        let delta = SummaryDelta {
            order_count: current.order_count - previous.order_count,
            revenue: current.revenue - previous.revenue,
            average_order_value: (previous.order_count > 0)
                .then(|| current.average_order_value - previous.average_order_value),
            return_count: current.return_count - previous.return_count,
            return_rate: (previous.order_count > 0)
                .then(|| current.return_rate - previous.return_rate),
        };

        Ok(PeriodComparison {
            current,
            previous,
            delta,
        })
    }

    /// 彙總一個時間窗內的列
    fn summarize(
        rows: &[&OrderRecord],
        count_policy: CountPolicy,
        dedup_fulfillments: bool,
    ) -> WindowSummary {
        use std::collections::BTreeMap;

        let collapsed: Vec<&OrderRecord> = if dedup_fulfillments {
            let mut earliest: BTreeMap<&str, &OrderRecord> = BTreeMap::new();
            for &record in rows {
                earliest
                    .entry(record.order_id.as_str())
                    .and_modify(|kept| {
                        if record.event_date < kept.event_date {
                            *kept = record;
                        }
                    })
                    .or_insert(record);
            }
            earliest.into_values().collect()
        } else {
            rows.to_vec()
        };

        let revenue: Decimal = collapsed.iter().map(|r| r.total).sum();

        let (order_count, return_count) = match count_policy {
            CountPolicy::DistinctOrders => {
                use std::collections::HashSet;
                let orders: HashSet<&str> =
                    collapsed.iter().map(|r| r.order_id.as_str()).collect();
                let returned: HashSet<&str> = collapsed
                    .iter()
                    .filter(|r| r.has_return())
                    .map(|r| r.order_id.as_str())
                    .collect();
                (orders.len() as i64, returned.len() as i64)
            }
            CountPolicy::RawRows => (
                collapsed.len() as i64,
                collapsed.iter().filter(|r| r.has_return()).count() as i64,
            ),
        };

        WindowSummary {
            order_count,
            revenue,
            average_order_value: metrics::average_order_value(revenue, order_count),
            return_count,
            return_rate: metrics::return_rate(return_count, order_count),
        }
    }
}
