use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain_types::PeriodComparison;

/// 指標值，序列化時不帶型別標籤
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(i64),
    Amount(Decimal),
    Rate(f64),
}

/// 單一看板指標
#[derive(Debug, Clone, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: MetricValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<MetricValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta_label: Option<String>,
}

/// 有序的看板指標集合
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricSet {
    pub metrics: Vec<Metric>,
}

impl MetricSet {
    pub fn push(&mut self, metric: Metric) {
        self.metrics.push(metric);
    }

    /// 由期間比較結果組出看板指標
    ///
    /// 標籤沿用原看板文案；金額在此做兩位小數的顯示捨入，
    /// 比率差值在前期無基準時省略。
    pub fn from_comparison(comparison: &PeriodComparison) -> Self {
        let current = &comparison.current;
        let delta = &comparison.delta;
        let vs = "vs. 30 días anteriores";

        let mut set = MetricSet::default();
        set.push(Metric {
            label: "Pedidos".to_string(),
            value: MetricValue::Count(current.order_count),
            delta: Some(MetricValue::Count(delta.order_count)),
            delta_label: Some(vs.to_string()),
        });
        set.push(Metric {
            label: "Ventas (€)".to_string(),
            value: MetricValue::Amount(current.revenue.round_dp(2)),
            delta: Some(MetricValue::Amount(delta.revenue.round_dp(2))),
            delta_label: Some(vs.to_string()),
        });
        set.push(Metric {
            label: "Ticket medio (€)".to_string(),
            value: MetricValue::Amount(current.average_order_value.round_dp(2)),
            delta: delta
                .average_order_value
                .map(|d| MetricValue::Amount(d.round_dp(2))),
            delta_label: delta.average_order_value.map(|_| vs.to_string()),
        });
        set.push(Metric {
            label: "Devoluciones".to_string(),
            value: MetricValue::Count(current.return_count),
            delta: Some(MetricValue::Count(delta.return_count)),
            delta_label: Some(vs.to_string()),
        });
        set.push(Metric {
            label: "% Devoluciones".to_string(),
            value: MetricValue::Rate(current.return_rate),
            delta: delta.return_rate.map(MetricValue::Rate),
            delta_label: delta.return_rate.map(|_| vs.to_string()),
        });

        set
    }
}
