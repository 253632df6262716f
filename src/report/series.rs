use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::domain_types::PeriodBucket;

/// 序列所屬的座標軸
///
/// 訂單數與營收量級不同，折線圖需要雙軸呈現。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesAxis {
    Orders,
    Revenue,
}

/// 具名數值序列，與 `ChartSeries::labels` 逐位對齊
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedSeries {
    pub name: String,
    pub axis: SeriesAxis,
    pub values: Vec<f64>,
}

/// 折線圖資料：共用有序標籤集 + 多條對齊序列
#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<NaiveDate>,
    pub series: Vec<NamedSeries>,
}

impl ChartSeries {
    /// 彙總檢視：pedidos 與 ventas 各一條序列
    pub fn orders_and_revenue(buckets: &[PeriodBucket]) -> Self {
        let labels: Vec<NaiveDate> = buckets.iter().map(|b| b.period).collect();
        let pedidos = NamedSeries {
            name: "pedidos".to_string(),
            axis: SeriesAxis::Orders,
            values: buckets.iter().map(|b| b.order_count as f64).collect(),
        };
        let ventas = NamedSeries {
            name: "ventas".to_string(),
            axis: SeriesAxis::Revenue,
            values: buckets
                .iter()
                .map(|b| b.revenue.to_f64().unwrap_or(0.0))
                .collect(),
        };

        Self {
            labels,
            series: vec![pedidos, ventas],
        }
    }

    /// 按國家檢視：每個國家一條 pedidos 序列
    ///
    /// 各國桶覆蓋的日期不一，先取聯集作共用標籤集，
    /// 缺桶的位置補 0 以維持逐位對齊。
    pub fn orders_by_country(buckets: &[PeriodBucket]) -> Self {
        let labels: Vec<NaiveDate> = buckets
            .iter()
            .map(|b| b.period)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let countries: Vec<String> = buckets
            .iter()
            .filter_map(|b| b.country.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let series = countries
            .into_iter()
            .map(|country| {
                let values = labels
                    .iter()
                    .map(|label| {
                        buckets
                            .iter()
                            .find(|b| {
                                b.period == *label && b.country.as_deref() == Some(country.as_str())
                            })
                            .map(|b| b.order_count as f64)
                            .unwrap_or(0.0)
                    })
                    .collect();
                NamedSeries {
                    name: country,
                    axis: SeriesAxis::Orders,
                    values,
                }
            })
            .collect();

        Self { labels, series }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bucket(day: u32, country: Option<&str>, orders: i64) -> PeriodBucket {
        PeriodBucket {
            period: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            country: country.map(str::to_string),
            order_count: orders,
            revenue: dec!(10) * rust_decimal::Decimal::from(orders),
            unit_count: None,
            return_rate: None,
        }
    }

    #[test]
    fn test_orders_and_revenue_alignment() {
        let chart = ChartSeries::orders_and_revenue(&[bucket(1, None, 3), bucket(2, None, 5)]);
        assert_eq!(chart.labels.len(), 2);
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].values, vec![3.0, 5.0]);
        assert_eq!(chart.series[1].values, vec![30.0, 50.0]);
        assert_eq!(chart.series[0].axis, SeriesAxis::Orders);
        assert_eq!(chart.series[1].axis, SeriesAxis::Revenue);
    }

    #[test]
    fn test_country_pivot_zero_fills_missing_periods() {
        let buckets = vec![
            bucket(1, Some("ES"), 2),
            bucket(2, Some("ES"), 4),
            bucket(2, Some("FR"), 1),
        ];
        let chart = ChartSeries::orders_by_country(&buckets);
        assert_eq!(chart.labels.len(), 2);
        let fr = chart.series.iter().find(|s| s.name == "FR").unwrap();
        assert_eq!(fr.values, vec![0.0, 1.0]);
        let es = chart.series.iter().find(|s| s.name == "ES").unwrap();
        assert_eq!(es.values, vec![2.0, 4.0]);
    }
}
