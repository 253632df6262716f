use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain_types::bucket::PeriodBucket;

/// 指標計算錯誤類型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetricError {
    /// 無效參數
    #[error("無效參數: {0}")]
    InvalidArgument(String),

    /// 空輸入
    #[error("輸入桶序列為空")]
    EmptyInput,
}

/// 極值方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtremumKind {
    Max,
    Min,
}

/// 可取極值的桶指標
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketMetric {
    Orders,
    Revenue,
}

/// 平均客單價（ticket medio）
///
/// `order_count` 為 0 時回傳 0，不產生除零錯誤。保留完整精度，
/// 顯示層再做兩位小數捨入。
pub fn average_order_value(revenue: Decimal, order_count: i64) -> Decimal {
    if order_count == 0 {
        return Decimal::ZERO;
    }
    revenue / Decimal::from(order_count)
}

/// 退貨率百分比，捨入至 1 位小數
///
/// `order_count` 為 0 時回傳 0。
pub fn return_rate(returns: i64, order_count: i64) -> f64 {
    if order_count == 0 {
        return 0.0;
    }
    let rate = 100.0 * returns as f64 / order_count as f64;
    (rate * 10.0).round() / 10.0
}

/// 每日平均值
///
/// `span_days` 必須 ≥ 1：日/原始粒度為 1、週為 7、月依月曆天數，
/// 由 `Granularity::span_days` 提供。
pub fn daily_average(total: Decimal, span_days: i64) -> Result<Decimal, MetricError> {
    if span_days < 1 {
        return Err(MetricError::InvalidArgument(format!(
            "span_days 必須 ≥ 1，得到 {}",
            span_days
        )));
    }
    Ok(total / Decimal::from(span_days))
}

/// 取得指定指標達到極值的桶
///
/// 空序列回傳 `EmptyInput` 而非崩潰。同值時保留先出現的桶。
pub fn extremum<'a>(
    buckets: &'a [PeriodBucket],
    metric: BucketMetric,
    kind: ExtremumKind,
) -> Result<&'a PeriodBucket, MetricError> {
    let mut iter = buckets.iter();
    let first = iter.next().ok_or(MetricError::EmptyInput)?;

    let value = |bucket: &PeriodBucket| -> Decimal {
        match metric {
            BucketMetric::Orders => Decimal::from(bucket.order_count),
            BucketMetric::Revenue => bucket.revenue,
        }
    };

    Ok(iter.fold(first, |best, candidate| {
        let better = match kind {
            ExtremumKind::Max => value(candidate) > value(best),
            ExtremumKind::Min => value(candidate) < value(best),
        };
        if better {
            candidate
        } else {
            best
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn bucket(day: u32, order_count: i64, revenue: Decimal) -> PeriodBucket {
        PeriodBucket {
            period: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            country: None,
            order_count,
            revenue,
            unit_count: None,
            return_rate: None,
        }
    }

    #[test]
    fn test_average_order_value_zero_orders() {
        assert_eq!(average_order_value(dec!(123.45), 0), Decimal::ZERO);
    }

    #[test]
    fn test_average_order_value_full_precision() {
        assert_eq!(average_order_value(dec!(10), 3), dec!(10) / dec!(3));
    }

    #[test]
    fn test_return_rate_rounding() {
        assert_eq!(return_rate(1, 3), 33.3);
        assert_eq!(return_rate(2, 3), 66.7);
        assert_eq!(return_rate(0, 5), 0.0);
        assert_eq!(return_rate(3, 0), 0.0);
    }

    #[test]
    fn test_daily_average_rejects_zero_span() {
        assert_matches!(daily_average(dec!(100), 0), Err(MetricError::InvalidArgument(_)));
        assert_matches!(daily_average(dec!(100), -7), Err(MetricError::InvalidArgument(_)));
        assert_eq!(daily_average(dec!(210), 7).unwrap(), dec!(30));
    }

    #[test]
    fn test_extremum_empty_input_is_error() {
        let result = extremum(&[], BucketMetric::Revenue, ExtremumKind::Max);
        assert_matches!(result, Err(MetricError::EmptyInput));
    }

    #[test]
    fn test_extremum_max_and_min() {
        let buckets = vec![
            bucket(1, 3, dec!(60)),
            bucket(2, 7, dec!(20)),
            bucket(3, 5, dec!(90)),
        ];
        let max_revenue = extremum(&buckets, BucketMetric::Revenue, ExtremumKind::Max).unwrap();
        assert_eq!(max_revenue.period, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());

        let min_orders = extremum(&buckets, BucketMetric::Orders, ExtremumKind::Min).unwrap();
        assert_eq!(min_orders.period, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_extremum_tie_keeps_first() {
        let buckets = vec![bucket(1, 3, dec!(50)), bucket(2, 3, dec!(50))];
        let best = extremum(&buckets, BucketMetric::Revenue, ExtremumKind::Max).unwrap();
        assert_eq!(best.period, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }
}
