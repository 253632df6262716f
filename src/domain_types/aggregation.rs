use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain_types::bucket::PeriodBucket;
use crate::domain_types::granularity::Granularity;
use crate::domain_types::metrics;
use crate::domain_types::order::OrderRecord;

/// 訂單計數語義
///
/// 來源各變體在 `COUNT(DISTINCT order_id)` 與逐列計數之間並不一致，
/// 兩者不可互換，因此以顯式參數決定，不做隱含選擇。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountPolicy {
    /// 以不重複 order_id 計數（訂單層級）
    DistinctOrders,
    /// 逐列計數（出貨事件層級）
    RawRows,
}

/// 聚合配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationConfig {
    pub granularity: Granularity,               // 分桶粒度
    pub country_filter: Option<String>,         // 僅聚合此國家的列
    pub rollup_countries: bool,                 // true: 每日期一桶；false: 每 (日期, 國家) 一桶
    pub count_policy: CountPolicy,              // 訂單計數語義
    pub dedup_fulfillments: bool,               // 營收加總前先收斂為每訂單一列
}

impl AggregationConfig {
    /// 建立指定粒度的全國家彙總配置
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            country_filter: None,
            rollup_countries: true,
            count_policy: CountPolicy::DistinctOrders,
            dedup_fulfillments: true,
        }
    }

    /// 建立按國家拆分的配置
    pub fn split_by_country(granularity: Granularity) -> Self {
        let mut config = Self::new(granularity);
        config.rollup_countries = false;
        config
    }

    /// 建立僅含單一國家的配置
    pub fn with_country(granularity: Granularity, country: impl Into<String>) -> Self {
        let mut config = Self::split_by_country(granularity);
        config.country_filter = Some(country.into());
        config
    }
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self::new(Granularity::Day)
    }
}

/// 各分組的累計狀態
#[derive(Debug, Default)]
struct GroupAccumulator {
    order_ids: HashSet<String>,
    rows: i64,
    revenue: Decimal,
    units: i64,
    has_units: bool,
    returned_order_ids: HashSet<String>,
    returned_rows: i64,
}

impl GroupAccumulator {
    fn push(&mut self, record: &OrderRecord) {
        self.order_ids.insert(record.order_id.clone());
        self.rows += 1;
        self.revenue += record.total;
        if let Some(quantity) = record.quantity {
            self.units += quantity;
            self.has_units = true;
        }
        if record.has_return() {
            self.returned_order_ids.insert(record.order_id.clone());
            self.returned_rows += 1;
        }
    }

    fn order_count(&self, policy: CountPolicy) -> i64 {
        match policy {
            CountPolicy::DistinctOrders => self.order_ids.len() as i64,
            CountPolicy::RawRows => self.rows,
        }
    }

    fn return_count(&self, policy: CountPolicy) -> i64 {
        match policy {
            CountPolicy::DistinctOrders => self.returned_order_ids.len() as i64,
            CountPolicy::RawRows => self.returned_rows,
        }
    }
}

/// 提供分桶聚合核心功能的結構
pub struct Aggregator;

impl Aggregator {
    /// 將原始訂單列聚合為期間桶
    ///
    /// 純函數：相同輸入必得相同輸出，無任何副作用。空輸入回傳空序列。
    /// 輸出依 `period` 遞增排序，同期間再依國家名稱遞增（彙總桶在前）。
    /// 只為輸入中實際出現的 `(period[, country])` 組合產生桶，
    /// 不合成零值桶；需要零填充序列的呼叫端自行後處理。
    pub fn aggregate(records: &[OrderRecord], config: &AggregationConfig) -> Vec<PeriodBucket> {
        let filtered: Vec<&OrderRecord> = records
            .iter()
            .filter(|r| match &config.country_filter {
                Some(country) => r.country.as_deref() == Some(country.as_str()),
                None => true,
            })
            .collect();

        let deduped = if config.dedup_fulfillments {
            Self::collapse_fulfillments(&filtered)
        } else {
            filtered
        };

        // BTreeMap 的鍵序即輸出序：period 遞增，Option<String> 使彙總桶（None）在前
        let mut groups: BTreeMap<(chrono::NaiveDate, Option<String>), GroupAccumulator> =
            BTreeMap::new();

        for record in deduped {
            let country_key = if config.rollup_countries {
                None
            } else {
                match &record.country {
                    Some(country) => Some(country.clone()),
                    // 無國家的列不進入按國家檢視
                    None => continue,
                }
            };

            let period = config.granularity.truncate(record.event_date);
            groups.entry((period, country_key)).or_default().push(record);
        }

        groups
            .into_iter()
            .map(|((period, country), acc)| {
                let order_count = acc.order_count(config.count_policy);
                let return_count = acc.return_count(config.count_policy);
                PeriodBucket {
                    period,
                    country,
                    order_count,
                    revenue: acc.revenue,
                    unit_count: acc.has_units.then_some(acc.units),
                    return_rate: Some(metrics::return_rate(return_count, order_count)),
                }
            })
            .collect()
    }

    /// 收斂為每訂單一列：同 order_id 保留最早事件日期的列
    ///
    /// 一張訂單的多個出貨列共享同一 total，逐列加總會重複計入營收；
    /// 收斂後營收為每訂單計一次。
    fn collapse_fulfillments<'a>(records: &[&'a OrderRecord]) -> Vec<&'a OrderRecord> {
        let mut earliest: BTreeMap<&str, &'a OrderRecord> = BTreeMap::new();
        for &record in records {
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
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn record(id: &str, date: (i32, u32, u32), country: Option<&str>, total: Decimal) -> OrderRecord {
        OrderRecord {
            order_id: id.to_string(),
            event_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            country: country.map(str::to_string),
            total,
            quantity: None,
            return_tag: None,
        }
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let buckets = Aggregator::aggregate(&[], &AggregationConfig::default());
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_dedup_keeps_earliest_fulfillment() {
        // 同一訂單兩個出貨列：營收只計一次，歸入最早日期的桶
        let records = vec![
            record("A", (2024, 1, 5), Some("ES"), dec!(30)),
            record("A", (2024, 1, 3), Some("ES"), dec!(30)),
        ];
        let buckets = Aggregator::aggregate(&records, &AggregationConfig::default());
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].period, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(buckets[0].order_count, 1);
        assert_eq!(buckets[0].revenue, dec!(30));
    }

    #[test]
    fn test_raw_rows_policy_counts_every_row() {
        let records = vec![
            record("A", (2024, 1, 3), Some("ES"), dec!(30)),
            record("A", (2024, 1, 3), Some("ES"), dec!(30)),
        ];
        let mut config = AggregationConfig::default();
        config.count_policy = CountPolicy::RawRows;
        config.dedup_fulfillments = false;
        let buckets = Aggregator::aggregate(&records, &config);
        assert_eq!(buckets[0].order_count, 2);
        assert_eq!(buckets[0].revenue, dec!(60));
    }

    #[test]
    fn test_split_mode_drops_countryless_rows() {
        let records = vec![
            record("A", (2024, 1, 3), Some("ES"), dec!(10)),
            record("B", (2024, 1, 3), None, dec!(20)),
        ];
        let split =
            Aggregator::aggregate(&records, &AggregationConfig::split_by_country(Granularity::Day));
        assert_eq!(split.len(), 1);
        assert_eq!(split[0].country.as_deref(), Some("ES"));

        // 彙總模式則包含無國家的列
        let rollup = Aggregator::aggregate(&records, &AggregationConfig::default());
        assert_eq!(rollup.len(), 1);
        assert_eq!(rollup[0].revenue, dec!(30));
    }

    #[test]
    fn test_ordering_period_then_country() {
        let records = vec![
            record("C", (2024, 1, 4), Some("FR"), dec!(1)),
            record("A", (2024, 1, 3), Some("FR"), dec!(1)),
            record("B", (2024, 1, 3), Some("ES"), dec!(1)),
        ];
        let buckets =
            Aggregator::aggregate(&records, &AggregationConfig::split_by_country(Granularity::Day));
        let keys: Vec<(NaiveDate, Option<&str>)> = buckets
            .iter()
            .map(|b| (b.period, b.country.as_deref()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(), Some("ES")),
                (NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(), Some("FR")),
                (NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(), Some("FR")),
            ]
        );
    }

    #[test]
    fn test_week_granularity_buckets_to_monday() {
        let records = vec![
            record("A", (2024, 3, 12), Some("ES"), dec!(10)), // 週二
            record("B", (2024, 3, 15), Some("ES"), dec!(20)), // 週五，同一 ISO 週
        ];
        let buckets = Aggregator::aggregate(&records, &AggregationConfig::new(Granularity::Week));
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].period, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        assert_eq!(buckets[0].order_count, 2);
        assert_eq!(buckets[0].revenue, dec!(30));
    }

    #[test]
    fn test_return_rate_and_units() {
        let mut returned = record("A", (2024, 1, 3), Some("ES"), dec!(10));
        returned.return_tag = Some("defecto".to_string());
        returned.quantity = Some(2);
        let mut kept = record("B", (2024, 1, 3), Some("ES"), dec!(20));
        kept.quantity = Some(3);

        let buckets = Aggregator::aggregate(&[returned, kept], &AggregationConfig::default());
        assert_eq!(buckets[0].unit_count, Some(5));
        assert_eq!(buckets[0].return_rate, Some(50.0));
    }
}
