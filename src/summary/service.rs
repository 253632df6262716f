use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cache::CountryCache;
use crate::config::{AggregationPolicyConfig, CacheConfig};
use crate::domain_types::{
    AggregationConfig, Aggregator, BucketMetric, Comparator, ExtremumKind, Granularity,
    PeriodBucket, PeriodComparison, metrics,
};
use crate::report::{
    export_filename, table_to_csv, ChartSeries, MetricSet, SummaryTable,
};
use crate::storage::repository::{CountrySelection, DateRange, OrderFilter};
use crate::storage::repository::orders::OrderRepository;
use crate::summary::error::{SummaryError, SummaryResult};

/// 演變檢視請求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionRequest {
    pub range: DateRange,
    pub granularity: Granularity,
    pub country: CountrySelection,
    /// true: 忽略國家維度做彙總；false: 每 (期間, 國家) 一桶
    pub rollup_countries: bool,
}

/// 期間比較請求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub boundary: NaiveDate,
    pub window_days: i64,
}

/// 演變檢視的亮點指標
#[derive(Debug, Clone, Serialize)]
pub struct EvolutionHighlights {
    /// 營收最高的桶
    pub best_period: PeriodBucket,
    /// 營收最低的桶
    pub worst_period: PeriodBucket,
    /// 範圍內的日均營收
    pub daily_average_revenue: Decimal,
}

/// 演變檢視結果
#[derive(Debug, Clone, Serialize)]
pub struct EvolutionReport {
    pub table: SummaryTable,
    pub chart: ChartSeries,
    /// 範圍內無資料時為 true，呈現層據此顯示「無資料」狀態
    pub no_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<EvolutionHighlights>,
}

/// 期間比較結果
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub metrics: MetricSet,
    pub comparison: PeriodComparison,
    pub no_data: bool,
}

/// 彙總服務
///
/// 每個請求一輪同步的取數 → 聚合 → 派生流程，無背景作業、無重試。
/// 資料存取協作者與國家快取皆為顯式注入，服務本身不持全域狀態。
pub struct SummaryService<R: OrderRepository> {
    repo: Arc<R>,
    countries: CountryCache,
    policy: AggregationPolicyConfig,
}

impl<R: OrderRepository> SummaryService<R> {
    pub fn new(repo: Arc<R>, policy: AggregationPolicyConfig, cache: &CacheConfig) -> Self {
        Self {
            repo,
            countries: CountryCache::new(cache.capacity, cache.country_ttl_secs),
            policy,
        }
    }

    /// 演變檢視：依粒度分桶的訂單數與營收
    pub async fn evolution(&self, request: &EvolutionRequest) -> SummaryResult<EvolutionReport> {
        if request.range.is_inverted() {
            return Err(SummaryError::InvalidArgument(format!(
                "結束日 {} 早於起始日 {}",
                request.range.end, request.range.start
            )));
        }

        let filter = OrderFilter::new(request.range, request.country.clone());
        let records = self
            .repo
            .fetch_orders(&filter)
            .await
            .map_err(|e| SummaryError::Connection(e.to_string()))?;

        // 國家條件已在資料層套用，聚合層不再重複過濾
        let config = AggregationConfig {
            granularity: request.granularity,
            country_filter: None,
            rollup_countries: request.rollup_countries,
            count_policy: self.policy.count_policy,
            dedup_fulfillments: self.policy.dedup_fulfillments,
        };
        let buckets = Aggregator::aggregate(&records, &config);
        info!(
            "演變檢視: {} 列 → {} 桶（粒度 {}）",
            records.len(),
            buckets.len(),
            request.granularity.display_name()
        );

        let highlights = if buckets.is_empty() {
            None
        } else {
            let best =
                metrics::extremum(&buckets, BucketMetric::Revenue, ExtremumKind::Max)?.clone();
            let worst =
                metrics::extremum(&buckets, BucketMetric::Revenue, ExtremumKind::Min)?.clone();
            let total_revenue: Decimal = buckets.iter().map(|b| b.revenue).sum();
            let daily_average_revenue =
                metrics::daily_average(total_revenue, request.range.days())?.round_dp(2);
            Some(EvolutionHighlights {
                best_period: best,
                worst_period: worst,
                daily_average_revenue,
            })
        };

        let chart = if request.rollup_countries {
            ChartSeries::orders_and_revenue(&buckets)
        } else {
            ChartSeries::orders_by_country(&buckets)
        };

        Ok(EvolutionReport {
            table: SummaryTable::from_buckets(&buckets, request.granularity),
            no_data: buckets.is_empty(),
            chart,
            highlights,
        })
    }

    /// 期間比較：當前窗對前一窗的指標與差值
    pub async fn comparison(&self, request: &ComparisonRequest) -> SummaryResult<ComparisonReport> {
        if request.window_days < 1 {
            return Err(SummaryError::InvalidArgument(format!(
                "window_days 必須 ≥ 1，得到 {}",
                request.window_days
            )));
        }

        // 比較域為 [boundary − 2w, boundary)，取數時右端收為含端的前一日
        let start = request.boundary - Duration::days(2 * request.window_days);
        let end = request.boundary - Duration::days(1);
        let filter = OrderFilter::new(DateRange::new(start, end), CountrySelection::All);
        let records = self
            .repo
            .fetch_orders(&filter)
            .await
            .map_err(|e| SummaryError::Connection(e.to_string()))?;

        let comparison = Comparator::compare(
            &records,
            request.boundary,
            request.window_days,
            self.policy.count_policy,
            self.policy.dedup_fulfillments,
        )?;

        let no_data = comparison.current.order_count == 0 && comparison.previous.order_count == 0;

        Ok(ComparisonReport {
            metrics: MetricSet::from_comparison(&comparison),
            comparison,
            no_data,
        })
    }

    /// 國家下拉選單選項（含「Todos」哨兵），快取逾時前不再查庫
    pub async fn country_options(&self) -> SummaryResult<Vec<String>> {
        self.countries
            .selector_options(self.repo.as_ref())
            .await
            .map_err(|e| SummaryError::Connection(e.to_string()))
    }

    /// 演變檢視的 CSV 匯出：回傳（檔名, 內容）
    pub async fn export_evolution(
        &self,
        request: &EvolutionRequest,
    ) -> SummaryResult<(String, String)> {
        let report = self.evolution(request).await?;
        let csv = table_to_csv(&report.table).map_err(|e| SummaryError::Export(e.to_string()))?;
        let filename = export_filename(&request.country, &request.range);
        Ok((filename, csv))
    }
}
