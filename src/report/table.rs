use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain_types::{Granularity, PeriodBucket};

/// 表格單列
///
/// 欄位名沿用原看板的穩定欄名：fecha / pais / pedidos / ventas。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub fecha: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pais: Option<String>,
    pub pedidos: i64,
    pub ventas: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unidades: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_diaria: Option<Decimal>,
}

/// 依桶序排列的彙總表
#[derive(Debug, Clone, Serialize)]
pub struct SummaryTable {
    /// 實際呈現的欄名，依序
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl SummaryTable {
    /// 由聚合桶組表
    ///
    /// `pais` 欄只在桶帶國家維度時出現；`media_diaria`（桶內日均營收）
    /// 只在週/月粒度時出現，日粒度下與 ventas 重複。捨入皆為顯示用，
    /// 桶內保持完整精度。
    pub fn from_buckets(buckets: &[PeriodBucket], granularity: Granularity) -> Self {
        let has_country = buckets.iter().any(|b| b.country.is_some());
        let has_units = buckets.iter().any(|b| b.unit_count.is_some());
        let has_daily_average =
            matches!(granularity, Granularity::Week | Granularity::Month);

        let mut columns = vec!["fecha".to_string()];
        if has_country {
            columns.push("pais".to_string());
        }
        columns.push("pedidos".to_string());
        columns.push("ventas".to_string());
        if has_units {
            columns.push("unidades".to_string());
        }
        if has_daily_average {
            columns.push("media_diaria".to_string());
        }

        let rows = buckets
            .iter()
            .map(|bucket| TableRow {
                fecha: bucket.period,
                pais: bucket.country.clone(),
                pedidos: bucket.order_count,
                ventas: bucket.revenue.round_dp(2),
                unidades: bucket.unit_count,
                media_diaria: has_daily_average.then(|| {
                    let span = granularity.span_days(bucket.period);
                    (bucket.revenue / Decimal::from(span)).round_dp(2)
                }),
            })
            .collect();

        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bucket(day: u32, country: Option<&str>, revenue: Decimal) -> PeriodBucket {
        PeriodBucket {
            period: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            country: country.map(str::to_string),
            order_count: 1,
            revenue,
            unit_count: None,
            return_rate: None,
        }
    }

    #[test]
    fn test_columns_without_country_dimension() {
        let table = SummaryTable::from_buckets(&[bucket(1, None, dec!(10))], Granularity::Day);
        assert_eq!(table.columns, ["fecha", "pedidos", "ventas"]);
    }

    #[test]
    fn test_columns_with_country_dimension() {
        let table = SummaryTable::from_buckets(&[bucket(1, Some("ES"), dec!(10))], Granularity::Day);
        assert_eq!(table.columns, ["fecha", "pais", "pedidos", "ventas"]);
    }

    #[test]
    fn test_monthly_daily_average_column() {
        // 2024 年 1 月有 31 天
        let table =
            SummaryTable::from_buckets(&[bucket(1, None, dec!(310))], Granularity::Month);
        assert!(table.columns.contains(&"media_diaria".to_string()));
        assert_eq!(table.rows[0].media_diaria, Some(dec!(10)));
    }
}
