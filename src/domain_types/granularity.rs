use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// 時間分桶粒度
///
/// 分組前套用在 `event_date` 上的截斷單位。`Raw` 表示不截斷、
/// 直接以原始事件日期分組；對已降為日期的事件時間而言，截斷結果
/// 與 `Day` 相同，但平均天數的語義不同（見 `span_days`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
    Raw,
}

impl Granularity {
    /// 將日期截斷至本粒度的桶起點
    ///
    /// day/raw: 原樣；week: ISO 週起始（週一）；month: 當月一日。
    pub fn truncate(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day | Granularity::Raw => date,
            Granularity::Week => {
                date - Duration::days(date.weekday().num_days_from_monday() as i64)
            }
            Granularity::Month => date.with_day(1).expect("day 1 is valid for every month"),
        }
    }

    /// 桶所涵蓋的天數，用於日均值計算
    ///
    /// month 依桶起點查月曆天數，week 固定 7，day/raw 固定 1。
    pub fn span_days(&self, period_start: NaiveDate) -> i64 {
        match self {
            Granularity::Day | Granularity::Raw => 1,
            Granularity::Week => 7,
            Granularity::Month => days_in_month(period_start.year(), period_start.month()),
        }
    }

    /// 解析查詢參數字串
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "day" | "daily" => Some(Granularity::Day),
            "week" | "weekly" => Some(Granularity::Week),
            "month" | "monthly" => Some(Granularity::Month),
            "raw" | "none" => Some(Granularity::Raw),
            _ => None,
        }
    }

    /// 顯示名稱
    pub fn display_name(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Raw => "raw",
        }
    }
}

impl Default for Granularity {
    fn default() -> Self {
        Granularity::Day
    }
}

/// 某年某月的月曆天數
fn days_in_month(year: i32, month: u32) -> i64 {
    let next_month_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("first day of month is always valid");
    let this_month_first =
        NaiveDate::from_ymd_opt(year, month, 1).expect("first day of month is always valid");
    (next_month_first - this_month_first).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_truncation_is_identity() {
        let d = date(2024, 3, 15);
        assert_eq!(Granularity::Day.truncate(d), d);
        assert_eq!(Granularity::Raw.truncate(d), d);
    }

    #[test]
    fn test_week_truncation_to_monday() {
        // 2024-03-15 是週五，該 ISO 週起始於 2024-03-11（週一）
        assert_eq!(Granularity::Week.truncate(date(2024, 3, 15)), date(2024, 3, 11));
        // 週一截斷後不變
        assert_eq!(Granularity::Week.truncate(date(2024, 3, 11)), date(2024, 3, 11));
        // 跨月的週
        assert_eq!(Granularity::Week.truncate(date(2024, 3, 2)), date(2024, 2, 26));
    }

    #[test]
    fn test_month_truncation_to_first() {
        assert_eq!(Granularity::Month.truncate(date(2024, 3, 15)), date(2024, 3, 1));
        assert_eq!(Granularity::Month.truncate(date(2024, 3, 1)), date(2024, 3, 1));
    }

    #[test]
    fn test_span_days() {
        assert_eq!(Granularity::Day.span_days(date(2024, 3, 15)), 1);
        assert_eq!(Granularity::Week.span_days(date(2024, 3, 11)), 7);
        assert_eq!(Granularity::Month.span_days(date(2024, 2, 1)), 29); // 閏年二月
        assert_eq!(Granularity::Month.span_days(date(2023, 2, 1)), 28);
        assert_eq!(Granularity::Month.span_days(date(2024, 4, 1)), 30);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Granularity::from_str("day"), Some(Granularity::Day));
        assert_eq!(Granularity::from_str("Weekly"), Some(Granularity::Week));
        assert_eq!(Granularity::from_str("none"), Some(Granularity::Raw));
        assert_eq!(Granularity::from_str("hour"), None);
    }
}
