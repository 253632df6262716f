use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

// 重新導出子模塊
pub mod orders;

pub use orders::{OrderRepository, PgOrderRepository};

/// 日期範圍查詢（雙端含）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// 結束日是否早於起始日
    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }

    /// 範圍涵蓋的天數（雙端含）
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// 國家過濾選項
///
/// 呼叫端以保留哨兵值（"Todos" / "All"）表示不過濾；
/// 由此型別解析後，資料層不再見到哨兵字串。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountrySelection {
    All,
    Only(String),
}

impl CountrySelection {
    /// 解析使用者輸入，哨兵值與空字串視為不過濾
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("todos") || trimmed.eq_ignore_ascii_case("all")
        {
            CountrySelection::All
        } else {
            CountrySelection::Only(trimmed.to_string())
        }
    }

    pub fn as_option(&self) -> Option<&str> {
        match self {
            CountrySelection::All => None,
            CountrySelection::Only(country) => Some(country.as_str()),
        }
    }
}

impl Default for CountrySelection {
    fn default() -> Self {
        CountrySelection::All
    }
}

/// 結構化查詢條件
///
/// 由資料層轉譯為參數化查詢，任何情況下不以字串拼接構造 SQL。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFilter {
    pub range: DateRange,
    pub country: CountrySelection,
}

impl OrderFilter {
    pub fn new(range: DateRange, country: CountrySelection) -> Self {
        Self { range, country }
    }
}

/// 通用的數據庫操作特性
pub trait DbExecutor {
    fn get_pool(&self) -> &PgPool;
}
