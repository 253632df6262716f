use chrono::NaiveDate;
use rust_decimal::Decimal;

use order_analytics_server::domain_types::OrderRecord;

/// 建立測試日期
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// 建立測試訂單列
pub fn order(id: &str, event_date: NaiveDate, country: Option<&str>, total: Decimal) -> OrderRecord {
    OrderRecord {
        order_id: id.to_string(),
        event_date,
        country: country.map(str::to_string),
        total,
        quantity: None,
        return_tag: None,
    }
}

/// 建立帶退貨標記的測試訂單列
#[allow(dead_code)]
pub fn returned_order(
    id: &str,
    event_date: NaiveDate,
    country: Option<&str>,
    total: Decimal,
) -> OrderRecord {
    let mut record = order(id, event_date, country, total);
    record.return_tag = Some("devolución".to_string());
    record
}
