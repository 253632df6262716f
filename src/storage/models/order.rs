use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain_types::OrderRecord;

/// 訂單查詢結果列
///
/// 對應 `shopify.raw_orders` 的查詢投影：分桶日期取
/// `fulfillment_created_at::date`（各指標統一使用出貨建立時間）。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderRow {
    pub order_id: String,
    pub event_date: NaiveDate,
    pub country: Option<String>,
    pub total: Decimal,
    pub quantity: Option<i64>,
    pub return_tag: Option<String>,
}

impl From<OrderRow> for OrderRecord {
    fn from(row: OrderRow) -> Self {
        OrderRecord {
            order_id: row.order_id,
            event_date: row.event_date,
            country: row.country,
            total: row.total,
            quantity: row.quantity,
            return_tag: row.return_tag,
        }
    }
}
