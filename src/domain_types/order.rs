use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 原始訂單記錄
///
/// 來自訂單資料來源的一列資料。`order_id` 不保證唯一：
/// 一張邏輯訂單的每個出貨事件各佔一列。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// 訂單識別碼（不透明，跨列可重複）
    pub order_id: String,
    /// 分桶用日期（出貨建立時間截斷為日期）
    pub event_date: NaiveDate,
    /// 收件國家，缺值的列不進入按國家檢視
    pub country: Option<String>,
    /// 訂單金額（非負，幣別無關）
    pub total: Decimal,
    /// 件數（部分資料來源才有）
    pub quantity: Option<i64>,
    /// 退貨類型標記，有值即視為退貨訂單
    pub return_tag: Option<String>,
}

impl OrderRecord {
    /// 此列是否為退貨訂單
    pub fn has_return(&self) -> bool {
        self.return_tag.is_some()
    }
}
