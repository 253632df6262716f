// api.rs - API服務模組，宣告子模組
//
// API服務模組提供外部接口，讓呈現層取得彙總結果：
// - RESTful API接口
// - 看板指標、表格、折線圖序列與 CSV 匯出
// - API路由和處理器

use std::sync::Arc;

use crate::storage::repository::orders::PgOrderRepository;
use crate::summary::SummaryService;

/// REST API實現
pub mod rest;
/// API路由定義
pub mod routes;
/// API處理器模組
pub mod handlers;

/// 各處理器共享的服務狀態
pub type AppState = Arc<SummaryService<PgOrderRepository>>;
