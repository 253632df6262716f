use axum::Router;

use super::AppState;

// 宣告子模組
pub mod summary;
pub mod system;

/// 組合所有 API 路由
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(summary::routes())
        .merge(system::routes())
}
