use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{Duration, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::api::AppState;
use crate::domain_types::Granularity;
use crate::storage::repository::{CountrySelection, DateRange};
use crate::summary::{ComparisonRequest, EvolutionRequest, SummaryError};

/// 演變檢視查詢參數
#[derive(Deserialize)]
pub struct EvolutionQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub granularity: Option<String>,
    pub country: Option<String>,
    pub rollup: Option<bool>,
}

/// 期間比較查詢參數
#[derive(Deserialize)]
pub struct ComparisonQuery {
    pub boundary: Option<String>,
    pub window_days: Option<i64>,
}

type ErrorBody = (StatusCode, Json<serde_json::Value>);

/// 把服務錯誤轉成可見的 JSON 回應
///
/// 連線失敗不致命：回 503 與訊息，由呈現層決定如何顯示；
/// 參數錯誤回 400，本次請求即告終，不重試。
fn error_response(error: SummaryError) -> ErrorBody {
    let status = match &error {
        SummaryError::InvalidArgument(_) | SummaryError::Metric(_) => StatusCode::BAD_REQUEST,
        SummaryError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
        SummaryError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    tracing::error!("彙總請求失敗: {}", error);
    (status, Json(json!({ "error": error.to_string() })))
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate, ErrorBody> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("{} 不是有效日期 (YYYY-MM-DD): {}", field, value) })),
        )
    })
}

fn evolution_request(params: &EvolutionQuery) -> Result<EvolutionRequest, ErrorBody> {
    let today = Utc::now().date_naive();

    let end = match &params.to {
        Some(value) => parse_date(value, "to")?,
        None => today,
    };
    let start = match &params.from {
        Some(value) => parse_date(value, "from")?,
        // 默認最近30天
        None => today - Duration::days(30),
    };

    let granularity = match &params.granularity {
        Some(value) => Granularity::from_str(value).ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("未知的粒度: {}", value) })),
            )
        })?,
        None => Granularity::Day,
    };

    let country = params
        .country
        .as_deref()
        .map(CountrySelection::parse)
        .unwrap_or_default();

    Ok(EvolutionRequest {
        range: DateRange::new(start, end),
        granularity,
        country,
        rollup_countries: params.rollup.unwrap_or(false),
    })
}

/// 演變檢視：表格 + 折線圖序列 + 亮點指標
pub async fn evolution(
    State(service): State<AppState>,
    Query(params): Query<EvolutionQuery>,
) -> Result<impl IntoResponse, ErrorBody> {
    let request = evolution_request(&params)?;
    let report = service.evolution(&request).await.map_err(error_response)?;
    Ok(Json(report))
}

/// 演變檢視的 CSV 匯出
pub async fn export_evolution(
    State(service): State<AppState>,
    Query(params): Query<EvolutionQuery>,
) -> Result<impl IntoResponse, ErrorBody> {
    let request = evolution_request(&params)?;
    let (filename, csv) = service
        .export_evolution(&request)
        .await
        .map_err(error_response)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    ))
}

/// 期間比較：最近窗 vs. 前一窗的看板指標
pub async fn comparison(
    State(service): State<AppState>,
    Query(params): Query<ComparisonQuery>,
) -> Result<impl IntoResponse, ErrorBody> {
    let boundary = match &params.boundary {
        Some(value) => parse_date(value, "boundary")?,
        // 默認以今天為界，比較最近30天與其前30天
        None => Utc::now().date_naive(),
    };

    let request = ComparisonRequest {
        boundary,
        window_days: params.window_days.unwrap_or(30),
    };
    let report = service.comparison(&request).await.map_err(error_response)?;
    Ok(Json(report))
}

/// 國家下拉選單選項（含「Todos」哨兵）
pub async fn countries(
    State(service): State<AppState>,
) -> Result<impl IntoResponse, ErrorBody> {
    let options = service.country_options().await.map_err(error_response)?;
    Ok(Json(options))
}
