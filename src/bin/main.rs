use std::sync::Arc;

use anyhow::{anyhow, Result};
use tokio::signal;
use tracing::{error, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use order_analytics_server::api::rest::RestApi;
use order_analytics_server::config;
use order_analytics_server::storage::database;
use order_analytics_server::storage::repository::orders::PgOrderRepository;
use order_analytics_server::summary::SummaryService;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化配置
    let app_config = config::init_config()?;

    // 初始化日誌系統
    init_logging(&app_config.log)?;

    // 獲取全局資料庫連線池
    let db_pool = database::get_db_pool(true).await?;

    // 組裝資料層與彙總服務
    let repo = Arc::new(PgOrderRepository::new(db_pool.clone()));
    let service = Arc::new(SummaryService::new(
        repo,
        app_config.aggregation.clone(),
        &app_config.cache,
    ));

    // 初始化REST API
    let rest_api = RestApi::new(
        app_config.server.clone(),
        app_config.rest_api.clone(),
        service,
    );

    info!("伺服器初始化完成，等待請求...");
    info!("監聽端口: {}", app_config.server.port);

    // 在背景啟動 API，前台等待關閉信號
    let server_task = tokio::spawn(rest_api.start());

    match signal::ctrl_c().await {
        Ok(()) => {
            info!("接收到關閉信號，正在退出...");
            server_task.abort();
            Ok(())
        }
        Err(err) => {
            error!("無法監聽關閉信號: {}", err);
            Err(anyhow!("無法監聽關閉信號: {}", err))
        }
    }
}

// 初始化日誌系統
fn init_logging(log_config: &config::LogConfig) -> Result<()> {
    let level = match log_config.level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO, // 默認為INFO
    };

    let builder = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_max_level(level);

    if log_config.format.eq_ignore_ascii_case("json") {
        tracing::subscriber::set_global_default(builder.json().finish())
            .map_err(|e| anyhow!("無法設置日誌訂閱器: {}", e))?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())
            .map_err(|e| anyhow!("無法設置日誌訂閱器: {}", e))?;
    }

    Ok(())
}
