// src/api/rest.rs
use axum::Router;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

use anyhow::Result;
use tracing::info;

use super::routes::api_routes; // 導入模組化的路由
use super::AppState;
use crate::config::{RestApiConfig, ServerConfig};

pub struct RestApi {
    server_config: ServerConfig,
    api_config: RestApiConfig,
    state: AppState,
}

impl RestApi {
    pub fn new(server_config: ServerConfig, api_config: RestApiConfig, state: AppState) -> Self {
        Self {
            server_config,
            api_config,
            state,
        }
    }

    pub async fn start(self) -> Result<()> {
        // 建立應用
        let app = self.build_app()?;

        // 解析地址
        let addr = SocketAddr::from((
            self.server_config.host.parse::<std::net::IpAddr>()?,
            self.server_config.port,
        ));

        info!("Starting REST API server on {}", addr);

        // 啟動服務器
        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    fn build_app(&self) -> Result<Router> {
        // 使用模組化的路由
        let api_router = api_routes().with_state(self.state.clone());

        // 建立應用並逐層添加中間件
        let app = Router::new()
            .nest(&self.api_config.base_path, api_router)
            // 追蹤層
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().include_headers(true))
                    .on_response(DefaultOnResponse::new().include_headers(true)),
            )
            // CORS
            .layer(self.build_cors_layer())
            // 壓縮
            .layer(CompressionLayer::new())
            // 超時設置
            .layer(TimeoutLayer::new(Duration::from_secs(
                self.api_config.request_timeout,
            )));

        Ok(app)
    }

    fn build_cors_layer(&self) -> CorsLayer {
        let cors = CorsLayer::new()
            .allow_methods(vec![axum::http::Method::GET])
            .allow_headers(vec![axum::http::header::CONTENT_TYPE]);

        // 根據配置設置允許的來源
        if self.api_config.cors_allow_all {
            cors.allow_origin(tower_http::cors::Any)
        } else {
            cors.allow_origin(
                self.api_config
                    .cors_origins
                    .iter()
                    .map(|s| s.parse().unwrap())
                    .collect::<Vec<_>>(),
            )
        }
    }
}
