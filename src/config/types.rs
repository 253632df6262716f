use serde::{Deserialize, Serialize};

use crate::config::validation::{ValidationError, ValidationUtils, Validator};
use crate::domain_types::CountPolicy;

/// 應用程序配置結構
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub database: DatabaseConfig,
    pub log: LogConfig,
    pub server: ServerConfig,
    pub rest_api: RestApiConfig,
    pub cache: CacheConfig,
    pub aggregation: AggregationPolicyConfig,
}

impl Validator for ApplicationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證各個部分的配置
        self.database.validate()?;
        self.log.validate()?;
        self.server.validate()?;
        self.rest_api.validate()?;
        self.cache.validate()?;

        Ok(())
    }
}

/// 數據庫配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime_secs: u64,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl Validator for DatabaseConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證數據庫配置
        ValidationUtils::not_empty(&self.host, "database.host")?;
        ValidationUtils::not_empty(&self.username, "database.username")?;
        ValidationUtils::not_empty(&self.database, "database.database")?;
        ValidationUtils::in_range(self.port, 1, 65535, "database.port")?;
        ValidationUtils::in_range(
            self.max_connections,
            self.min_connections,
            1000,
            "database.max_connections",
        )?;

        Ok(())
    }
}

impl DatabaseConfig {
    /// 獲取最大生命週期持續時間
    pub fn max_lifetime(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.max_lifetime_secs)
    }

    /// 獲取獲取連接超時持續時間
    pub fn acquire_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.acquire_timeout_secs)
    }

    /// 獲取閒置超時持續時間
    pub fn idle_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.idle_timeout_secs)
    }
}

/// 日誌配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

impl Validator for LogConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證日誌級別
        ValidationUtils::one_of(
            &self.level.to_lowercase(),
            &["trace", "debug", "info", "warn", "error"]
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<String>>(),
            "log.level",
        )?;

        // 驗證日誌格式
        ValidationUtils::one_of(
            &self.format.to_lowercase(),
            &["pretty", "json"]
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<String>>(),
            "log.format",
        )?;

        Ok(())
    }
}

/// 伺服器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Validator for ServerConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證服務器配置
        ValidationUtils::not_empty(&self.host, "server.host")?;
        ValidationUtils::in_range(self.port, 1, 65535, "server.port")?;

        Ok(())
    }
}

/// REST API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestApiConfig {
    pub base_path: String,
    pub request_timeout: u64,
    pub cors_allow_all: bool,
    pub cors_origins: Vec<String>,
}

impl Validator for RestApiConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證API配置
        ValidationUtils::not_empty(&self.base_path, "rest_api.base_path")?;
        ValidationUtils::in_range(self.request_timeout, 1, 300, "rest_api.request_timeout")?;

        // 如果不允許所有來源，必須指定允許的來源
        if !self.cors_allow_all && self.cors_origins.is_empty() {
            return Err(ValidationError::InvalidValue(
                "未指定允許的CORS來源，且未啟用允許所有來源".to_string(),
            ));
        }

        Ok(())
    }
}

/// 快取配置
///
/// 目前唯一的跨請求狀態是國家清單快取，逾時後下一次請求重新載入。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub country_ttl_secs: u64,
    pub capacity: u64,
}

impl Validator for CacheConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::in_range(self.country_ttl_secs, 1, 86400, "cache.country_ttl_secs")?;
        ValidationUtils::in_range(self.capacity, 1, 100_000, "cache.capacity")?;

        Ok(())
    }
}

/// 聚合計數策略配置
///
/// 來源報表在訂單計數與營收去重上不一致；這裡定一次，全服務共用，
/// 不在呼叫端各自猜。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationPolicyConfig {
    pub count_policy: CountPolicy,
    pub dedup_fulfillments: bool,
}

impl Default for AggregationPolicyConfig {
    fn default() -> Self {
        Self {
            count_policy: CountPolicy::DistinctOrders,
            dedup_fulfillments: true,
        }
    }
}
