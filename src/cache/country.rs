use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use moka::future::Cache;

use crate::storage::repository::orders::OrderRepository;

/// 「不過濾」哨兵值，前端下拉選單的第一個選項
pub const COUNTRY_FILTER_ALL: &str = "Todos";

const COUNTRY_LIST_KEY: &str = "countries";

/// 國家清單快取
///
/// 全服務唯一的跨請求狀態：去重後的出貨國家清單，TTL 到期後下一次
/// 請求重新載入。並發重刷是冪等的（重算後覆寫等值內容），
/// 除快取原語自身的同步外不需要額外鎖。
pub struct CountryCache {
    cache: Cache<&'static str, Arc<Vec<String>>>,
}

impl CountryCache {
    /// 創建新的國家清單快取
    ///
    /// # Arguments
    /// * `capacity` - 快取容量
    /// * `ttl_secs` - 快取過期時間（秒）
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    /// 取得國家清單，未命中時透過資料層重新載入
    pub async fn get_or_refresh<R: OrderRepository + ?Sized>(
        &self,
        repo: &R,
    ) -> Result<Arc<Vec<String>>> {
        if let Some(countries) = self.cache.get(COUNTRY_LIST_KEY).await {
            return Ok(countries);
        }

        let fresh = Arc::new(repo.list_countries().await?);
        self.cache.insert(COUNTRY_LIST_KEY, fresh.clone()).await;
        tracing::info!("國家清單快取已重新載入，共 {} 國", fresh.len());
        Ok(fresh)
    }

    /// 取得含「不過濾」哨兵的下拉選單選項
    pub async fn selector_options<R: OrderRepository + ?Sized>(
        &self,
        repo: &R,
    ) -> Result<Vec<String>> {
        let countries = self.get_or_refresh(repo).await?;
        let mut options = Vec::with_capacity(countries.len() + 1);
        options.push(COUNTRY_FILTER_ALL.to_string());
        options.extend(countries.iter().cloned());
        Ok(options)
    }

    /// 清空快取（測試用）
    pub async fn invalidate(&self) {
        self.cache.invalidate(COUNTRY_LIST_KEY).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::repository::orders::MockOrderRepository;

    #[tokio::test]
    async fn test_second_read_hits_cache() {
        let mut repo = MockOrderRepository::new();
        repo.expect_list_countries()
            .times(1)
            .returning(|| Ok(vec!["DE".to_string(), "ES".to_string()]));

        let cache = CountryCache::new(10, 3600);
        let first = cache.get_or_refresh(&repo).await.unwrap();
        let second = cache.get_or_refresh(&repo).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(*first, vec!["DE".to_string(), "ES".to_string()]);
    }

    #[tokio::test]
    async fn test_selector_options_lead_with_sentinel() {
        let mut repo = MockOrderRepository::new();
        repo.expect_list_countries()
            .returning(|| Ok(vec!["ES".to_string(), "FR".to_string()]));

        let cache = CountryCache::new(10, 3600);
        let options = cache.selector_options(&repo).await.unwrap();
        assert_eq!(options, ["Todos", "ES", "FR"]);
    }
}
