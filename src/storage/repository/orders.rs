use anyhow::Result;
use sqlx::PgPool;

use crate::domain_types::OrderRecord;
use crate::storage::models::order::OrderRow;
use crate::storage::repository::{CountrySelection, DbExecutor, OrderFilter};

/// 訂單資料存取接口
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait OrderRepository: Send + Sync {
    /// 取得日期範圍（與可選國家）內的原始訂單列，依事件日期遞增
    async fn fetch_orders(&self, filter: &OrderFilter) -> Result<Vec<OrderRecord>>;

    /// 取得出現過的國家清單（去重、排序、排除空值）
    async fn list_countries(&self) -> Result<Vec<String>>;
}

/// PostgreSQL訂單資料存取實現（唯讀）
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DbExecutor for PgOrderRepository {
    fn get_pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl OrderRepository for PgOrderRepository {
    async fn fetch_orders(&self, filter: &OrderFilter) -> Result<Vec<OrderRecord>> {
        // 條件不同則用不同的預備語句，過濾值一律走參數綁定
        let rows: Vec<OrderRow> = match &filter.country {
            CountrySelection::All => {
                sqlx::query_as::<_, OrderRow>(
                    r#"
                    SELECT
                        order_id,
                        fulfillment_created_at::date AS event_date,
                        shipping_country AS country,
                        total,
                        quantity,
                        tipo_devolucion AS return_tag
                    FROM shopify.raw_orders
                    WHERE fulfillment_created_at::date >= $1
                      AND fulfillment_created_at::date <= $2
                    ORDER BY event_date ASC
                    "#,
                )
                .bind(filter.range.start)
                .bind(filter.range.end)
                .fetch_all(self.get_pool())
                .await?
            }
            CountrySelection::Only(country) => {
                sqlx::query_as::<_, OrderRow>(
                    r#"
                    SELECT
                        order_id,
                        fulfillment_created_at::date AS event_date,
                        shipping_country AS country,
                        total,
                        quantity,
                        tipo_devolucion AS return_tag
                    FROM shopify.raw_orders
                    WHERE fulfillment_created_at::date >= $1
                      AND fulfillment_created_at::date <= $2
                      AND shipping_country = $3
                    ORDER BY event_date ASC
                    "#,
                )
                .bind(filter.range.start)
                .bind(filter.range.end)
                .bind(country)
                .fetch_all(self.get_pool())
                .await?
            }
        };

        Ok(rows.into_iter().map(OrderRecord::from).collect())
    }

    async fn list_countries(&self) -> Result<Vec<String>> {
        let countries: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT shipping_country
            FROM shopify.raw_orders
            WHERE shipping_country IS NOT NULL
            ORDER BY shipping_country ASC
            "#,
        )
        .fetch_all(self.get_pool())
        .await?;

        Ok(countries)
    }
}
