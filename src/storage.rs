// 重新導出子模塊
pub mod database;
pub mod models;
pub mod repository;

pub use repository::orders::{OrderRepository, PgOrderRepository};
pub use repository::{CountrySelection, DateRange, OrderFilter};
