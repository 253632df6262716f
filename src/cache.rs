// 重新導出子模塊
pub mod country;

pub use country::{CountryCache, COUNTRY_FILTER_ALL};
