// 重新導出子模塊
pub mod order;

pub use order::OrderRow;
