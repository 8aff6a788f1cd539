//! 应用层 - 查询（读操作）
//!
//! 首页与详情页的数据来源

mod details;
mod index;

pub use details::{DetailsView, GetDetailsHandler};
pub use index::{GetIndexHandler, IndexView};
