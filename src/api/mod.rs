// ==========================================
// 产线平衡优化引擎 - API 层
// ==========================================
// 职责: 对外业务接口（计算/方案/人工调整/配置历史）
// ==========================================

pub mod error;
pub mod line_balance_api;

pub use error::{ApiError, ApiResult};
pub use line_balance_api::{LineBalanceApi, ModelComparison};
