// ==========================================
// 产线平衡优化引擎 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod configuration_repo;
pub mod error;

// 重导出核心仓储
pub use configuration_repo::ConfigurationRepository;
pub use error::{RepositoryError, RepositoryResult};
