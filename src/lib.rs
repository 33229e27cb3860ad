// ==========================================
// 产线平衡优化引擎 - 核心库
// ==========================================
// 输入: 工序目录（节拍时间） + 可分配人数
// 输出: 人员分配、整线产出、瓶颈工序、五种优化方案
// 系统定位: 纯计算引擎 + 追加式配置历史
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 产出计算与分配方案
pub mod engine;

// 数据仓储层 - 配置历史
pub mod repository;

// 配置层 - 引擎参数
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    Allocation, AllocationEntry, BottleneckTieBreak, Configuration, OptimizationType, PartNumber,
    Process, ProcessCategory,
};

pub use engine::{
    apply_model, compute_allocation, AllocationEditor, EngineError, EngineResult,
    OptimizationModel, ProportionalBalancer, StrategyGenerator,
};

pub use config::{ConfigManager, EngineConfig, EngineProfile};

pub use repository::ConfigurationRepository;

pub use api::{ApiError, ApiResult, LineBalanceApi, ModelComparison};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "产线平衡优化引擎";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
