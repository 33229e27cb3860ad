// ==========================================
// 产线平衡优化引擎 - 配置层
// ==========================================
// 职责: 引擎参数默认值 + 持久化覆写
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod engine_config;
pub mod engine_profile;

// 重导出核心配置
pub use config_manager::{config_keys, ConfigManager};
pub use engine_config::{CategoryTable, EngineConfig, GreedyParams, MultiObjectiveWeights};
pub use engine_profile::EngineProfile;
