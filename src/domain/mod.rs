// ==========================================
// 产线平衡优化引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod allocation;
pub mod configuration;
pub mod process;
pub mod types;

// 重导出核心类型
pub use allocation::{Allocation, AllocationEntry};
pub use configuration::Configuration;
pub use process::{PartNumber, Process};
pub use types::{BottleneckTieBreak, OptimizationType, ProcessCategory};
