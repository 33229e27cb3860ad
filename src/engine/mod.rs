// ==========================================
// 产线平衡优化引擎 - 引擎层
// ==========================================
// 职责: 纯计算，不访问数据库
// 红线: 同样的输入必须得到同样的输出（无随机数/无时间依赖）
// ==========================================

pub mod balancer;
pub mod classifier;
pub mod editor;
pub mod error;
pub mod generator;
pub mod greedy;
pub mod strategy;
pub mod throughput;

// 重导出核心引擎
pub use balancer::{compute_allocation, ProportionalBalancer};
pub use classifier::{KeywordClassifier, ProcessClassifier, TaggedClassifier};
pub use editor::AllocationEditor;
pub use error::{EngineError, EngineResult};
pub use generator::StrategyGenerator;
pub use greedy::{GreedyOptimizer, GreedyOutcome};
pub use strategy::{apply_model, OptimizationModel};
