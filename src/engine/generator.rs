// ==========================================
// 产线平衡优化引擎 - 多方案生成器
// ==========================================
// 职责: 生成五种人员分配方案
// - 均衡 / 最大产出 / 关键工序 / 最低成本 / 多目标
// 说明: 每个方案独立推导整线产出与瓶颈
// ==========================================

mod core;

#[cfg(test)]
mod tests;

pub use core::StrategyGenerator;
