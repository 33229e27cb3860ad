// ==========================================
// 产线平衡优化引擎 - 优化方案定义
// ==========================================
// 用途：
// - 多方案试算（不落库），供对比与一键应用；
// - 应用方案时直接替换当前分配的明细/产出/瓶颈。

use crate::domain::allocation::Allocation;
use crate::domain::types::OptimizationType;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// 优化方案（方案类型 + 试算结果）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationModel {
    pub model_type: OptimizationType,
    pub name: String,
    pub description: String,
    pub allocation: Allocation,
}

impl OptimizationModel {
    pub fn new(model_type: OptimizationType, description: String, allocation: Allocation) -> Self {
        Self {
            model_type,
            name: model_type.title().to_string(),
            description,
            allocation,
        }
    }
}

/// 应用方案
///
/// 保留当前分配的料号，总人数/明细/整线产出/瓶颈取自方案；
/// 应用后的分配视为未经人工调整
pub fn apply_model(allocation: &Allocation, model: &OptimizationModel) -> Allocation {
    if (allocation.total_personnel - model.allocation.total_personnel).abs() > 1e-9 {
        warn!(
            current_total = allocation.total_personnel,
            model_total = model.allocation.total_personnel,
            model = %model.model_type,
            "方案总人数与当前分配不一致，按方案总人数应用"
        );
    }
    Allocation {
        part_number_id: allocation.part_number_id.clone(),
        total_personnel: model.allocation.total_personnel,
        entries: model.allocation.entries.clone(),
        run_rate: model.allocation.run_rate,
        bottleneck_process_id: model.allocation.bottleneck_process_id.clone(),
        strategy: Some(model.model_type),
        manually_edited: false,
    }
}
