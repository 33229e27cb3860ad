// ==========================================
// 产线平衡优化引擎 - 平衡配置历史领域模型
// ==========================================
// 红线: 配置一经创建不可修改，只允许整体删除
// 说明: 只保存汇总指标，不保存逐工序分配明细
// ==========================================

use crate::domain::allocation::Allocation;
use crate::domain::types::OptimizationType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub id: String,
    pub part_number_id: String,
    pub head_count: f64,
    pub run_rate: f64,
    pub bottleneck_name: String,
    pub strategy: OptimizationType, // 重新选中时复算使用的方案
    pub created_at: DateTime<Utc>,
}

impl Configuration {
    /// 从当前分配生成快照（自动生成 UUID 和时间戳）
    pub fn snapshot(allocation: &Allocation) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            part_number_id: allocation.part_number_id.clone(),
            head_count: allocation.total_personnel,
            run_rate: allocation.run_rate,
            bottleneck_name: allocation.bottleneck_name(),
            strategy: allocation.strategy.unwrap_or_default(),
            created_at: Utc::now(),
        }
    }
}
