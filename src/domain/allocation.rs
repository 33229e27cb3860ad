// ==========================================
// 产线平衡优化引擎 - 人员分配领域模型
// ==========================================
// 职责: 分配明细 + 整线产出/瓶颈
// 说明: Allocation 是不可变值，每次计算/编辑都会返回新对象
// ==========================================

use crate::domain::types::OptimizationType;
use serde::{Deserialize, Serialize};

// ==========================================
// AllocationEntry - 单工序分配明细
// ==========================================
// 红线: manual_time_s 恒等于工序节拍时间
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationEntry {
    pub process_id: String,
    pub process_name: String,
    pub assigned_personnel: f64, // 分配人数 (可为小数)
    pub manual_time_s: f64,      // 手工时间 (秒)
    pub units_per_hour: f64,     // 单工序产出 (件/小时)
    pub flow_time_s: f64,        // 流动时间 (秒/件)
}

// ==========================================
// Allocation - 整线人员分配
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub part_number_id: String,
    pub total_personnel: f64,
    pub entries: Vec<AllocationEntry>,
    pub run_rate: f64,                         // 整线产出 = min(UPH)
    pub bottleneck_process_id: Option<String>, // 瓶颈工序
    pub strategy: Option<OptimizationType>,    // 产生该分配的方案
    pub manually_edited: bool,                 // 是否经过人工调整
}

impl Allocation {
    pub fn entry(&self, process_id: &str) -> Option<&AllocationEntry> {
        self.entries.iter().find(|e| e.process_id == process_id)
    }

    /// 瓶颈工序明细
    pub fn bottleneck(&self) -> Option<&AllocationEntry> {
        self.bottleneck_process_id
            .as_deref()
            .and_then(|id| self.entry(id))
    }

    /// 瓶颈工序名称（无瓶颈时为空串）
    pub fn bottleneck_name(&self) -> String {
        self.bottleneck()
            .map(|e| e.process_name.clone())
            .unwrap_or_default()
    }

    /// 已分配人数合计
    pub fn assigned_total(&self) -> f64 {
        self.entries.iter().map(|e| e.assigned_personnel).sum()
    }

    /// 未分配人数（可能为浮点残差）
    pub fn unassigned_personnel(&self) -> f64 {
        self.total_personnel - self.assigned_total()
    }
}
