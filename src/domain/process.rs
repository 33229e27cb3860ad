// ==========================================
// 产线平衡优化引擎 - 工序目录领域模型
// ==========================================
// 职责: 工序（节拍时间/工位数）与料号（可用人数/基准产出）
// 红线: 被已保存配置引用的工序不可修改
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Process - 工序
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub id: String,             // 工序ID
    pub name: String,           // 工序名称
    pub cycle_time_s: f64,      // 节拍时间 (秒, ≥0)
    pub station_count: u32,     // 工位数 (≥1, 暂不参与计算)
    pub part_number_id: String, // 所属料号
}

impl Process {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        cycle_time_s: f64,
        part_number_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cycle_time_s,
            station_count: 1,
            part_number_id: part_number_id.into(),
        }
    }

    pub fn with_station_count(mut self, station_count: u32) -> Self {
        self.station_count = station_count;
        self
    }
}

// ==========================================
// PartNumber - 料号
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartNumber {
    pub id: String,
    pub head_count_available: f64, // 可分配人数 (HC)
    pub labor_standard: f64,       // 人工标准
    pub baseline_run_rate: f64,    // 基准产出 (件/小时)
}

impl PartNumber {
    pub fn new(id: impl Into<String>, head_count_available: f64) -> Self {
        Self {
            id: id.into(),
            head_count_available,
            labor_standard: 0.0,
            baseline_run_rate: 0.0,
        }
    }
}
