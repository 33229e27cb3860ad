// ==========================================
// 产线平衡优化引擎 - 产出计算器
// ==========================================
// 职责: (节拍时间, 分配人数) -> 手工时间 / UPH / 流动时间
//       瓶颈与整线产出推导
// 红线: 零人员或零手工时间时 UPH = 0，绝不除零
// ==========================================

use crate::domain::allocation::{Allocation, AllocationEntry};
use crate::domain::process::Process;
use crate::domain::types::{BottleneckTieBreak, OptimizationType};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// 保留两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 手工时间 = 节拍时间（不按工位数折算）
pub fn manual_time(process: &Process) -> f64 {
    process.cycle_time_s
}

/// 单工序产出 (件/小时)
pub fn units_per_hour(manual_time_s: f64, operators: f64) -> f64 {
    if operators <= 0.0 || manual_time_s <= 0.0 {
        return 0.0;
    }
    (SECONDS_PER_HOUR / (manual_time_s / operators)).round()
}

/// 流动时间 (秒/件)
pub fn flow_time(manual_time_s: f64, operators: f64) -> f64 {
    if operators <= 0.0 {
        return 0.0;
    }
    round2(manual_time_s / operators)
}

/// 按分配人数生成单工序明细
pub fn build_entry(process: &Process, assigned_personnel: f64) -> AllocationEntry {
    let manual_time_s = manual_time(process);
    AllocationEntry {
        process_id: process.id.clone(),
        process_name: process.name.clone(),
        assigned_personnel,
        manual_time_s,
        units_per_hour: units_per_hour(manual_time_s, assigned_personnel),
        flow_time_s: flow_time(manual_time_s, assigned_personnel),
    }
}

/// 修改人数后重算该工序的 UPH / 流动时间（手工时间不变）
pub fn recompute_entry(entry: &mut AllocationEntry, assigned_personnel: f64) {
    entry.assigned_personnel = assigned_personnel;
    entry.units_per_hour = units_per_hour(entry.manual_time_s, assigned_personnel);
    entry.flow_time_s = flow_time(entry.manual_time_s, assigned_personnel);
}

/// 瓶颈工序（UPH 最小者）；明细为空时返回 None
pub fn bottleneck(entries: &[AllocationEntry], tie_break: BottleneckTieBreak) -> Option<&AllocationEntry> {
    let mut current: Option<&AllocationEntry> = None;
    for entry in entries {
        current = match current {
            None => Some(entry),
            Some(best) => {
                let replace = match tie_break {
                    BottleneckTieBreak::FirstOccurrence => entry.units_per_hour < best.units_per_hour,
                    BottleneckTieBreak::LastOccurrence => entry.units_per_hour <= best.units_per_hour,
                };
                if replace {
                    Some(entry)
                } else {
                    Some(best)
                }
            }
        };
    }
    current
}

/// 整线产出 = min(UPH)；明细为空时为 0
pub fn run_rate(entries: &[AllocationEntry]) -> f64 {
    entries
        .iter()
        .map(|e| e.units_per_hour)
        .reduce(f64::min)
        .unwrap_or(0.0)
}

/// 与整线产出并列的所有工序（按输入顺序）
pub fn bottleneck_candidates(entries: &[AllocationEntry]) -> Vec<&AllocationEntry> {
    if entries.is_empty() {
        return Vec::new();
    }
    let rate = run_rate(entries);
    entries.iter().filter(|e| e.units_per_hour == rate).collect()
}

/// 组装 Allocation 并推导整线产出与瓶颈
pub fn finalize(
    part_number_id: &str,
    total_personnel: f64,
    entries: Vec<AllocationEntry>,
    strategy: Option<OptimizationType>,
    tie_break: BottleneckTieBreak,
) -> Allocation {
    let run_rate = run_rate(&entries);
    let bottleneck_process_id = bottleneck(&entries, tie_break).map(|e| e.process_id.clone());
    Allocation {
        part_number_id: part_number_id.to_string(),
        total_personnel,
        entries,
        run_rate,
        bottleneck_process_id,
        strategy,
        manually_edited: false,
    }
}

/// 重新推导已有分配的整线产出与瓶颈
pub fn rederive(allocation: &mut Allocation, tie_break: BottleneckTieBreak) {
    allocation.run_rate = run_rate(&allocation.entries);
    allocation.bottleneck_process_id =
        bottleneck(&allocation.entries, tie_break).map(|e| e.process_id.clone());
}
