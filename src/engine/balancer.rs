// ==========================================
// 产线平衡优化引擎 - 比例均衡器
// ==========================================
// 职责: 按工序节拍时间比例分配人员池（基准方案）
// 输入: 工序列表 + 总人数
// 输出: Allocation（含整线产出/瓶颈）
// ==========================================

use crate::config::EngineConfig;
use crate::domain::allocation::Allocation;
use crate::domain::process::Process;
use crate::domain::types::{BottleneckTieBreak, OptimizationType};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::throughput;
use tracing::{debug, instrument};

/// 单次计算允许的最大总人数
pub const MAX_TOTAL_PERSONNEL: f64 = 1.0e6;

/// 最大余数修正的单位上限（0.01 人为一个单位）
const MAX_APPORTION_UNITS: f64 = 1.0e15;

/// 校验工序列表与总人数
///
/// 规则:
/// 1) 工序列表非空
/// 2) 总人数为有限正数，且不超过 MAX_TOTAL_PERSONNEL
/// 3) 节拍时间为有限非负数，工位数 ≥ 1
/// 4) 工序必须属于同一料号
pub fn validate_inputs(
    part_number_id: &str,
    processes: &[Process],
    total_personnel: f64,
) -> EngineResult<()> {
    if processes.is_empty() {
        return Err(EngineError::InvalidInput("工序列表为空".to_string()));
    }
    if !total_personnel.is_finite() || total_personnel <= 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "总人数必须为正数, 实际={}",
            total_personnel
        )));
    }
    if total_personnel > MAX_TOTAL_PERSONNEL {
        return Err(EngineError::InvalidInput(format!(
            "总人数超出上限 {}, 实际={}",
            MAX_TOTAL_PERSONNEL, total_personnel
        )));
    }
    for process in processes {
        if !process.cycle_time_s.is_finite() || process.cycle_time_s < 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "工序{}节拍时间无效: {}",
                process.id, process.cycle_time_s
            )));
        }
        if process.station_count < 1 {
            return Err(EngineError::InvalidInput(format!(
                "工序{}工位数必须 ≥ 1",
                process.id
            )));
        }
        if process.part_number_id != part_number_id {
            return Err(EngineError::InvalidInput(format!(
                "工序{}属于料号{}, 不属于{}",
                process.id, process.part_number_id, part_number_id
            )));
        }
    }
    Ok(())
}

/// 按权重分配总人数，保留两位小数
///
/// 每项先取 round2(total * w / Σw)；若舍入残差使合计偏离总人数，
/// 按最大余数法以 0.01 为单位修正，合计与总人数的偏差不超过 0.005
pub fn apportion(weights: &[f64], total: f64) -> Vec<f64> {
    let weight_sum: f64 = weights.iter().sum();
    if weights.is_empty() || weight_sum <= 0.0 {
        return vec![0.0; weights.len()];
    }

    // 超出整数修正范围时直接返回未舍入的比例份额
    if !(total * 100.0).is_finite() || total * 100.0 > MAX_APPORTION_UNITS {
        return weights.iter().map(|w| total * w / weight_sum).collect();
    }

    let total_units = (total * 100.0).round() as i64;
    let raw: Vec<f64> = weights
        .iter()
        .map(|w| total * 100.0 * w / weight_sum)
        .collect();

    let mut units: Vec<i64> = raw.iter().map(|r| (r + 1e-9).floor() as i64).collect();
    let mut shortfall = total_units - units.iter().sum::<i64>();

    if shortfall > 0 {
        let mut order: Vec<usize> = (0..raw.len()).collect();
        // 余数大者优先；余数相同按输入顺序
        order.sort_by(|&a, &b| {
            let ra = raw[a] - raw[a].floor();
            let rb = raw[b] - raw[b].floor();
            rb.total_cmp(&ra)
        });
        for idx in order.into_iter().cycle() {
            if shortfall == 0 {
                break;
            }
            units[idx] += 1;
            shortfall -= 1;
        }
    }

    units.into_iter().map(|u| u as f64 / 100.0).collect()
}

// ==========================================
// ProportionalBalancer - 比例均衡器
// ==========================================
pub struct ProportionalBalancer {
    tie_break: BottleneckTieBreak,
}

impl ProportionalBalancer {
    pub fn new(tie_break: BottleneckTieBreak) -> Self {
        Self { tie_break }
    }

    /// 按节拍时间比例分配
    ///
    /// # 错误
    /// - 节拍时间合计为 0 时返回 InvalidInput（比例无定义）
    #[instrument(skip(self, processes), fields(
        part_number_id = %part_number_id,
        process_count = processes.len(),
        total_personnel = total_personnel
    ))]
    pub fn balance(
        &self,
        part_number_id: &str,
        processes: &[Process],
        total_personnel: f64,
    ) -> EngineResult<Allocation> {
        validate_inputs(part_number_id, processes, total_personnel)?;

        let cycle_times: Vec<f64> = processes.iter().map(throughput::manual_time).collect();
        let total_cycle_time: f64 = cycle_times.iter().sum();
        if total_cycle_time <= 0.0 {
            return Err(EngineError::InvalidInput(
                "所有工序节拍时间为 0, 无法按比例分配".to_string(),
            ));
        }

        let assigned = apportion(&cycle_times, total_personnel);
        let entries = processes
            .iter()
            .zip(assigned)
            .map(|(process, personnel)| throughput::build_entry(process, personnel))
            .collect();

        let allocation = throughput::finalize(
            part_number_id,
            total_personnel,
            entries,
            Some(OptimizationType::Balanced),
            self.tie_break,
        );
        debug!(
            run_rate = allocation.run_rate,
            bottleneck = ?allocation.bottleneck_process_id,
            "比例均衡完成"
        );
        Ok(allocation)
    }
}

/// 计算基准分配（比例均衡）
pub fn compute_allocation(
    part_number_id: &str,
    processes: &[Process],
    total_personnel: f64,
    config: &EngineConfig,
) -> EngineResult<Allocation> {
    ProportionalBalancer::new(config.tie_break).balance(part_number_id, processes, total_personnel)
}
