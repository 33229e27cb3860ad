// ==========================================
// 产线平衡优化引擎 - 人工调整
// ==========================================
// 职责: 单工序人数覆写 + 总人数约束校验 + 指标重算
// 红线: 调整后 Σ分配人数 ≤ 总人数
// ==========================================

use crate::domain::allocation::Allocation;
use crate::domain::types::BottleneckTieBreak;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::throughput;
use tracing::{info, instrument, warn};

/// 浮点比较容差（避免 2.1 + 0.9 这类合法输入被误判超限）
const BUDGET_EPSILON: f64 = 1e-9;

// ==========================================
// AllocationEditor
// ==========================================
pub struct AllocationEditor {
    tie_break: BottleneckTieBreak,
}

impl AllocationEditor {
    pub fn new(tie_break: BottleneckTieBreak) -> Self {
        Self { tie_break }
    }

    /// 修改单个工序的分配人数
    ///
    /// # 错误
    /// - InvalidPersonnel: 新值为负数或非有限数
    /// - UnknownProcess: 工序不在当前分配中
    /// - BudgetExceeded: 其余工序合计 + 新值 > 总人数（携带最大允许值）
    ///
    /// # 返回
    /// 新的 Allocation（原分配不变）
    #[instrument(skip(self, allocation), fields(
        part_number_id = %allocation.part_number_id,
        total_personnel = allocation.total_personnel
    ))]
    pub fn update_personnel(
        &self,
        allocation: &Allocation,
        process_id: &str,
        new_value: f64,
    ) -> EngineResult<Allocation> {
        if !new_value.is_finite() || new_value < 0.0 {
            return Err(EngineError::InvalidPersonnel {
                process_id: process_id.to_string(),
                value: new_value,
            });
        }

        let index = allocation
            .entries
            .iter()
            .position(|e| e.process_id == process_id)
            .ok_or_else(|| EngineError::UnknownProcess(process_id.to_string()))?;

        let others_total: f64 = allocation
            .entries
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, e)| e.assigned_personnel)
            .sum();

        if others_total + new_value > allocation.total_personnel + BUDGET_EPSILON {
            let max_allowed = (allocation.total_personnel - others_total).max(0.0);
            warn!(process_id, new_value, max_allowed, "人工调整超出总人数");
            return Err(EngineError::BudgetExceeded {
                process_id: process_id.to_string(),
                requested: new_value,
                max_allowed,
            });
        }

        let mut updated = allocation.clone();
        throughput::recompute_entry(&mut updated.entries[index], new_value);
        throughput::rederive(&mut updated, self.tie_break);
        updated.manually_edited = true;

        info!(
            process_id,
            new_value,
            run_rate = updated.run_rate,
            bottleneck = ?updated.bottleneck_process_id,
            "人工调整完成"
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::process::Process;
    use crate::domain::types::OptimizationType;

    fn two_step_allocation() -> Allocation {
        let a = Process::new("A", "Soldadura", 10.0, "PN-1");
        let b = Process::new("B", "Inspeccion de Calidad", 12.0, "PN-1");
        throughput::finalize(
            "PN-1",
            3.0,
            vec![throughput::build_entry(&a, 2.0), throughput::build_entry(&b, 0.9)],
            Some(OptimizationType::Balanced),
            BottleneckTieBreak::FirstOccurrence,
        )
    }

    fn editor() -> AllocationEditor {
        AllocationEditor::new(BottleneckTieBreak::FirstOccurrence)
    }

    #[test]
    fn test_rejects_budget_overflow_with_max_allowed() {
        let err = editor()
            .update_personnel(&two_step_allocation(), "B", 1.2)
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.max_allowed(), Some(1.0));
    }

    #[test]
    fn test_accepts_edit_up_to_budget() {
        let original = two_step_allocation();
        let updated = editor().update_personnel(&original, "B", 1.0).unwrap();

        let b = updated.entry("B").unwrap();
        assert_eq!(b.assigned_personnel, 1.0);
        assert_eq!(b.manual_time_s, 12.0);
        assert_eq!(b.units_per_hour, 300.0);
        assert_eq!(b.flow_time_s, 12.0);
        assert!(updated.manually_edited);
        assert!(updated.assigned_total() <= updated.total_personnel);

        // 原分配不变
        assert_eq!(original.entry("B").unwrap().assigned_personnel, 0.9);
    }

    #[test]
    fn test_recomputes_bottleneck_after_edit() {
        let original = two_step_allocation();
        // A: 3600 / (10 / 2) = 720, B: 3600 / (12 / 0.9) = 270
        assert_eq!(original.bottleneck_process_id.as_deref(), Some("B"));
        assert_eq!(original.run_rate, 270.0);

        let updated = editor().update_personnel(&original, "A", 0.5).unwrap();
        // A: 3600 / (10 / 0.5) = 180
        assert_eq!(updated.run_rate, 180.0);
        assert_eq!(updated.bottleneck_process_id.as_deref(), Some("A"));
    }

    #[test]
    fn test_zero_personnel_is_allowed() {
        let updated = editor()
            .update_personnel(&two_step_allocation(), "A", 0.0)
            .unwrap();
        let a = updated.entry("A").unwrap();
        assert_eq!(a.units_per_hour, 0.0);
        assert_eq!(a.flow_time_s, 0.0);
        assert_eq!(updated.run_rate, 0.0);
    }

    #[test]
    fn test_rejects_negative_and_unknown() {
        let allocation = two_step_allocation();
        assert!(matches!(
            editor().update_personnel(&allocation, "A", -0.5),
            Err(EngineError::InvalidPersonnel { .. })
        ));
        assert!(matches!(
            editor().update_personnel(&allocation, "A", f64::NAN),
            Err(EngineError::InvalidPersonnel { .. })
        ));
        assert!(matches!(
            editor().update_personnel(&allocation, "Z", 0.5),
            Err(EngineError::UnknownProcess(_))
        ));
    }
}
