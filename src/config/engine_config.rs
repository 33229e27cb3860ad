// ==========================================
// 产线平衡优化引擎 - 引擎参数
// ==========================================
// 职责: 所有可调参数的默认值与校验
// ==========================================

use crate::domain::types::{BottleneckTieBreak, ProcessCategory};
use serde::{Deserialize, Serialize};

/// 贪心局部搜索参数（MaxRunRate / MinCost 共用）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GreedyParams {
    pub step: f64,           // 每次追加人数
    pub max_iterations: u32, // 最大迭代次数
    pub epsilon: f64,        // 剩余人数小于该值即视为收敛
    pub seed_floor: f64,     // 每个工序的保底人数
}

impl Default for GreedyParams {
    fn default() -> Self {
        Self {
            step: 0.1,
            max_iterations: 50,
            epsilon: 0.01,
            seed_floor: 0.1,
        }
    }
}

/// 多目标融合权重
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiObjectiveWeights {
    pub balanced: f64,
    pub max_run_rate: f64,
    pub critical: f64,
}

impl Default for MultiObjectiveWeights {
    fn default() -> Self {
        Self {
            balanced: 0.3,
            max_run_rate: 0.5,
            critical: 0.2,
        }
    }
}

/// 按工序分类取值的参数表（关键度权重 / 每小时人工成本）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryTable {
    pub quality: f64,
    pub assembly: f64,
    pub general: f64,
}

impl CategoryTable {
    pub fn get(&self, category: ProcessCategory) -> f64 {
        match category {
            ProcessCategory::Quality => self.quality,
            ProcessCategory::Assembly => self.assembly,
            ProcessCategory::General => self.general,
        }
    }

    fn all_positive(&self) -> bool {
        [self.quality, self.assembly, self.general]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }
}

// ==========================================
// EngineConfig - 引擎配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub greedy: GreedyParams,
    pub multi_objective: MultiObjectiveWeights,
    pub criticality_weights: CategoryTable,
    pub cost_per_hour: CategoryTable,
    pub tie_break: BottleneckTieBreak,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            greedy: GreedyParams::default(),
            multi_objective: MultiObjectiveWeights::default(),
            criticality_weights: CategoryTable {
                quality: 3.0,
                assembly: 2.0,
                general: 1.0,
            },
            cost_per_hour: CategoryTable {
                quality: 15.0,
                assembly: 12.0,
                general: 10.0,
            },
            tie_break: BottleneckTieBreak::FirstOccurrence,
        }
    }
}

impl EngineConfig {
    /// 参数校验
    ///
    /// # 返回
    /// - Err((字段名, 原因))
    pub fn validate(&self) -> Result<(), (&'static str, String)> {
        let g = &self.greedy;
        if !(g.step.is_finite() && g.step > 0.0) {
            return Err(("greedy.step", format!("必须为正数, 实际={}", g.step)));
        }
        if g.max_iterations == 0 {
            return Err(("greedy.max_iterations", "必须大于 0".to_string()));
        }
        if !(g.epsilon.is_finite() && g.epsilon >= 0.0) {
            return Err(("greedy.epsilon", format!("不能为负数, 实际={}", g.epsilon)));
        }
        if !(g.seed_floor.is_finite() && g.seed_floor >= 0.0) {
            return Err(("greedy.seed_floor", format!("不能为负数, 实际={}", g.seed_floor)));
        }

        let w = &self.multi_objective;
        let weights = [w.balanced, w.max_run_rate, w.critical];
        if weights.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(("multi_objective", "权重不能为负数".to_string()));
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(("multi_objective", "权重之和必须大于 0".to_string()));
        }

        if !self.criticality_weights.all_positive() {
            return Err(("criticality_weights", "权重必须为正数".to_string()));
        }
        if !self.cost_per_hour.all_positive() {
            return Err(("cost_per_hour", "成本必须为正数".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_step() {
        let mut config = EngineConfig::default();
        config.greedy.step = 0.0;
        let (field, _) = config.validate().unwrap_err();
        assert_eq!(field, "greedy.step");
    }

    #[test]
    fn test_validate_rejects_all_zero_blend() {
        let mut config = EngineConfig::default();
        config.multi_objective = MultiObjectiveWeights {
            balanced: 0.0,
            max_run_rate: 0.0,
            critical: 0.0,
        };
        let (field, _) = config.validate().unwrap_err();
        assert_eq!(field, "multi_objective");
    }
}
