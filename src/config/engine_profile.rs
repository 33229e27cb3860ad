// ==========================================
// 产线平衡优化引擎 - 引擎参数覆写
// ==========================================
// 职责: 可持久化的部分参数覆写，叠加到默认 EngineConfig 上
// 存储: config_kv 表（JSON）
// ==========================================

use crate::config::engine_config::EngineConfig;
use crate::domain::types::BottleneckTieBreak;
use serde::{Deserialize, Serialize};

/// 引擎参数覆写（持久化对象）
///
/// 存储位置：config_kv（scope_id='global'，key='line_balance/engine_profile'）
/// 未设置的字段沿用默认值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EngineProfile {
    #[serde(default)]
    pub greedy_step: Option<f64>,

    #[serde(default)]
    pub max_iterations: Option<u32>,

    #[serde(default)]
    pub convergence_epsilon: Option<f64>,

    #[serde(default)]
    pub seed_floor: Option<f64>,

    /// 多目标融合：均衡方案权重
    #[serde(default)]
    pub balanced_weight: Option<f64>,

    /// 多目标融合：最大产出方案权重
    #[serde(default)]
    pub max_run_rate_weight: Option<f64>,

    /// 多目标融合：关键工序方案权重
    #[serde(default)]
    pub critical_weight: Option<f64>,

    #[serde(default)]
    pub quality_criticality: Option<f64>,

    #[serde(default)]
    pub assembly_criticality: Option<f64>,

    #[serde(default)]
    pub general_criticality: Option<f64>,

    #[serde(default)]
    pub quality_cost_per_hour: Option<f64>,

    #[serde(default)]
    pub assembly_cost_per_hour: Option<f64>,

    #[serde(default)]
    pub general_cost_per_hour: Option<f64>,

    #[serde(default)]
    pub tie_break: Option<BottleneckTieBreak>,
}

impl EngineProfile {
    /// 将覆写叠加到基础配置上
    pub fn apply_to(&self, base: EngineConfig) -> EngineConfig {
        let mut config = base;

        if let Some(v) = self.greedy_step {
            config.greedy.step = v;
        }
        if let Some(v) = self.max_iterations {
            config.greedy.max_iterations = v;
        }
        if let Some(v) = self.convergence_epsilon {
            config.greedy.epsilon = v;
        }
        if let Some(v) = self.seed_floor {
            config.greedy.seed_floor = v;
        }

        if let Some(v) = self.balanced_weight {
            config.multi_objective.balanced = v;
        }
        if let Some(v) = self.max_run_rate_weight {
            config.multi_objective.max_run_rate = v;
        }
        if let Some(v) = self.critical_weight {
            config.multi_objective.critical = v;
        }

        if let Some(v) = self.quality_criticality {
            config.criticality_weights.quality = v;
        }
        if let Some(v) = self.assembly_criticality {
            config.criticality_weights.assembly = v;
        }
        if let Some(v) = self.general_criticality {
            config.criticality_weights.general = v;
        }

        if let Some(v) = self.quality_cost_per_hour {
            config.cost_per_hour.quality = v;
        }
        if let Some(v) = self.assembly_cost_per_hour {
            config.cost_per_hour.assembly = v;
        }
        if let Some(v) = self.general_cost_per_hour {
            config.cost_per_hour.general = v;
        }

        if let Some(v) = self.tie_break {
            config.tie_break = v;
        }

        config
    }
}
