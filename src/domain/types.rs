// ==========================================
// 产线平衡优化引擎 - 领域类型定义
// ==========================================
// 职责: 优化方案类型、工序分类、瓶颈并列规则
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 优化方案类型 (Optimization Type)
// ==========================================
// 序列化格式: snake_case (与前端/历史记录一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationType {
    Balanced,       // 按节拍比例均衡
    MaxRunRate,     // 最大化产出节拍
    Critical,       // 关键工序加权
    MinCost,        // 最低人工成本
    MultiObjective, // 多目标加权融合
}

impl OptimizationType {
    /// 全部方案类型（生成顺序即展示顺序）
    pub const ALL: [OptimizationType; 5] = [
        OptimizationType::Balanced,
        OptimizationType::MaxRunRate,
        OptimizationType::Critical,
        OptimizationType::MinCost,
        OptimizationType::MultiObjective,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizationType::Balanced => "balanced",
            OptimizationType::MaxRunRate => "max_run_rate",
            OptimizationType::Critical => "critical",
            OptimizationType::MinCost => "min_cost",
            OptimizationType::MultiObjective => "multi_objective",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            OptimizationType::Balanced => "均衡分配",
            OptimizationType::MaxRunRate => "最大产出",
            OptimizationType::Critical => "关键工序优先",
            OptimizationType::MinCost => "最低成本",
            OptimizationType::MultiObjective => "多目标融合",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OptimizationType::Balanced => "按工序节拍时间比例分配人员",
            OptimizationType::MaxRunRate => "逐步向当前瓶颈工序追加人员，以提升整线产出",
            OptimizationType::Critical => "质量类工序权重 3，装配类工序权重 2，其余权重 1",
            OptimizationType::MinCost => "在保底人员之上，优先向单位成本较低的工序分配",
            OptimizationType::MultiObjective => {
                "均衡 30% + 最大产出 50% + 关键工序 20%，归一化至总人数"
            }
        }
    }
}

impl Default for OptimizationType {
    fn default() -> Self {
        OptimizationType::Balanced
    }
}

impl fmt::Display for OptimizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OptimizationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "balanced" => Ok(OptimizationType::Balanced),
            "max_run_rate" | "max-run-rate" | "maxrunrate" => Ok(OptimizationType::MaxRunRate),
            "critical" => Ok(OptimizationType::Critical),
            "min_cost" | "min-cost" | "mincost" => Ok(OptimizationType::MinCost),
            "multi_objective" | "multi-objective" | "multiobjective" => {
                Ok(OptimizationType::MultiObjective)
            }
            other => Err(format!("未知优化方案类型: {}", other)),
        }
    }
}

// ==========================================
// 工序分类 (Process Category)
// ==========================================
// 用途: 关键度权重与人工成本的分类依据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessCategory {
    Quality,  // 质量检验
    Assembly, // 装配
    General,  // 其他
}

impl fmt::Display for ProcessCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessCategory::Quality => write!(f, "QUALITY"),
            ProcessCategory::Assembly => write!(f, "ASSEMBLY"),
            ProcessCategory::General => write!(f, "GENERAL"),
        }
    }
}

// ==========================================
// 瓶颈并列规则 (Bottleneck Tie Break)
// ==========================================
// 多个工序 UPH 相同时，决定哪一个被标记为瓶颈
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BottleneckTieBreak {
    FirstOccurrence, // 按输入顺序取第一个
    LastOccurrence,  // 按输入顺序取最后一个
}

impl Default for BottleneckTieBreak {
    fn default() -> Self {
        BottleneckTieBreak::FirstOccurrence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimization_type_parse_aliases() {
        assert_eq!("maxRunRate".parse::<OptimizationType>(), Ok(OptimizationType::MaxRunRate));
        assert_eq!("min-cost".parse::<OptimizationType>(), Ok(OptimizationType::MinCost));
        assert_eq!(
            " MultiObjective ".parse::<OptimizationType>(),
            Ok(OptimizationType::MultiObjective)
        );
        assert!("fastest".parse::<OptimizationType>().is_err());
    }

    #[test]
    fn test_optimization_type_serde_snake_case() {
        let json = serde_json::to_string(&OptimizationType::MaxRunRate).unwrap();
        assert_eq!(json, "\"max_run_rate\"");
        let back: OptimizationType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OptimizationType::MaxRunRate);
    }
}
