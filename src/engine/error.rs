// ==========================================
// 产线平衡优化引擎 - 引擎层错误类型
// ==========================================
// 分类:
// - 输入无效 (InvalidInput): 不返回任何部分结果
// - 人工调整校验失败 (BudgetExceeded / InvalidPersonnel / UnknownProcess)
// 说明: 零人员/零手工时间不是错误，产出直接为 0
// ==========================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    /// 人工调整超出总人数，max_allowed 供调用方截断/提示
    #[error("人员超出总数: process_id={process_id}, 请求={requested}, 最大允许={max_allowed}")]
    BudgetExceeded {
        process_id: String,
        requested: f64,
        max_allowed: f64,
    },

    #[error("人员数值无效: process_id={process_id}, value={value}")]
    InvalidPersonnel { process_id: String, value: f64 },

    #[error("工序不存在: {0}")]
    UnknownProcess(String),
}

impl EngineError {
    /// 是否属于人工调整校验类错误
    pub fn is_validation(&self) -> bool {
        !matches!(self, EngineError::InvalidInput(_))
    }

    /// 超限错误携带的最大允许值
    pub fn max_allowed(&self) -> Option<f64> {
        match self {
            EngineError::BudgetExceeded { max_allowed, .. } => Some(*max_allowed),
            _ => None,
        }
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
