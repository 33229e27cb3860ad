// ==========================================
// 产线平衡优化引擎 - API层错误类型
// ==========================================
// 职责: 汇总引擎/仓储错误，转换为用户友好的错误消息
// 说明: 所有错误均可在边界处捕获并展示，不存在致命错误
// ==========================================

use crate::engine::error::EngineError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("数据验证失败: {0}")]
    ValidationError(String),

    /// 人工调整超出总人数（携带最大允许值，供前端截断/提示）
    #[error("人员超出总数: 工序{process_id}最多可分配 {max_allowed} 人 (请求 {requested} 人)")]
    BudgetExceeded {
        process_id: String,
        requested: f64,
        max_allowed: f64,
    },

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("当前没有生效的人员分配")]
    NoActiveAllocation,

    /// 方案未生成或已因人工调整失效
    #[error("优化方案不可用: {0}")]
    ModelNotAvailable(String),

    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 超限错误携带的最大允许值
    pub fn max_allowed(&self) -> Option<f64> {
        match self {
            ApiError::BudgetExceeded { max_allowed, .. } => Some(*max_allowed),
            _ => None,
        }
    }
}

// ==========================================
// 从 EngineError 转换
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            EngineError::BudgetExceeded {
                process_id,
                requested,
                max_allowed,
            } => ApiError::BudgetExceeded {
                process_id,
                requested,
                max_allowed,
            },
            EngineError::InvalidPersonnel { process_id, value } => ApiError::ValidationError(
                format!("工序{}人数必须为非负数, 实际={}", process_id, value),
            ),
            EngineError::UnknownProcess(id) => ApiError::NotFound(format!("工序(id={})不存在", id)),
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// 目的: 将Repository层的技术错误转换为用户友好的业务错误
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::BusinessRuleViolation(msg) => ApiError::BusinessRuleViolation(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("字段{}错误: {}", field, message))
            }
            RepositoryError::SerializationError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_exceeded_keeps_max_allowed() {
        let api_err: ApiError = EngineError::BudgetExceeded {
            process_id: "B".to_string(),
            requested: 1.2,
            max_allowed: 1.0,
        }
        .into();
        assert_eq!(api_err.max_allowed(), Some(1.0));
        assert!(api_err.to_string().contains("1"));
    }

    #[test]
    fn test_repository_not_found_maps_to_not_found() {
        let api_err: ApiError = RepositoryError::NotFound {
            entity: "Configuration".to_string(),
            id: "c9".to_string(),
        }
        .into();
        assert!(matches!(api_err, ApiError::NotFound(msg) if msg.contains("c9")));
    }
}
