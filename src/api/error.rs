// ==========================================
// 教学工作量管理台 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换Repository错误为用户友好的错误消息
// 红线: 所有错误必须带显式原因上抛,不做静默恢复,不做重试
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    /// 提交内容不合法（空提交 / 零受众 / 非正学时等）,在任何仓储调用之前检出
    #[error("数据验证失败: {reason}")]
    Validation {
        reason: String,
        violations: Vec<ValidationViolation>,
    },

    /// 差分后全部为空: 每个提议受众都已有同类型记录。与验证失败区分,不是静默成功
    #[error("无新增分配: {0}")]
    NoNewAssignments(String),

    /// 持久层拒绝重复的 (学科, 课时类型, 受众) 组合
    #[error("唯一性冲突: {0}")]
    Conflict(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    /// 删除确认缺失（调用方未给出确认信号）
    #[error("操作未确认: {0}")]
    NotConfirmed(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    /// 持久层失败（连接 / 锁 / SQL）,不重试
    #[error("持久层错误: {0}")]
    Transport(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 无明细的验证错误
    pub fn validation(reason: impl Into<String>) -> Self {
        ApiError::Validation {
            reason: reason.into(),
            violations: Vec::new(),
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// 目的: 将Repository层的技术错误归入 API 层错误口径
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::UniqueConstraintViolation(msg) => ApiError::Conflict(msg),

            RepositoryError::DatabaseConnectionError(msg) => ApiError::Transport(msg),
            RepositoryError::LockError(msg) => {
                ApiError::Transport(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseTransactionError(msg) => ApiError::Transport(msg),
            RepositoryError::DatabaseQueryError(msg) => ApiError::Transport(msg),
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::Transport(format!("外键约束违反: {}", msg))
            }

            RepositoryError::ValidationError(msg) => ApiError::validation(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::validation(format!("字段{}错误: {}", field, message))
            }

            RepositoryError::InternalError(msg) => ApiError::Internal(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 校验违规详情
// ==========================================

/// 校验违规详情（按提交行给出定位与原因）
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ValidationViolation {
    /// 出问题的字段或位置（如 "entries[2].hours"）
    pub field: String,
    /// 违规原因
    pub reason: String,
}
