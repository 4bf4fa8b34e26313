// ==========================================
// 教学工作量管理台 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供上层界面/绑定层调用
// ==========================================

pub mod error;
pub mod reference_api;
pub mod validator;
pub mod workload_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult, ValidationViolation};
pub use reference_api::ReferenceApi;
pub use validator::BatchSpecValidator;
pub use workload_api::WorkloadApi;
