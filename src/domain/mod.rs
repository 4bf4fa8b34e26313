// ==========================================
// 教学工作量管理台 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、展开规则
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod reference;
pub mod types;
pub mod workload;

// 重导出核心类型
pub use reference::{ClassGroup, EduPlan, Stream, Subject};
pub use types::{LoadType, TargetKind, TargetRef};
pub use workload::{
    GroupRename, NewWorkloadItem, PagedWorkloadItems, SubjectWorkloadGroup, TargetInfo,
    WorkloadBatchEntry, WorkloadBatchSpec, WorkloadFilter, WorkloadItem, WorkloadItemPatch,
};
