// ==========================================
// 教学工作量管理台 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod error;
pub mod reference_repo;
pub mod workload_repo;
pub mod workload_repo_impl;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use reference_repo::{ReferenceRepository, SqliteReferenceRepository};
pub use workload_repo::WorkloadRepository;
pub use workload_repo_impl::SqliteWorkloadRepository;
