// ==========================================
// 教学工作量管理台 - 引擎层
// ==========================================
// 职责: 实现业务规则引擎,不拼 SQL
// 红线: 引擎无状态,纯函数,不做 I/O
// ==========================================

pub mod diff;
pub mod grouping;

// 重导出核心引擎
pub use diff::DiffEngine;
pub use grouping::GroupingEngine;
