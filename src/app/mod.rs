// ==========================================
// 教学工作量管理台 - 应用层
// ==========================================
// 职责: 组装数据库连接、仓储、引擎与API实例
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState};
