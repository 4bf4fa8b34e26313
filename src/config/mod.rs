// ==========================================
// 教学工作量管理台 - 配置层
// ==========================================
// 职责: 管理台偏好的读取与覆写
// 存储: config_kv 表
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
