// ==========================================
// 教学工作量管理台 - 核心库
// ==========================================
// 系统定位: 教务管理台的工作量子系统
// 职责: 分组汇总 / 新增差分 / 批量维护
// 技术栈: Rust + SQLite
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{LoadType, TargetKind, TargetRef};

// 领域实体
pub use domain::{
    ClassGroup, EduPlan, GroupRename, NewWorkloadItem, PagedWorkloadItems, Stream, Subject,
    SubjectWorkloadGroup, TargetInfo, WorkloadBatchEntry, WorkloadBatchSpec, WorkloadFilter,
    WorkloadItem, WorkloadItemPatch,
};

// 引擎
pub use engine::{DiffEngine, GroupingEngine};

// API
pub use api::{ReferenceApi, WorkloadApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "教学工作量管理台";

// 数据库版本
pub const DB_VERSION: &str = "v0.1";
