// ==========================================
// 教学工作量管理台 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{BatchSpecValidator, ReferenceApi, WorkloadApi};
use crate::config::ConfigManager;
use crate::db;
use crate::engine::{DiffEngine, GroupingEngine};
use crate::repository::{SqliteReferenceRepository, SqliteWorkloadRepository};

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 工作量API
    pub workload_api: Arc<WorkloadApi>,

    /// 基础数据API
    pub reference_api: Arc<ReferenceApi>,

    /// 配置管理器（页大小、界面语言、删除确认等）
    pub config_manager: Arc<ConfigManager>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开数据库连接并初始化表结构
    /// 2. 初始化所有Repository
    /// 3. 初始化Engine和API实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        // 创建数据库连接（共享连接）
        let conn = db::open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        db::init_schema(&conn).map_err(|e| format!("无法初始化数据库表结构: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================

        let workload_repo = Arc::new(SqliteWorkloadRepository::from_connection(conn.clone()));
        let reference_repo = Arc::new(SqliteReferenceRepository::from_connection(conn.clone()));

        // ==========================================
        // 初始化Engine层
        // ==========================================

        // 配置管理器
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        // 学科汇总引擎
        let grouping_engine = Arc::new(GroupingEngine::new());

        // 新增目标差分引擎
        let diff_engine = Arc::new(DiffEngine::new());

        // ==========================================
        // 初始化API层
        // ==========================================

        // 创建validator
        let validator = Arc::new(BatchSpecValidator::new());

        // 工作量API
        let workload_api = Arc::new(WorkloadApi::new(
            workload_repo.clone(),
            reference_repo.clone(),
            grouping_engine,
            diff_engine,
            validator,
            config_manager.clone(),
        ));

        // 基础数据API
        let reference_api = Arc::new(ReferenceApi::new(reference_repo));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            workload_api,
            reference_api,
            config_manager,
        })
    }

    /// 获取数据库路径
    pub fn get_db_path(&self) -> &str {
        &self.db_path
    }
}

// ==========================================
// 默认数据库路径辅助函数
// ==========================================

/// 获取默认数据库路径
///
/// # 返回
/// - 开发环境: 用户数据目录/teaching-load-console-dev/teaching_load.db
/// - 生产环境: 用户数据目录/teaching-load-console/teaching_load.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var("TEACHING_LOAD_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    // 先给一个默认回退值，后续如果能拿到 data_dir 再覆盖。
    let mut path = PathBuf::from("./teaching_load.db");

    // 尝试获取用户数据目录
    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录，避免污染生产数据
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("teaching-load-console-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("teaching-load-console");
        }

        // 确保目录存在
        std::fs::create_dir_all(&path).ok();
        path = path.join("teaching_load.db");
    }

    path.to_string_lossy().to_string()
}
