// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 提供API层集成测试的通用辅助函数
// ==========================================

#[path = "../test_helpers.rs"]
mod test_helpers;

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tempfile::NamedTempFile;

use teaching_load_console::api::{BatchSpecValidator, ReferenceApi, WorkloadApi};
use teaching_load_console::config::ConfigManager;
use teaching_load_console::domain::{NewWorkloadItem, WorkloadItem};
use teaching_load_console::engine::{DiffEngine, GroupingEngine};
use teaching_load_console::repository::{
    SqliteReferenceRepository, SqliteWorkloadRepository, WorkloadRepository,
};

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
///
/// 包含所有API实例和必要的依赖
pub struct ApiTestEnv {
    pub db_path: String,
    pub workload_api: Arc<WorkloadApi>,
    pub reference_api: Arc<ReferenceApi>,
    pub config_manager: Arc<ConfigManager>,

    // Repository层（用于测试数据准备）
    pub workload_repo: Arc<SqliteWorkloadRepository>,

    // 共享连接（用于直接断言底层数据）
    pub conn: Arc<Mutex<Connection>>,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// 创建新的API测试环境
    ///
    /// # 说明
    /// - 使用临时数据库文件
    /// - 初始化所有Repository、Engine和API
    /// - 预置一套参照数据（学科/学生流/班组/教学计划）
    pub fn new() -> Result<Self, String> {
        // 创建临时数据库文件并初始化schema
        let (temp_file, db_path) = test_helpers::create_test_db()
            .map_err(|e| format!("创建测试数据库失败: {}", e))?;

        // 初始化数据库连接
        let conn = Connection::open(&db_path).map_err(|e| format!("无法打开数据库: {}", e))?;
        test_helpers::insert_reference_data(&conn)
            .map_err(|e| format!("写入参照数据失败: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================

        let workload_repo = Arc::new(SqliteWorkloadRepository::from_connection(conn.clone()));
        let reference_repo = Arc::new(SqliteReferenceRepository::from_connection(conn.clone()));

        // ==========================================
        // 初始化Engine层
        // ==========================================

        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        let grouping_engine = Arc::new(GroupingEngine::new());
        let diff_engine = Arc::new(DiffEngine::new());

        // ==========================================
        // 初始化API层
        // ==========================================

        // 创建validator
        let validator = Arc::new(BatchSpecValidator::new());

        let workload_api = Arc::new(WorkloadApi::new(
            workload_repo.clone(),
            reference_repo.clone(),
            grouping_engine,
            diff_engine,
            validator,
            config_manager.clone(),
        ));

        let reference_api = Arc::new(ReferenceApi::new(reference_repo));

        Ok(Self {
            db_path,
            workload_api,
            reference_api,
            config_manager,
            workload_repo,
            conn,
            _temp_file: temp_file,
        })
    }

    /// 直接通过仓储写入一条记录（绕过API校验, 用于准备已有状态）
    pub async fn seed_item(&self, item: NewWorkloadItem) -> WorkloadItem {
        self.workload_repo
            .create_item(item)
            .await
            .expect("写入测试工作量记录失败")
    }

    /// 统计 workload_item 表当前行数
    pub fn count_items(&self) -> i64 {
        let conn = self.conn.lock().expect("锁获取失败");
        conn.query_row("SELECT COUNT(*) FROM workload_item", [], |row| row.get(0))
            .expect("统计工作量记录失败")
    }
}
