// ==========================================
// 教学工作量管理台 - 配置管理器
// ==========================================
// 职责: 管理台偏好的读取与覆写
// 存储: config_kv 表 (key-value, scope_id='global')
// ==========================================

use crate::db::open_sqlite_connection;
use rusqlite::{params, Connection};
use std::error::Error;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 参数
    /// - key: 配置键
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 读取 global scope 的配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.get_config_value(key)
    }

    /// 从 config_kv 表读取配置值，带默认值
    ///
    /// # 参数
    /// - key: 配置键
    /// - default: 默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self.get_config_value(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// 覆写配置值（scope_id='global'，UPSERT 语义）
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;

        Ok(())
    }

    // ===== 管理台偏好 =====

    /// 获取列表默认每页条数
    pub fn get_default_page_size(&self) -> Result<u32, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::DEFAULT_PAGE_SIZE, "20")?;
        Ok(value.parse::<u32>().unwrap_or(20))
    }

    /// 获取界面语言（"zh-CN" / "en"）
    pub fn get_locale(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(config_keys::LOCALE, "zh-CN")
    }

    /// 删除学科组是否要求确认
    ///
    /// # 说明
    /// 默认开启。关闭后调用方仍需显式传入确认标记,
    /// 该配置只决定 API 层是否拒绝未确认的删除。
    pub fn get_delete_requires_confirmation(&self) -> Result<bool, Box<dyn Error>> {
        let value =
            self.get_config_or_default(config_keys::DELETE_REQUIRES_CONFIRMATION, "true")?;
        Ok(value.trim().eq_ignore_ascii_case("true"))
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 列表
    pub const DEFAULT_PAGE_SIZE: &str = "workload/default_page_size";

    // 界面
    pub const LOCALE: &str = "ui/locale";

    // 删除保护
    pub const DELETE_REQUIRES_CONFIRMATION: &str = "workload/delete_requires_confirmation";
}
