// ==========================================
// 教学工作量管理台 - 参照数据 Repository
// ==========================================
// 职责: 学科 / 大班流 / 班级 / 教学计划的只读查询
// 红线: 本子系统不维护参照数据,只消费
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::reference::{ClassGroup, EduPlan, Stream, Subject};
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::{Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// ReferenceRepository Trait
// ==========================================
// 用途: 展示名与校验用的只读查找表
// 实现者: SqliteReferenceRepository（使用 rusqlite）
#[async_trait]
pub trait ReferenceRepository: Send + Sync {
    /// 学科列表（按ID正序）
    async fn list_subjects(&self) -> RepositoryResult<Vec<Subject>>;

    /// 大班流列表（按ID正序）
    async fn list_streams(&self) -> RepositoryResult<Vec<Stream>>;

    /// 班级列表（按ID正序）
    async fn list_class_groups(&self) -> RepositoryResult<Vec<ClassGroup>>;

    /// 教学计划列表（按ID正序）
    async fn list_edu_plans(&self) -> RepositoryResult<Vec<EduPlan>>;
}

// ==========================================
// SqliteReferenceRepository
// ==========================================
pub struct SqliteReferenceRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteReferenceRepository {
    /// 创建新的仓储实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

#[async_trait]
impl ReferenceRepository for SqliteReferenceRepository {
    async fn list_subjects(&self) -> RepositoryResult<Vec<Subject>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT id, name, department_id FROM subject ORDER BY id ASC")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Subject {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    department_id: row.get(2)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    async fn list_streams(&self) -> RepositoryResult<Vec<Stream>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT id, name FROM stream ORDER BY id ASC")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Stream {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    async fn list_class_groups(&self) -> RepositoryResult<Vec<ClassGroup>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT id, name FROM class_group ORDER BY id ASC")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ClassGroup {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    async fn list_edu_plans(&self) -> RepositoryResult<Vec<EduPlan>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT id, name FROM edu_plan ORDER BY id ASC")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(EduPlan {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }
}
