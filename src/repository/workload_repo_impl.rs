// ==========================================
// 教学工作量管理台 - 工作量 Repository 实现
// ==========================================
// 职责: workload_item 表的数据访问（rusqlite）
// 红线: 批量写入必须在事务中完成,失败整体回滚
// 红线: 唯一约束 (subject_id, load_type, target_kind, target_id) 由 DB 兜底
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::types::{LoadType, TargetKind, TargetRef};
use crate::domain::workload::{
    GroupRename, NewWorkloadItem, PagedWorkloadItems, WorkloadBatchSpec, WorkloadFilter,
    WorkloadItem, WorkloadItemPatch,
};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::workload_repo::WorkloadRepository;
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// ==========================================
// SqliteWorkloadRepository
// ==========================================
pub struct SqliteWorkloadRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteWorkloadRepository {
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

    /// 辅助方法：将数据库行映射为 WorkloadItem
    ///
    /// 列顺序: id, subject_id, edu_plan_id, name, load_type, hours,
    ///         target_kind, target_id, created_at, updated_at
    fn map_row_to_item(row: &rusqlite::Row) -> SqliteResult<WorkloadItem> {
        let load_type_str: String = row.get(4)?;
        let load_type = LoadType::from_str(&load_type_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                rusqlite::types::Type::Text,
                format!("未知课时类型: {}", load_type_str).into(),
            )
        })?;

        let target_kind_str: String = row.get(6)?;
        let target_kind = TargetKind::from_str(&target_kind_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                6,
                rusqlite::types::Type::Text,
                format!("未知目标受众类别: {}", target_kind_str).into(),
            )
        })?;

        Ok(WorkloadItem {
            id: row.get(0)?,
            subject_id: row.get(1)?,
            edu_plan_id: row.get(2)?,
            name: row.get(3)?,
            load_type,
            hours: row.get(5)?,
            target: TargetRef::from_parts(target_kind, row.get(7)?),
            created_at: row
                .get::<_, String>(8)?
                .parse::<chrono::DateTime<chrono::Utc>>()
                .unwrap_or_else(|_| chrono::Utc::now()),
            updated_at: row
                .get::<_, String>(9)?
                .parse::<chrono::DateTime<chrono::Utc>>()
                .unwrap_or_else(|_| chrono::Utc::now()),
        })
    }

    /// 按ID查询单条记录（同步,供持锁调用方复用）
    fn get_item_sync(conn: &Connection, id: &str) -> RepositoryResult<WorkloadItem> {
        let result = conn.query_row(
            r#"SELECT id, subject_id, edu_plan_id, name, load_type, hours,
                      target_kind, target_id, created_at, updated_at
               FROM workload_item WHERE id = ?1"#,
            params![id],
            Self::map_row_to_item,
        );

        match result {
            Ok(item) => Ok(item),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(RepositoryError::NotFound {
                entity: "WorkloadItem".to_string(),
                id: id.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl WorkloadRepository for SqliteWorkloadRepository {
    async fn list_items(&self, filter: &WorkloadFilter) -> RepositoryResult<PagedWorkloadItems> {
        let conn = self.get_conn()?;

        // 过滤条件与计数查询共用,保证 total 口径一致
        let (where_sql, where_params): (&str, Vec<Value>) = match filter.edu_plan_id {
            Some(plan_id) => (" WHERE edu_plan_id = ?", vec![Value::from(plan_id)]),
            None => ("", vec![]),
        };

        let total: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM workload_item{}", where_sql),
            params_from_iter(where_params.iter()),
            |row| row.get(0),
        )?;

        let mut list_params = where_params;
        list_params.push(Value::from(filter.page_size as i64));
        list_params.push(Value::from(filter.offset() as i64));

        let sql = format!(
            r#"SELECT id, subject_id, edu_plan_id, name, load_type, hours,
                      target_kind, target_id, created_at, updated_at
               FROM workload_item{}
               ORDER BY created_at ASC, rowid ASC
               LIMIT ? OFFSET ?"#,
            where_sql
        );
        let mut stmt = conn.prepare(&sql)?;
        let items = stmt
            .query_map(params_from_iter(list_params.iter()), Self::map_row_to_item)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(PagedWorkloadItems { items, total })
    }

    async fn list_items_by_subject(&self, subject_id: i64) -> RepositoryResult<Vec<WorkloadItem>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"SELECT id, subject_id, edu_plan_id, name, load_type, hours,
                      target_kind, target_id, created_at, updated_at
               FROM workload_item
               WHERE subject_id = ?1
               ORDER BY created_at ASC, rowid ASC"#,
        )?;
        let items = stmt
            .query_map(params![subject_id], Self::map_row_to_item)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(items)
    }

    async fn get_item(&self, id: &str) -> RepositoryResult<WorkloadItem> {
        let conn = self.get_conn()?;
        Self::get_item_sync(&conn, id)
    }

    async fn create_item(&self, item: NewWorkloadItem) -> RepositoryResult<WorkloadItem> {
        let conn = self.get_conn()?;
        let now = Utc::now();
        let id = Uuid::new_v4().to_string();

        conn.execute(
            r#"INSERT INTO workload_item (
                   id, subject_id, edu_plan_id, name, load_type, hours,
                   target_kind, target_id, created_at, updated_at
               ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"#,
            params![
                id,
                item.subject_id,
                item.edu_plan_id,
                item.name,
                item.load_type.to_db_str(),
                item.hours,
                item.target.kind().to_db_str(),
                item.target.id(),
                now,
                now,
            ],
        )?;

        Ok(WorkloadItem {
            id,
            subject_id: item.subject_id,
            edu_plan_id: item.edu_plan_id,
            name: item.name,
            load_type: item.load_type,
            hours: item.hours,
            target: item.target,
            created_at: now,
            updated_at: now,
        })
    }

    async fn create_batch(&self, spec: &WorkloadBatchSpec) -> RepositoryResult<Vec<WorkloadItem>> {
        let new_items = spec.expand();
        if new_items.is_empty() {
            return Ok(vec![]);
        }

        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        let now = Utc::now();
        let mut created = Vec::with_capacity(new_items.len());

        {
            let mut stmt = tx.prepare(
                r#"INSERT INTO workload_item (
                       id, subject_id, edu_plan_id, name, load_type, hours,
                       target_kind, target_id, created_at, updated_at
                   ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"#,
            )?;

            for item in new_items {
                let id = Uuid::new_v4().to_string();
                stmt.execute(params![
                    id,
                    item.subject_id,
                    item.edu_plan_id,
                    item.name,
                    item.load_type.to_db_str(),
                    item.hours,
                    item.target.kind().to_db_str(),
                    item.target.id(),
                    now,
                    now,
                ])?;
                created.push(WorkloadItem {
                    id,
                    subject_id: item.subject_id,
                    edu_plan_id: item.edu_plan_id,
                    name: item.name,
                    load_type: item.load_type,
                    hours: item.hours,
                    target: item.target,
                    created_at: now,
                    updated_at: now,
                });
            }
        }

        tx.commit()?;
        Ok(created)
    }

    async fn update_item(
        &self,
        id: &str,
        patch: &WorkloadItemPatch,
    ) -> RepositoryResult<WorkloadItem> {
        let conn = self.get_conn()?;

        // 先取现值,在内存中合并,再整行覆写
        let existing = Self::get_item_sync(&conn, id)?;
        let now = Utc::now();

        let merged = WorkloadItem {
            id: existing.id.clone(),
            subject_id: patch.subject_id.unwrap_or(existing.subject_id),
            edu_plan_id: patch.edu_plan_id.or(existing.edu_plan_id),
            name: patch.name.clone().or(existing.name),
            load_type: patch.load_type.unwrap_or(existing.load_type),
            hours: patch.hours.unwrap_or(existing.hours),
            target: patch.target.unwrap_or(existing.target),
            created_at: existing.created_at,
            updated_at: now,
        };

        conn.execute(
            r#"UPDATE workload_item
               SET subject_id = ?1, edu_plan_id = ?2, name = ?3, load_type = ?4,
                   hours = ?5, target_kind = ?6, target_id = ?7, updated_at = ?8
               WHERE id = ?9"#,
            params![
                merged.subject_id,
                merged.edu_plan_id,
                merged.name,
                merged.load_type.to_db_str(),
                merged.hours,
                merged.target.kind().to_db_str(),
                merged.target.id(),
                now,
                id,
            ],
        )?;

        Ok(merged)
    }

    async fn rename_group(&self, rename: &GroupRename) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let now = Utc::now();

        // 动态拼 SET 子句,未提供的字段不动
        let mut sets: Vec<&str> = Vec::new();
        let mut sql_params: Vec<Value> = Vec::new();

        if let Some(new_subject_id) = rename.new_subject_id {
            sets.push("subject_id = ?");
            sql_params.push(Value::from(new_subject_id));
        }
        if let Some(ref new_name) = rename.new_name {
            sets.push("name = ?");
            sql_params.push(Value::from(new_name.clone()));
        }
        if let Some(new_edu_plan_id) = rename.new_edu_plan_id {
            sets.push("edu_plan_id = ?");
            sql_params.push(Value::from(new_edu_plan_id));
        }
        sets.push("updated_at = ?");
        sql_params.push(Value::from(now.to_rfc3339()));

        let sql = format!(
            "UPDATE workload_item SET {} WHERE subject_id = ?",
            sets.join(", ")
        );
        sql_params.push(Value::from(rename.subject_id));

        // 单条 UPDATE,约束失败时整条语句回滚
        let affected = conn.execute(&sql, params_from_iter(sql_params.iter()))?;
        Ok(affected)
    }

    async fn delete_item(&self, id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM workload_item WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "WorkloadItem".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn delete_group(&self, subject_id: i64) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM workload_item WHERE subject_id = ?1",
            params![subject_id],
        )?;
        Ok(affected)
    }
}
