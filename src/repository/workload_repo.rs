// ==========================================
// 教学工作量管理台 - 工作量 Repository Trait
// ==========================================
// 职责: 定义工作量记录的数据访问接口（不包含业务逻辑）
// 红线: Repository 不含业务规则,只做数据 CRUD
// 红线: create_batch / rename_group / delete_group 必须整体原子
// ==========================================

use crate::domain::workload::{
    GroupRename, NewWorkloadItem, PagedWorkloadItems, WorkloadBatchSpec, WorkloadFilter,
    WorkloadItem, WorkloadItemPatch,
};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// WorkloadRepository Trait
// ==========================================
// 用途: 工作量记录数据访问
// 实现者: SqliteWorkloadRepository（使用 rusqlite）
#[async_trait]
pub trait WorkloadRepository: Send + Sync {
    // ===== 查询 =====

    /// 分页查询工作量记录
    ///
    /// # 参数
    /// - filter: 过滤 + 分页条件（按创建时间正序返回）
    ///
    /// # 返回
    /// - Ok(PagedWorkloadItems): 当前页记录 + 过滤后总条数
    async fn list_items(&self, filter: &WorkloadFilter) -> RepositoryResult<PagedWorkloadItems>;

    /// 按学科查询组内全部记录（不分页,保持创建顺序）
    async fn list_items_by_subject(&self, subject_id: i64) -> RepositoryResult<Vec<WorkloadItem>>;

    /// 按ID查询单条记录
    ///
    /// # 返回
    /// - Ok(WorkloadItem): 记录存在
    /// - Err(NotFound): 记录不存在
    async fn get_item(&self, id: &str) -> RepositoryResult<WorkloadItem>;

    // ===== 写入 =====

    /// 创建单条记录
    ///
    /// # 返回
    /// - Ok(WorkloadItem): 含持久层分配的 id 与审计时间
    /// - Err(UniqueConstraintViolation): (学科,类型,受众) 已存在
    async fn create_item(&self, item: NewWorkloadItem) -> RepositoryResult<WorkloadItem>;

    /// 批量创建（整体原子）
    ///
    /// # 参数
    /// - spec: 批量提交,每个 (课时类型, 受众ID) 展开为一条记录
    ///
    /// # 返回
    /// - Ok(Vec<WorkloadItem>): 全部创建成功
    /// - Err: 任一条失败则整体回滚,不产生部分写入
    async fn create_batch(&self, spec: &WorkloadBatchSpec) -> RepositoryResult<Vec<WorkloadItem>>;

    /// 更新单条记录
    ///
    /// # 参数
    /// - id: 记录ID
    /// - patch: 增量修改,None 字段不变
    ///
    /// # 返回
    /// - Ok(WorkloadItem): 更新后的记录
    /// - Err(NotFound): 记录不存在
    async fn update_item(&self, id: &str, patch: &WorkloadItemPatch)
        -> RepositoryResult<WorkloadItem>;

    /// 组级改名（整体原子）
    ///
    /// 对旧学科ID下的全部记录统一应用改名,单条 UPDATE 完成。
    ///
    /// # 返回
    /// - Ok(usize): 受影响的记录数（0 = 组不存在）
    async fn rename_group(&self, rename: &GroupRename) -> RepositoryResult<usize>;

    // ===== 删除 =====

    /// 删除单条记录
    ///
    /// # 返回
    /// - Err(NotFound): 记录不存在
    async fn delete_item(&self, id: &str) -> RepositoryResult<()>;

    /// 删除整组（整体原子）
    ///
    /// # 返回
    /// - Ok(usize): 删除的记录数（0 = 组不存在）
    async fn delete_group(&self, subject_id: i64) -> RepositoryResult<usize>;
}
