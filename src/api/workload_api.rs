// ==========================================
// 教学工作量管理台 - 工作量 API
// ==========================================
// 职责: 批量创建 / 单条维护 / 组级改名与删除 / 分组汇总视图
// 红线: 校验与差分在前,仓储调用一次成型,失败不重试不补偿
// ==========================================

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::BatchSpecValidator;
use crate::config::config_manager::ConfigManager;
use crate::domain::types::TargetRef;
use crate::domain::workload::{
    GroupRename, NewWorkloadItem, PagedWorkloadItems, SubjectWorkloadGroup, WorkloadBatchSpec,
    WorkloadFilter, WorkloadItem, WorkloadItemPatch,
};
use crate::engine::diff::DiffEngine;
use crate::engine::grouping::GroupingEngine;
use crate::i18n;
use crate::repository::reference_repo::ReferenceRepository;
use crate::repository::workload_repo::WorkloadRepository;

// ==========================================
// WorkloadApi - 工作量 API
// ==========================================

/// 工作量API
///
/// 职责：
/// 1. 批量创建（含"追加到已有组"的差分模式）
/// 2. 单条记录的查询 / 创建 / 修改 / 删除
/// 3. 组级改名与组级删除（返回受影响条数）
/// 4. 分组汇总视图（每次读取重算,不缓存）
pub struct WorkloadApi {
    workload_repo: Arc<dyn WorkloadRepository>,
    reference_repo: Arc<dyn ReferenceRepository>,
    grouping_engine: Arc<GroupingEngine>,
    diff_engine: Arc<DiffEngine>,
    validator: Arc<BatchSpecValidator>,
    config: Arc<ConfigManager>,
}

impl WorkloadApi {
    /// 创建新的WorkloadApi实例
    ///
    /// # 参数
    /// - workload_repo: 工作量仓储
    /// - reference_repo: 参照数据仓储
    /// - grouping_engine: 分组汇总引擎
    /// - diff_engine: 新增差分引擎
    /// - validator: 批量提交校验器
    /// - config: 配置管理器
    pub fn new(
        workload_repo: Arc<dyn WorkloadRepository>,
        reference_repo: Arc<dyn ReferenceRepository>,
        grouping_engine: Arc<GroupingEngine>,
        diff_engine: Arc<DiffEngine>,
        validator: Arc<BatchSpecValidator>,
        config: Arc<ConfigManager>,
    ) -> Self {
        Self {
            workload_repo,
            reference_repo,
            grouping_engine,
            diff_engine,
            validator,
            config,
        }
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 分页查询工作量记录
    pub async fn list_items(&self, filter: &WorkloadFilter) -> ApiResult<PagedWorkloadItems> {
        debug!(
            page = filter.page,
            page_size = filter.page_size,
            edu_plan_id = ?filter.edu_plan_id,
            "查询工作量列表"
        );
        Ok(self.workload_repo.list_items(filter).await?)
    }

    /// 按ID查询单条记录
    pub async fn get_item(&self, id: &str) -> ApiResult<WorkloadItem> {
        Ok(self.workload_repo.get_item(id).await?)
    }

    /// 分组汇总视图
    ///
    /// 从持久层取当前页记录,按学科聚合并标注显示名。
    /// 派生状态不缓存: 任何变更后调用方需重新调用本方法。
    pub async fn grouped_view(
        &self,
        filter: &WorkloadFilter,
    ) -> ApiResult<Vec<SubjectWorkloadGroup>> {
        let paged = self.workload_repo.list_items(filter).await?;
        let (subject_names, target_names) = self.load_name_maps().await?;

        let groups = self
            .grouping_engine
            .group(&paged.items, &subject_names, &target_names);
        debug!(
            items = paged.items.len(),
            groups = groups.len(),
            "分组汇总完成"
        );
        Ok(groups)
    }

    /// 查询单个学科组的汇总
    ///
    /// # 返回
    /// - Ok(Some): 该学科存在记录
    /// - Ok(None): 该学科无任何记录
    pub async fn get_group(&self, subject_id: i64) -> ApiResult<Option<SubjectWorkloadGroup>> {
        let items = self.workload_repo.list_items_by_subject(subject_id).await?;
        if items.is_empty() {
            return Ok(None);
        }

        let (subject_names, target_names) = self.load_name_maps().await?;
        let groups = self
            .grouping_engine
            .group(&items, &subject_names, &target_names);
        Ok(groups.into_iter().next())
    }

    // ==========================================
    // 写入接口
    // ==========================================

    /// 批量创建工作量记录
    ///
    /// # 参数
    /// - spec: 批量提交（学科 + 各课时类型的受众分配）
    /// - existing_group: 追加模式下传入该学科的现有分组,用于差分;
    ///   None = 新建模式,不做差分
    ///
    /// # 流程
    /// 1. 剔除未选受众的空行
    /// 2. 校验（至少一行 / 学时为正）
    /// 3. 追加模式: 逐行差分,丢弃已全部存在的行;全空则报"无新增"
    /// 4. 单次仓储批量调用,整体成功或整体失败
    ///
    /// # 返回
    /// - Ok(Vec<WorkloadItem>): 实际创建的记录
    /// - Err(Validation / NoNewAssignments / Conflict / Transport)
    pub async fn create_batch(
        &self,
        spec: &WorkloadBatchSpec,
        existing_group: Option<&SubjectWorkloadGroup>,
    ) -> ApiResult<Vec<WorkloadItem>> {
        let mut pruned = self.validator.prune_empty_entries(spec);
        self.validator.validate_spec(&pruned)?;

        if let Some(group) = existing_group {
            if group.subject_id != pruned.subject_id {
                return Err(ApiError::validation(format!(
                    "追加目标学科不一致: 提交={}, 现有组={}",
                    pruned.subject_id, group.subject_id
                )));
            }

            // 逐行差分: 只保留尚无同类型记录的受众
            for entry in &mut pruned.entries {
                entry.target_ids = self.diff_engine.diff_new_targets(
                    &group.items,
                    entry.load_type,
                    &entry.target_ids,
                );
            }
            pruned.entries.retain(|e| !e.target_ids.is_empty());

            if pruned.entries.is_empty() {
                return Err(ApiError::NoNewAssignments(i18n::t(
                    "workload.no_new_assignments",
                )));
            }
        }

        let created = self.workload_repo.create_batch(&pruned).await?;
        info!(
            subject_id = pruned.subject_id,
            count = created.len(),
            "批量创建工作量记录成功"
        );
        Ok(created)
    }

    /// 创建单条记录
    ///
    /// # 校验
    /// - 学时为正
    /// - 受众类别与课时类型匹配
    pub async fn create_item(&self, item: NewWorkloadItem) -> ApiResult<WorkloadItem> {
        if item.hours <= 0 {
            return Err(ApiError::validation(format!(
                "{} (hours={})",
                i18n::t("workload.invalid_hours"),
                item.hours
            )));
        }
        if !item.target.matches_load_type(item.load_type) {
            return Err(ApiError::validation(format!(
                "课时类型 {} 要求 {} 类受众,实际为 {}",
                item.load_type,
                item.load_type.required_target_kind(),
                item.target.kind()
            )));
        }

        let created = self.workload_repo.create_item(item).await?;
        info!(id = %created.id, subject_id = created.subject_id, "创建工作量记录成功");
        Ok(created)
    }

    /// 修改单条记录
    ///
    /// 直改模式,不做差分。合并结果必须保持学时为正、
    /// 受众类别与课时类型匹配。
    pub async fn update_item(
        &self,
        id: &str,
        patch: &WorkloadItemPatch,
    ) -> ApiResult<WorkloadItem> {
        let existing = self.workload_repo.get_item(id).await?;
        self.validator.validate_patch(&existing, patch)?;

        let updated = self.workload_repo.update_item(id, patch).await?;
        info!(id = %updated.id, "修改工作量记录成功");
        Ok(updated)
    }

    /// 组级改名
    ///
    /// 一次逻辑请求,原子作用于旧学科ID下全部记录。
    ///
    /// # 返回
    /// - Ok(usize): 受影响条数（0 = 该学科无记录）
    pub async fn rename_group(&self, rename: &GroupRename) -> ApiResult<usize> {
        if rename.is_empty() {
            return Err(ApiError::validation("改名请求没有任何变更字段"));
        }

        let affected = self.workload_repo.rename_group(rename).await?;
        info!(
            subject_id = rename.subject_id,
            affected, "组级改名完成"
        );
        Ok(affected)
    }

    /// 删除单条记录
    pub async fn delete_item(&self, id: &str) -> ApiResult<()> {
        self.workload_repo.delete_item(id).await?;
        info!(id, "删除工作量记录成功");
        Ok(())
    }

    /// 组级删除
    ///
    /// 销毁该学科下的全部记录。确认信号必须由调用方给出,
    /// 本层不做任何交互式提示。
    ///
    /// # 参数
    /// - subject_id: 学科ID
    /// - confirmed: 调用方的显式确认标记
    ///
    /// # 返回
    /// - Ok(usize): 删除条数（0 = 该学科无记录）
    /// - Err(NotConfirmed): 配置要求确认而调用方未确认,未发生任何仓储调用
    pub async fn delete_group(&self, subject_id: i64, confirmed: bool) -> ApiResult<usize> {
        let requires_confirmation = self
            .config
            .get_delete_requires_confirmation()
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        if requires_confirmation && !confirmed {
            return Err(ApiError::NotConfirmed(i18n::t(
                "workload.delete_not_confirmed",
            )));
        }

        let deleted = self.workload_repo.delete_group(subject_id).await?;
        info!(subject_id, deleted, "组级删除完成");
        Ok(deleted)
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    /// 加载显示名映射（学科名 / 受众名）
    async fn load_name_maps(
        &self,
    ) -> ApiResult<(HashMap<i64, String>, HashMap<TargetRef, String>)> {
        let subjects = self.reference_repo.list_subjects().await?;
        let streams = self.reference_repo.list_streams().await?;
        let class_groups = self.reference_repo.list_class_groups().await?;

        let subject_names: HashMap<i64, String> =
            subjects.into_iter().map(|s| (s.id, s.name)).collect();

        let mut target_names: HashMap<TargetRef, String> = HashMap::new();
        for s in streams {
            target_names.insert(TargetRef::Stream(s.id), s.name);
        }
        for g in class_groups {
            target_names.insert(TargetRef::Group(g.id), g.name);
        }

        Ok((subject_names, target_names))
    }
}
