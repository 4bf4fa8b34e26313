// ==========================================
// 教学工作量管理台 - 批量提交校验器
// ==========================================
// 职责: 批量提交与单条修改的前置校验
// 红线: 校验在任何仓储调用之前完成,检出即拒绝
// ==========================================

use crate::api::error::{ApiError, ApiResult, ValidationViolation};
use crate::domain::types::LoadType;
use crate::domain::workload::{WorkloadBatchSpec, WorkloadItem, WorkloadItemPatch};
use crate::i18n;

// ==========================================
// BatchSpecValidator - 批量提交校验器
// ==========================================
pub struct BatchSpecValidator;

impl BatchSpecValidator {
    /// 创建新的校验器实例
    pub fn new() -> Self {
        Self
    }

    /// 丢弃没有选择任何受众的行
    ///
    /// 空行是 UI 的常态（四种课时类型固定展示,未使用的类型不选受众）,
    /// 在校验前剔除,不算违规。
    pub fn prune_empty_entries(&self, spec: &WorkloadBatchSpec) -> WorkloadBatchSpec {
        WorkloadBatchSpec {
            subject_id: spec.subject_id,
            edu_plan_id: spec.edu_plan_id,
            name: spec.name.clone(),
            entries: spec
                .entries
                .iter()
                .filter(|e| !e.target_ids.is_empty())
                .cloned()
                .collect(),
        }
    }

    /// 校验剔除空行后的批量提交
    ///
    /// # 返回
    /// - Ok(()): 可以进入差分/落库
    /// - Err(Validation): 无剩余行,或存在非正学时
    pub fn validate_spec(&self, spec: &WorkloadBatchSpec) -> ApiResult<()> {
        if spec.entries.is_empty() {
            return Err(ApiError::validation(i18n::t("workload.nothing_selected")));
        }

        let mut violations = Vec::new();
        for (idx, entry) in spec.entries.iter().enumerate() {
            if entry.hours <= 0 {
                violations.push(ValidationViolation {
                    field: format!("entries[{}].hours", idx),
                    reason: format!(
                        "{} ({}={})",
                        i18n::t("workload.invalid_hours"),
                        entry.load_type,
                        entry.hours
                    ),
                });
            }
        }

        if !violations.is_empty() {
            return Err(ApiError::Validation {
                reason: i18n::t("workload.invalid_hours"),
                violations,
            });
        }

        Ok(())
    }

    /// 校验单条修改在合并后的结果
    ///
    /// # 参数
    /// - existing: 现有记录
    /// - patch: 增量修改
    ///
    /// # 校验点
    /// - 合并后学时为正
    /// - 合并后受众类别与课时类型匹配（讲课→大班流,其余→班级）
    pub fn validate_patch(&self, existing: &WorkloadItem, patch: &WorkloadItemPatch) -> ApiResult<()> {
        if patch.is_empty() {
            return Err(ApiError::validation("修改内容为空"));
        }

        let merged_hours = patch.hours.unwrap_or(existing.hours);
        if merged_hours <= 0 {
            return Err(ApiError::validation(format!(
                "{} (hours={})",
                i18n::t("workload.invalid_hours"),
                merged_hours
            )));
        }

        let merged_load_type: LoadType = patch.load_type.unwrap_or(existing.load_type);
        let merged_target = patch.target.unwrap_or(existing.target);
        if !merged_target.matches_load_type(merged_load_type) {
            return Err(ApiError::validation(format!(
                "课时类型 {} 要求 {} 类受众,实际为 {}",
                merged_load_type,
                merged_load_type.required_target_kind(),
                merged_target.kind()
            )));
        }

        Ok(())
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for BatchSpecValidator {
    fn default() -> Self {
        Self::new()
    }
}
