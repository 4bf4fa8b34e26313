// ==========================================
// 教学工作量管理台 - 分组汇总引擎
// ==========================================
// 职责: 把平铺的工作量记录按学科聚合为展示用汇总
// 输入: 工作量记录列表 + 显示名映射
// 输出: SubjectWorkloadGroup 列表
// ==========================================
// 红线: 无状态引擎,所有方法都是纯函数
// 红线: 派生状态不落库,每次读取重算
// ==========================================

use crate::domain::types::TargetRef;
use crate::domain::workload::{SubjectWorkloadGroup, TargetInfo, WorkloadItem};
use std::collections::{BTreeMap, HashMap, HashSet};

// ==========================================
// GroupingEngine - 分组汇总引擎
// ==========================================
pub struct GroupingEngine;

impl GroupingEngine {
    /// 创建新的分组汇总引擎
    pub fn new() -> Self {
        Self
    }

    /// 按学科聚合工作量记录
    ///
    /// # 参数
    /// - `items`: 平铺的工作量记录（保持读取顺序）
    /// - `subject_names`: 学科ID → 显示名
    /// - `target_names`: 目标受众 → 显示名
    ///
    /// # 返回
    /// 学科分组列表,顺序 = 各学科在输入中的首次出现顺序
    ///
    /// # 口径
    /// - `hours_by_type`: 仅包含组内出现过的课时类型
    /// - `total_hours`: 全部成员学时之和（重复受众照常计入）
    /// - `unique_targets`: (类别, ID) 去重,保留首次出现,查不到名的为 None
    /// - `group_name`: 取首个成员的 name（代表成员）
    pub fn group(
        &self,
        items: &[WorkloadItem],
        subject_names: &HashMap<i64, String>,
        target_names: &HashMap<TargetRef, String>,
    ) -> Vec<SubjectWorkloadGroup> {
        // 首现顺序分区
        let mut order: Vec<i64> = Vec::new();
        let mut partitions: HashMap<i64, Vec<WorkloadItem>> = HashMap::new();
        for item in items {
            if !partitions.contains_key(&item.subject_id) {
                order.push(item.subject_id);
            }
            partitions
                .entry(item.subject_id)
                .or_default()
                .push(item.clone());
        }

        order
            .into_iter()
            .map(|subject_id| {
                let members = partitions.remove(&subject_id).unwrap_or_default();
                Self::summarize(subject_id, members, subject_names, target_names)
            })
            .collect()
    }

    /// 汇总单个学科分区
    fn summarize(
        subject_id: i64,
        members: Vec<WorkloadItem>,
        subject_names: &HashMap<i64, String>,
        target_names: &HashMap<TargetRef, String>,
    ) -> SubjectWorkloadGroup {
        let mut hours_by_type: BTreeMap<_, i64> = BTreeMap::new();
        let mut total_hours: i64 = 0;
        let mut seen_targets: HashSet<TargetRef> = HashSet::new();
        let mut unique_targets: Vec<TargetInfo> = Vec::new();

        for item in &members {
            *hours_by_type.entry(item.load_type).or_insert(0) += item.hours;
            total_hours += item.hours;

            // 重复受众不进列表,但学时照常计入
            if seen_targets.insert(item.target) {
                unique_targets.push(TargetInfo {
                    target: item.target,
                    name: target_names.get(&item.target).cloned(),
                });
            }
        }

        SubjectWorkloadGroup {
            subject_id,
            subject_name: subject_names.get(&subject_id).cloned(),
            group_name: members.first().and_then(|m| m.name.clone()),
            items: members,
            hours_by_type,
            total_hours,
            unique_targets,
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for GroupingEngine {
    fn default() -> Self {
        Self::new()
    }
}
