// ==========================================
// 教学工作量管理台 - 工作量领域模型
// ==========================================
// 红线: 同一 (学科, 课时类型, 目标受众) 至多一条记录
// 对齐: db.rs workload_item 表
// ==========================================

use crate::domain::types::{LoadType, TargetRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// WorkloadItem - 工作量记录
// ==========================================
// 用途: 持久化的最小单元,一条 = 一种课时类型指向一个受众
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadItem {
    // ===== 主键 =====
    pub id: String, // 记录唯一标识（持久层分配,UUID v4）

    // ===== 分组键 =====
    pub subject_id: i64,          // 学科ID（分组键）
    pub edu_plan_id: Option<i64>, // 教学计划ID（信息性,组改名时同步）
    pub name: Option<String>,     // 组内共享标签（如教师名/备注）

    // ===== 工作量 =====
    pub load_type: LoadType, // 课时类型
    pub hours: i64,          // 学时（正整数）
    pub target: TargetRef,   // 目标受众（类别由课时类型决定）

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 记录创建时间
    pub updated_at: DateTime<Utc>, // 记录更新时间
}

// ==========================================
// NewWorkloadItem - 待创建的工作量记录
// ==========================================
// 无 id / 审计字段,由持久层分配
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkloadItem {
    pub subject_id: i64,          // 学科ID
    pub edu_plan_id: Option<i64>, // 教学计划ID
    pub name: Option<String>,     // 组内共享标签
    pub load_type: LoadType,      // 课时类型
    pub hours: i64,               // 学时
    pub target: TargetRef,        // 目标受众
}

// ==========================================
// WorkloadItemPatch - 单条记录的增量修改
// ==========================================
// None = 不修改该字段
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkloadItemPatch {
    pub subject_id: Option<i64>,      // 调整所属学科
    pub edu_plan_id: Option<i64>,     // 调整教学计划
    pub name: Option<String>,         // 调整共享标签
    pub load_type: Option<LoadType>,  // 调整课时类型
    pub hours: Option<i64>,           // 调整学时
    pub target: Option<TargetRef>,    // 调整目标受众
}

impl WorkloadItemPatch {
    /// 是否为空修改(所有字段均为 None)
    pub fn is_empty(&self) -> bool {
        self.subject_id.is_none()
            && self.edu_plan_id.is_none()
            && self.name.is_none()
            && self.load_type.is_none()
            && self.hours.is_none()
            && self.target.is_none()
    }
}

// ==========================================
// WorkloadBatchEntry - 批量提交中的一行
// ==========================================
// 一行 = 一种课时类型 + 学时 + 多个目标受众ID
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadBatchEntry {
    pub load_type: LoadType,  // 课时类型
    pub hours: i64,           // 学时（该类型下每个受众相同）
    pub target_ids: Vec<i64>, // 目标受众ID列表（类别由课时类型决定）
}

// ==========================================
// WorkloadBatchSpec - 批量提交
// ==========================================
// 展开规则: 每个 (课时类型, 受众ID) 生成一条 WorkloadItem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadBatchSpec {
    pub subject_id: i64,                  // 学科ID（整批共享）
    pub edu_plan_id: Option<i64>,         // 教学计划ID（整批共享）
    pub name: Option<String>,             // 共享标签（整批共享）
    pub entries: Vec<WorkloadBatchEntry>, // 各课时类型的受众分配
}

impl WorkloadBatchSpec {
    /// 展开为待创建记录列表
    ///
    /// # 返回
    /// - 每个 (课时类型, 受众ID) 一条,受众类别按课时类型决定
    pub fn expand(&self) -> Vec<NewWorkloadItem> {
        let mut items = Vec::new();
        for entry in &self.entries {
            for &target_id in &entry.target_ids {
                items.push(NewWorkloadItem {
                    subject_id: self.subject_id,
                    edu_plan_id: self.edu_plan_id,
                    name: self.name.clone(),
                    load_type: entry.load_type,
                    hours: entry.hours,
                    target: TargetRef::for_load_type(entry.load_type, target_id),
                });
            }
        }
        items
    }
}

// ==========================================
// GroupRename - 组级改名
// ==========================================
// 一次逻辑请求,持久层原子应用到旧学科ID下的全部记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRename {
    pub subject_id: i64,              // 旧学科ID（定位组）
    pub new_subject_id: Option<i64>,  // 新学科ID
    pub new_name: Option<String>,     // 新共享标签
    pub new_edu_plan_id: Option<i64>, // 新教学计划ID
}

impl GroupRename {
    /// 是否为空修改(所有可改字段均为 None)
    pub fn is_empty(&self) -> bool {
        self.new_subject_id.is_none() && self.new_name.is_none() && self.new_edu_plan_id.is_none()
    }
}

// ==========================================
// WorkloadFilter - 列表查询条件
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadFilter {
    pub edu_plan_id: Option<i64>, // 按教学计划过滤（None = 全部）
    pub page: u32,                // 页码（1 起）
    pub page_size: u32,           // 每页条数
}

impl Default for WorkloadFilter {
    fn default() -> Self {
        Self {
            edu_plan_id: None,
            page: 1,
            page_size: 20,
        }
    }
}

impl WorkloadFilter {
    /// 查询偏移量
    pub fn offset(&self) -> u32 {
        self.page.saturating_sub(1) * self.page_size
    }
}

// ==========================================
// PagedWorkloadItems - 分页查询结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedWorkloadItems {
    pub items: Vec<WorkloadItem>, // 当前页记录
    pub total: i64,               // 过滤后总条数（跨页）
}

// ==========================================
// TargetInfo - 带显示名的目标受众
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetInfo {
    pub target: TargetRef,    // 目标受众引用
    pub name: Option<String>, // 显示名（查不到名称时为 None）
}

// ==========================================
// SubjectWorkloadGroup - 学科分组汇总
// ==========================================
// 红线: 派生状态,不落库,每次读取重算
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectWorkloadGroup {
    pub subject_id: i64,                      // 学科ID
    pub subject_name: Option<String>,         // 学科显示名
    pub group_name: Option<String>,           // 组标签（取成员代表的 name）
    pub items: Vec<WorkloadItem>,             // 成员记录（保持输入顺序）
    pub hours_by_type: BTreeMap<LoadType, i64>, // 各课时类型学时合计（缺席类型不出现）
    pub total_hours: i64,                     // 四类学时总计
    pub unique_targets: Vec<TargetInfo>,      // 去重后的目标受众（首现顺序）
}
