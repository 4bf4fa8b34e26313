// ==========================================
// 教学工作量管理台 - 新增差分引擎
// ==========================================
// 职责: 计算"追加提交"里真正新增的目标受众
// 场景: 向已有学科组追加分配时,UI 预选了全部已分配受众,
//       只有没有对应记录的受众才需要生成创建请求
// ==========================================
// 红线: 无状态引擎,确定性纯函数,相同输入必得相同输出
// ==========================================

use crate::domain::types::LoadType;
use crate::domain::workload::WorkloadItem;
use std::collections::HashSet;

// ==========================================
// DiffEngine - 新增差分引擎
// ==========================================
pub struct DiffEngine;

impl DiffEngine {
    /// 创建新的差分引擎
    pub fn new() -> Self {
        Self
    }

    /// 计算提议受众中尚无同类型记录的部分
    ///
    /// # 参数
    /// - `existing_items`: 该学科组的现有记录
    /// - `load_type`: 本次提交的课时类型
    /// - `proposed_target_ids`: 提议的受众ID（含已分配的预选项）
    ///
    /// # 返回
    /// 未被同类型现有记录覆盖的受众ID,保持提议顺序
    pub fn diff_new_targets(
        &self,
        existing_items: &[WorkloadItem],
        load_type: LoadType,
        proposed_target_ids: &[i64],
    ) -> Vec<i64> {
        let existing_ids: HashSet<i64> = existing_items
            .iter()
            .filter(|item| item.load_type == load_type)
            .map(|item| item.target.id())
            .collect();

        proposed_target_ids
            .iter()
            .copied()
            .filter(|id| !existing_ids.contains(id))
            .collect()
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}
