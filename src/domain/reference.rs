// ==========================================
// 教学工作量管理台 - 参照数据模型
// ==========================================
// 红线: 工作量子系统只读消费,不负责参照数据的维护
// 对齐: db.rs subject / stream / class_group / edu_plan 表
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Subject - 学科
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,                    // 学科ID
    pub name: String,               // 学科名称
    pub department_id: Option<i64>, // 所属院系ID（仅展示用）
}

// ==========================================
// Stream - 大班流
// ==========================================
// 讲课类工作量的目标受众,通常跨多个班级
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stream {
    pub id: i64,      // 大班流ID
    pub name: String, // 大班流名称
}

// ==========================================
// ClassGroup - 班级
// ==========================================
// 实践/实验/研讨类工作量的目标受众
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassGroup {
    pub id: i64,      // 班级ID
    pub name: String, // 班级名称
}

// ==========================================
// EduPlan - 教学计划
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EduPlan {
    pub id: i64,      // 教学计划ID
    pub name: String, // 教学计划名称
}
