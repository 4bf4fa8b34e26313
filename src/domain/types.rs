// ==========================================
// 教学工作量管理台 - 领域类型定义
// ==========================================
// 红线: 课时类型为封闭枚举,目标受众为和类型
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 课时类型 (Load Type)
// ==========================================
// 红线: 封闭枚举,不接受自定义课时类型
// 顺序: 讲课 < 实践 < 实验 < 研讨 (展示顺序)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadType {
    Lecture,  // 讲课(面向大班流)
    Practice, // 实践课
    Lab,      // 实验课
    Seminar,  // 研讨课
}

impl fmt::Display for LoadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadType::Lecture => write!(f, "LECTURE"),
            LoadType::Practice => write!(f, "PRACTICE"),
            LoadType::Lab => write!(f, "LAB"),
            LoadType::Seminar => write!(f, "SEMINAR"),
        }
    }
}

impl LoadType {
    /// 从字符串解析课时类型
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "LECTURE" => Some(LoadType::Lecture),
            "PRACTICE" => Some(LoadType::Practice),
            "LAB" => Some(LoadType::Lab),
            "SEMINAR" => Some(LoadType::Seminar),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            LoadType::Lecture => "LECTURE",
            LoadType::Practice => "PRACTICE",
            LoadType::Lab => "LAB",
            LoadType::Seminar => "SEMINAR",
        }
    }

    /// 全部课时类型(固定顺序: 讲课/实践/实验/研讨)
    pub fn all() -> [LoadType; 4] {
        [
            LoadType::Lecture,
            LoadType::Practice,
            LoadType::Lab,
            LoadType::Seminar,
        ]
    }

    /// 该课时类型要求的目标受众类别
    ///
    /// 红线: 讲课面向大班流,其余类型面向班级
    pub fn required_target_kind(&self) -> TargetKind {
        match self {
            LoadType::Lecture => TargetKind::Stream,
            LoadType::Practice | LoadType::Lab | LoadType::Seminar => TargetKind::Group,
        }
    }
}

// ==========================================
// 目标受众类别 (Target Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetKind {
    Stream, // 大班流(跨多个班级)
    Group,  // 班级
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Stream => write!(f, "STREAM"),
            TargetKind::Group => write!(f, "GROUP"),
        }
    }
}

impl TargetKind {
    /// 从字符串解析目标受众类别
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "STREAM" => Some(TargetKind::Stream),
            "GROUP" => Some(TargetKind::Group),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            TargetKind::Stream => "STREAM",
            TargetKind::Group => "GROUP",
        }
    }
}

// ==========================================
// 目标受众引用 (Target Ref)
// ==========================================
// 红线: 和类型,构造即合法,不存在"类别+裸ID"的非法组合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetRef {
    Stream(i64), // 大班流ID
    Group(i64),  // 班级ID
}

impl fmt::Display for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetRef::Stream(id) => write!(f, "STREAM:{}", id),
            TargetRef::Group(id) => write!(f, "GROUP:{}", id),
        }
    }
}

impl TargetRef {
    /// 按课时类型构造目标受众引用
    ///
    /// # 参数
    /// - `load_type`: 课时类型
    /// - `id`: 大班流或班级ID
    ///
    /// # 返回
    /// - 讲课 → `Stream(id)`; 实践/实验/研讨 → `Group(id)`
    pub fn for_load_type(load_type: LoadType, id: i64) -> Self {
        match load_type.required_target_kind() {
            TargetKind::Stream => TargetRef::Stream(id),
            TargetKind::Group => TargetRef::Group(id),
        }
    }

    /// 从数据库列还原目标受众引用
    pub fn from_parts(kind: TargetKind, id: i64) -> Self {
        match kind {
            TargetKind::Stream => TargetRef::Stream(id),
            TargetKind::Group => TargetRef::Group(id),
        }
    }

    /// 目标受众类别
    pub fn kind(&self) -> TargetKind {
        match self {
            TargetRef::Stream(_) => TargetKind::Stream,
            TargetRef::Group(_) => TargetKind::Group,
        }
    }

    /// 目标受众ID
    pub fn id(&self) -> i64 {
        match self {
            TargetRef::Stream(id) | TargetRef::Group(id) => *id,
        }
    }

    /// 是否与课时类型要求的类别一致
    pub fn matches_load_type(&self, load_type: LoadType) -> bool {
        self.kind() == load_type.required_target_kind()
    }
}
