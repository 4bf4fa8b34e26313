// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use teaching_load_console::domain::{NewWorkloadItem, WorkloadBatchEntry, WorkloadBatchSpec};
use teaching_load_console::{LoadType, TargetRef};

// ==========================================
// NewWorkloadItem 构建器
// ==========================================

pub struct WorkloadItemBuilder {
    subject_id: i64,
    edu_plan_id: Option<i64>,
    name: Option<String>,
    load_type: LoadType,
    hours: i64,
    target: TargetRef,
}

impl WorkloadItemBuilder {
    pub fn new(subject_id: i64) -> Self {
        Self {
            subject_id,
            edu_plan_id: None,
            name: None,
            load_type: LoadType::Lecture,
            hours: 30,
            target: TargetRef::Stream(1),
        }
    }

    pub fn edu_plan(mut self, edu_plan_id: i64) -> Self {
        self.edu_plan_id = Some(edu_plan_id);
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn lecture(mut self, hours: i64, stream_id: i64) -> Self {
        self.load_type = LoadType::Lecture;
        self.hours = hours;
        self.target = TargetRef::Stream(stream_id);
        self
    }

    pub fn practice(mut self, hours: i64, group_id: i64) -> Self {
        self.load_type = LoadType::Practice;
        self.hours = hours;
        self.target = TargetRef::Group(group_id);
        self
    }

    pub fn lab(mut self, hours: i64, group_id: i64) -> Self {
        self.load_type = LoadType::Lab;
        self.hours = hours;
        self.target = TargetRef::Group(group_id);
        self
    }

    pub fn seminar(mut self, hours: i64, group_id: i64) -> Self {
        self.load_type = LoadType::Seminar;
        self.hours = hours;
        self.target = TargetRef::Group(group_id);
        self
    }

    pub fn build(self) -> NewWorkloadItem {
        NewWorkloadItem {
            subject_id: self.subject_id,
            edu_plan_id: self.edu_plan_id,
            name: self.name,
            load_type: self.load_type,
            hours: self.hours,
            target: self.target,
        }
    }
}

// ==========================================
// WorkloadBatchSpec 构建器
// ==========================================

pub struct BatchSpecBuilder {
    subject_id: i64,
    edu_plan_id: Option<i64>,
    name: Option<String>,
    entries: Vec<WorkloadBatchEntry>,
}

impl BatchSpecBuilder {
    pub fn new(subject_id: i64) -> Self {
        Self {
            subject_id,
            edu_plan_id: None,
            name: None,
            entries: Vec::new(),
        }
    }

    pub fn edu_plan(mut self, edu_plan_id: i64) -> Self {
        self.edu_plan_id = Some(edu_plan_id);
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn entry(mut self, load_type: LoadType, hours: i64, target_ids: &[i64]) -> Self {
        self.entries.push(WorkloadBatchEntry {
            load_type,
            hours,
            target_ids: target_ids.to_vec(),
        });
        self
    }

    pub fn build(self) -> WorkloadBatchSpec {
        WorkloadBatchSpec {
            subject_id: self.subject_id,
            edu_plan_id: self.edu_plan_id,
            name: self.name,
            entries: self.entries,
        }
    }
}
