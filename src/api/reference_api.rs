// ==========================================
// 教学工作量管理台 - 参照数据 API
// ==========================================
// 职责: 学科 / 大班流 / 班级 / 教学计划的只读查询
// 用途: 表单下拉与显示名解析
// ==========================================

use std::sync::Arc;
use tracing::debug;

use crate::api::error::ApiResult;
use crate::domain::reference::{ClassGroup, EduPlan, Stream, Subject};
use crate::repository::reference_repo::ReferenceRepository;

// ==========================================
// ReferenceApi - 参照数据 API
// ==========================================
pub struct ReferenceApi {
    reference_repo: Arc<dyn ReferenceRepository>,
}

impl ReferenceApi {
    /// 创建新的ReferenceApi实例
    pub fn new(reference_repo: Arc<dyn ReferenceRepository>) -> Self {
        Self { reference_repo }
    }

    /// 学科列表
    pub async fn list_subjects(&self) -> ApiResult<Vec<Subject>> {
        let subjects = self.reference_repo.list_subjects().await?;
        debug!(count = subjects.len(), "查询学科列表");
        Ok(subjects)
    }

    /// 大班流列表
    pub async fn list_streams(&self) -> ApiResult<Vec<Stream>> {
        Ok(self.reference_repo.list_streams().await?)
    }

    /// 班级列表
    pub async fn list_class_groups(&self) -> ApiResult<Vec<ClassGroup>> {
        Ok(self.reference_repo.list_class_groups().await?)
    }

    /// 教学计划列表
    pub async fn list_edu_plans(&self) -> ApiResult<Vec<EduPlan>> {
        Ok(self.reference_repo.list_edu_plans().await?)
    }
}
