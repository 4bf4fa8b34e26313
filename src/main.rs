// ==========================================
// 教学工作量管理台 - 主入口
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 教学工作量汇总与批量维护
// ==========================================

use teaching_load_console::app::{get_default_db_path, AppState};
use teaching_load_console::domain::WorkloadFilter;
use teaching_load_console::{i18n, logging, APP_NAME, VERSION};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", APP_NAME);
    tracing::info!("系统版本: {}", VERSION);
    tracing::info!("==================================================");

    // 获取数据库路径
    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    // 创建AppState
    let state = AppState::new(db_path).map_err(anyhow::Error::msg)?;

    // 界面语言跟随配置
    if let Ok(locale) = state.config_manager.get_locale() {
        i18n::set_locale(&locale);
    }

    // 基础数据概览
    let subjects = state.reference_api.list_subjects().await?;
    let streams = state.reference_api.list_streams().await?;
    let class_groups = state.reference_api.list_class_groups().await?;
    let edu_plans = state.reference_api.list_edu_plans().await?;
    tracing::info!(
        "基础数据: 学科 {} 个, 学生流 {} 个, 班组 {} 个, 教学计划 {} 个",
        subjects.len(),
        streams.len(),
        class_groups.len(),
        edu_plans.len()
    );

    // 第一页工作量记录
    let page_size = state.config_manager.get_default_page_size().unwrap_or(20);
    let filter = WorkloadFilter {
        edu_plan_id: None,
        page: 1,
        page_size,
    };
    let page = state.workload_api.list_items(&filter).await?;
    tracing::info!(
        "工作量记录: 本页 {} 条, 总计 {} 条",
        page.items.len(),
        page.total
    );

    // 学科汇总视图
    let groups = state.workload_api.grouped_view(&filter).await?;
    for group in &groups {
        let subject_label = group
            .subject_name
            .clone()
            .unwrap_or_else(|| format!("学科#{}", group.subject_id));
        tracing::info!(
            "学科汇总: {} | 总学时 {} | 类型 {} 种 | 教学目标 {} 个",
            subject_label,
            group.total_hours,
            group.hours_by_type.len(),
            group.unique_targets.len()
        );
    }

    if groups.is_empty() {
        tracing::info!("暂无工作量数据, 可先运行 seed_demo_data 生成演示数据");
    }

    Ok(())
}
