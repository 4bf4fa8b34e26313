// ==========================================
// WorkloadApi 集成测试
// ==========================================
// 测试范围:
// 1. 批量创建: 校验拒绝、追加差分、无新增、唯一性冲突
// 2. 组级操作: 整组删除、删除确认、组级改名
// 3. 汇总视图: 学科分组与显示名解析
// ==========================================

mod helpers;

use helpers::api_test_helper::ApiTestEnv;
use helpers::test_data_builder::{BatchSpecBuilder, WorkloadItemBuilder};

use teaching_load_console::api::ApiError;
use teaching_load_console::config::config_keys;
use teaching_load_console::domain::{GroupRename, WorkloadFilter, WorkloadItemPatch};
use teaching_load_console::{LoadType, TargetRef};

// ==========================================
// 批量创建测试
// ==========================================

#[tokio::test]
async fn test_create_batch_creates_all_entries_批量创建() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let spec = BatchSpecBuilder::new(1)
        .edu_plan(1)
        .name("Algoritmlar 3-semestr")
        .entry(LoadType::Lecture, 30, &[1])
        .entry(LoadType::Practice, 15, &[1, 2])
        .build();

    let created = env
        .workload_api
        .create_batch(&spec, None)
        .await
        .expect("批量创建失败");

    assert_eq!(created.len(), 3, "1个讲课 + 2个实践 = 3条记录");
    assert_eq!(env.count_items(), 3);

    // 整批共享字段
    for item in &created {
        assert_eq!(item.subject_id, 1);
        assert_eq!(item.edu_plan_id, Some(1));
        assert_eq!(item.name.as_deref(), Some("Algoritmlar 3-semestr"));
    }

    // 讲课走学生流, 实践走班组
    assert_eq!(created[0].target, TargetRef::Stream(1));
    assert_eq!(created[1].target, TargetRef::Group(1));
    assert_eq!(created[2].target, TargetRef::Group(2));
}

#[tokio::test]
async fn test_create_batch_rejects_empty_submission_空提交() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    // 没有任何条目
    let spec = BatchSpecBuilder::new(1).build();
    let err = env
        .workload_api
        .create_batch(&spec, None)
        .await
        .expect_err("空提交应该被拒绝");
    assert!(
        matches!(err, ApiError::Validation { .. }),
        "期望 Validation, 实际: {:?}",
        err
    );

    // 所有条目都未选受众
    let spec = BatchSpecBuilder::new(1)
        .entry(LoadType::Lecture, 30, &[])
        .entry(LoadType::Practice, 15, &[])
        .build();
    let err = env
        .workload_api
        .create_batch(&spec, None)
        .await
        .expect_err("全空受众应该被拒绝");
    assert!(matches!(err, ApiError::Validation { .. }));

    // 校验失败不得触发任何仓储写入
    assert_eq!(env.count_items(), 0, "校验失败后不应有任何记录落库");
}

#[tokio::test]
async fn test_create_batch_rejects_nonpositive_hours_非法学时() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let spec = BatchSpecBuilder::new(1)
        .entry(LoadType::Lecture, 0, &[1])
        .build();

    let err = env
        .workload_api
        .create_batch(&spec, None)
        .await
        .expect_err("零学时应该被拒绝");

    match err {
        ApiError::Validation { violations, .. } => {
            assert!(!violations.is_empty(), "应给出具体的字段级违规");
            assert!(
                violations[0].field.contains("hours"),
                "违规字段应指向 hours: {}",
                violations[0].field
            );
        }
        other => panic!("期望 Validation, 实际: {:?}", other),
    }

    assert_eq!(env.count_items(), 0);
}

#[tokio::test]
async fn test_create_batch_add_to_existing_追加差分() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    // 已有: 学科1 讲课 -> 学生流1
    env.seed_item(WorkloadItemBuilder::new(1).lecture(30, 1).build())
        .await;

    let group = env
        .workload_api
        .get_group(1)
        .await
        .expect("查询分组失败")
        .expect("学科1应存在分组");

    // 追加提交: UI 预选了已有的流1 + 新选的流2
    let spec = BatchSpecBuilder::new(1)
        .entry(LoadType::Lecture, 30, &[1, 2])
        .build();

    let created = env
        .workload_api
        .create_batch(&spec, Some(&group))
        .await
        .expect("追加创建失败");

    assert_eq!(created.len(), 1, "差分后只应创建流2一条记录");
    assert_eq!(created[0].target, TargetRef::Stream(2));
    assert_eq!(env.count_items(), 2);
}

#[tokio::test]
async fn test_create_batch_no_new_assignments_无新增() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    env.seed_item(WorkloadItemBuilder::new(1).lecture(30, 1).build())
        .await;

    let group = env
        .workload_api
        .get_group(1)
        .await
        .expect("查询分组失败")
        .expect("学科1应存在分组");

    // 提议的受众全部已存在
    let spec = BatchSpecBuilder::new(1)
        .entry(LoadType::Lecture, 30, &[1])
        .build();

    let err = env
        .workload_api
        .create_batch(&spec, Some(&group))
        .await
        .expect_err("全部已存在应报无新增");

    // 与"什么都没选"的校验失败必须可区分
    assert!(
        matches!(err, ApiError::NoNewAssignments(_)),
        "期望 NoNewAssignments, 实际: {:?}",
        err
    );
    assert_eq!(env.count_items(), 1, "无新增时不应落库");
}

#[tokio::test]
async fn test_create_batch_duplicate_conflict_唯一性冲突() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    env.seed_item(WorkloadItemBuilder::new(1).practice(15, 1).build())
        .await;

    // 新建模式(无差分上下文)下提交重复分配 + 一条真正的新分配
    let spec = BatchSpecBuilder::new(1)
        .entry(LoadType::Practice, 15, &[1])
        .entry(LoadType::Lab, 10, &[1])
        .build();

    let err = env
        .workload_api
        .create_batch(&spec, None)
        .await
        .expect_err("重复分配应被持久层拒绝");

    assert!(
        matches!(err, ApiError::Conflict(_)),
        "期望 Conflict, 实际: {:?}",
        err
    );

    // 批量创建整体失败: 同批的实验记录也必须回滚
    assert_eq!(env.count_items(), 1, "批量创建必须全有或全无");
}

#[tokio::test]
async fn test_create_batch_subject_mismatch_学科不一致() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    env.seed_item(WorkloadItemBuilder::new(1).lecture(30, 1).build())
        .await;

    let group = env
        .workload_api
        .get_group(1)
        .await
        .expect("查询分组失败")
        .expect("学科1应存在分组");

    // 追加上下文是学科1, 提交却指向学科2
    let spec = BatchSpecBuilder::new(2)
        .entry(LoadType::Lecture, 30, &[2])
        .build();

    let err = env
        .workload_api
        .create_batch(&spec, Some(&group))
        .await
        .expect_err("学科不一致应被拒绝");
    assert!(matches!(err, ApiError::Validation { .. }));
    assert_eq!(env.count_items(), 1);
}

// ==========================================
// 汇总视图测试
// ==========================================

#[tokio::test]
async fn test_grouped_view_resolves_names_学科汇总() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    env.seed_item(WorkloadItemBuilder::new(1).lecture(30, 1).build())
        .await;
    env.seed_item(WorkloadItemBuilder::new(1).practice(20, 1).build())
        .await;
    env.seed_item(WorkloadItemBuilder::new(2).lecture(10, 2).build())
        .await;

    let groups = env
        .workload_api
        .grouped_view(&WorkloadFilter::default())
        .await
        .expect("汇总视图查询失败");

    assert_eq!(groups.len(), 2, "两个学科应产生两个分组");

    // 学科1: 首现在前, 学时按类型汇总
    let first = &groups[0];
    assert_eq!(first.subject_id, 1);
    assert_eq!(
        first.subject_name.as_deref(),
        Some("Algoritmlar va Ma'lumotlar Tuzilmasi")
    );
    assert_eq!(first.total_hours, 50);
    assert_eq!(first.hours_by_type.get(&LoadType::Lecture), Some(&30));
    assert_eq!(first.hours_by_type.get(&LoadType::Practice), Some(&20));
    assert_eq!(first.unique_targets.len(), 2);
    assert_eq!(
        first.unique_targets[0].name.as_deref(),
        Some("SE 3-kurs oqimi")
    );
    assert_eq!(first.unique_targets[1].name.as_deref(), Some("SE-301"));

    // 学科2
    let second = &groups[1];
    assert_eq!(second.subject_id, 2);
    assert_eq!(second.subject_name.as_deref(), Some("Veb Dasturlash"));
    assert_eq!(second.total_hours, 10);
}

#[tokio::test]
async fn test_get_group_missing_subject_返回空() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let group = env
        .workload_api
        .get_group(99)
        .await
        .expect("查询分组失败");
    assert!(group.is_none(), "无记录学科应返回 None");
}

// ==========================================
// 单条修改测试
// ==========================================

#[tokio::test]
async fn test_update_item_修改学时() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let created = env
        .workload_api
        .create_item(WorkloadItemBuilder::new(1).lecture(30, 1).build())
        .await
        .expect("创建记录失败");

    let patch = WorkloadItemPatch {
        hours: Some(40),
        ..Default::default()
    };
    let updated = env
        .workload_api
        .update_item(&created.id, &patch)
        .await
        .expect("修改记录失败");

    assert_eq!(updated.hours, 40);
    assert_eq!(updated.subject_id, 1, "未修改字段应保持原值");
    assert_eq!(updated.target, TargetRef::Stream(1));

    let fetched = env
        .workload_api
        .get_item(&created.id)
        .await
        .expect("回查记录失败");
    assert_eq!(fetched.hours, 40);
}

#[tokio::test]
async fn test_update_item_rejects_type_mismatch_受众类型不匹配() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let created = env
        .workload_api
        .create_item(WorkloadItemBuilder::new(1).practice(15, 1).build())
        .await
        .expect("创建记录失败");

    // 只改课时类型不换受众: 合并结果为 讲课 -> 班组, 非法
    let bad_patch = WorkloadItemPatch {
        load_type: Some(LoadType::Lecture),
        ..Default::default()
    };
    let err = env
        .workload_api
        .update_item(&created.id, &bad_patch)
        .await
        .expect_err("讲课指向班组应被拒绝");
    assert!(matches!(err, ApiError::Validation { .. }));

    // 课时类型与受众一起换则合法
    let good_patch = WorkloadItemPatch {
        load_type: Some(LoadType::Lecture),
        target: Some(TargetRef::Stream(1)),
        ..Default::default()
    };
    let updated = env
        .workload_api
        .update_item(&created.id, &good_patch)
        .await
        .expect("合法修改失败");
    assert_eq!(updated.load_type, LoadType::Lecture);
    assert_eq!(updated.target, TargetRef::Stream(1));
}

// ==========================================
// 组级改名测试
// ==========================================

#[tokio::test]
async fn test_rename_group_改名计数() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    env.seed_item(WorkloadItemBuilder::new(1).lecture(30, 1).build())
        .await;
    env.seed_item(WorkloadItemBuilder::new(1).practice(15, 1).build())
        .await;

    let rename = GroupRename {
        subject_id: 1,
        new_subject_id: None,
        new_name: Some("Yangi nom".to_string()),
        new_edu_plan_id: Some(2),
    };
    let affected = env
        .workload_api
        .rename_group(&rename)
        .await
        .expect("组级改名失败");
    assert_eq!(affected, 2, "学科1下两条记录都应被更新");

    let group = env
        .workload_api
        .get_group(1)
        .await
        .expect("查询分组失败")
        .expect("学科1应存在分组");
    for item in &group.items {
        assert_eq!(item.name.as_deref(), Some("Yangi nom"));
        assert_eq!(item.edu_plan_id, Some(2));
    }
}

#[tokio::test]
async fn test_rename_group_requires_changes_空改名() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let rename = GroupRename {
        subject_id: 1,
        new_subject_id: None,
        new_name: None,
        new_edu_plan_id: None,
    };
    let err = env
        .workload_api
        .rename_group(&rename)
        .await
        .expect_err("无变更字段的改名应被拒绝");
    assert!(matches!(err, ApiError::Validation { .. }));
}

#[tokio::test]
async fn test_rename_group_move_subject_冲突() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    // 两个学科各自有 讲课 -> 学生流1, 互不冲突
    let moved = env
        .seed_item(WorkloadItemBuilder::new(1).lecture(30, 1).build())
        .await;
    env.seed_item(WorkloadItemBuilder::new(2).lecture(24, 1).build())
        .await;

    // 把学科1整组并入学科2 会复制出重复的 (学科2, 讲课, 流1)
    let rename = GroupRename {
        subject_id: 1,
        new_subject_id: Some(2),
        new_name: None,
        new_edu_plan_id: None,
    };
    let err = env
        .workload_api
        .rename_group(&rename)
        .await
        .expect_err("并入后重复的分配应被拒绝");
    assert!(
        matches!(err, ApiError::Conflict(_)),
        "期望 Conflict, 实际: {:?}",
        err
    );

    // 改名失败必须整体回滚
    let fetched = env
        .workload_api
        .get_item(&moved.id)
        .await
        .expect("回查记录失败");
    assert_eq!(fetched.subject_id, 1, "冲突后原记录应保持原学科");
}

// ==========================================
// 组级删除测试
// ==========================================

#[tokio::test]
async fn test_delete_group_exhaustive_整组删除() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    env.seed_item(WorkloadItemBuilder::new(1).lecture(30, 1).build())
        .await;
    env.seed_item(WorkloadItemBuilder::new(1).practice(15, 1).build())
        .await;
    env.seed_item(WorkloadItemBuilder::new(1).practice(15, 2).build())
        .await;
    env.seed_item(WorkloadItemBuilder::new(2).lecture(10, 2).build())
        .await;

    let deleted = env
        .workload_api
        .delete_group(1, true)
        .await
        .expect("组级删除失败");
    assert_eq!(deleted, 3, "学科1下三条记录都应被删除");

    // 删除后该学科不应残留任何记录
    let group = env
        .workload_api
        .get_group(1)
        .await
        .expect("查询分组失败");
    assert!(group.is_none(), "整组删除后不应再有学科1的记录");

    // 其他学科不受影响
    let page = env
        .workload_api
        .list_items(&WorkloadFilter::default())
        .await
        .expect("查询记录失败");
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].subject_id, 2);
}

#[tokio::test]
async fn test_delete_group_requires_confirmation_需确认() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    env.seed_item(WorkloadItemBuilder::new(1).lecture(30, 1).build())
        .await;

    // 默认配置要求显式确认
    let err = env
        .workload_api
        .delete_group(1, false)
        .await
        .expect_err("未确认的整组删除应被拒绝");
    assert!(
        matches!(err, ApiError::NotConfirmed(_)),
        "期望 NotConfirmed, 实际: {:?}",
        err
    );
    assert_eq!(env.count_items(), 1, "未确认时不应删除任何记录");
}

#[tokio::test]
async fn test_delete_group_confirmation_disabled_配置关闭() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    env.seed_item(WorkloadItemBuilder::new(1).lecture(30, 1).build())
        .await;

    env.config_manager
        .set_config_value(config_keys::DELETE_REQUIRES_CONFIRMATION, "false")
        .expect("写入配置失败");

    let deleted = env
        .workload_api
        .delete_group(1, false)
        .await
        .expect("关闭确认后删除应成功");
    assert_eq!(deleted, 1);
    assert_eq!(env.count_items(), 0);
}

#[tokio::test]
async fn test_delete_item_未找到() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let err = env
        .workload_api
        .delete_item("missing-id")
        .await
        .expect_err("删除不存在的记录应报未找到");
    assert!(
        matches!(err, ApiError::NotFound(_)),
        "期望 NotFound, 实际: {:?}",
        err
    );
}

// ==========================================
// 参照数据测试
// ==========================================

#[tokio::test]
async fn test_reference_api_lists_参照数据() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let subjects = env
        .reference_api
        .list_subjects()
        .await
        .expect("查询学科失败");
    assert_eq!(subjects.len(), 3);
    assert_eq!(subjects[0].id, 1);
    assert_eq!(subjects[0].name, "Algoritmlar va Ma'lumotlar Tuzilmasi");
    assert_eq!(subjects[0].department_id, Some(1));

    let streams = env
        .reference_api
        .list_streams()
        .await
        .expect("查询学生流失败");
    assert_eq!(streams.len(), 2);

    let class_groups = env
        .reference_api
        .list_class_groups()
        .await
        .expect("查询班组失败");
    assert_eq!(class_groups.len(), 3);
    assert_eq!(class_groups[2].name, "AI-101");

    let edu_plans = env
        .reference_api
        .list_edu_plans()
        .await
        .expect("查询教学计划失败");
    assert_eq!(edu_plans.len(), 2);
    assert_eq!(edu_plans[0].name, "2023-2024 O'quv Rejasi");
}
