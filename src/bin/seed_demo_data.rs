// ==========================================
// 教学工作量管理台 - 演示数据生成工具
// ==========================================
// 用法: cargo run --bin seed_demo_data [db_path]
// 说明: 备份并重建数据库, 写入参照数据与一套有代表性的工作量场景
// ==========================================

use chrono::Local;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::error::Error;
use std::fs;
use std::path::Path;
use uuid::Uuid;

use teaching_load_console::app::get_default_db_path;
use teaching_load_console::config::config_keys;
use teaching_load_console::db::{init_schema, open_sqlite_connection};
use teaching_load_console::{LoadType, TargetKind};

fn main() -> Result<(), Box<dyn Error>> {
    let db_path = std::env::args().nth(1).unwrap_or_else(get_default_db_path);

    backup_and_reset_db(&db_path)?;

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    seed_demo_scenario(&conn)?;

    print_quick_counts(&conn)?;

    Ok(())
}

fn backup_and_reset_db(db_path: &str) -> Result<(), Box<dyn Error>> {
    let path = Path::new(db_path);
    if !path.exists() {
        return Ok(());
    }

    let ts = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let backup_path = format!("{}.bak.{}", db_path, ts);
    fs::copy(path, &backup_path)?;
    fs::remove_file(path)?;

    eprintln!("Backed up {} -> {}", db_path, backup_path);
    Ok(())
}

fn seed_demo_scenario(conn: &Connection) -> Result<(), Box<dyn Error>> {
    let now_rfc3339 = Utc::now().to_rfc3339();

    let tx = conn.unchecked_transaction()?;

    // 控制台默认配置
    let config_entries: &[(&str, &str)] = &[
        (config_keys::DEFAULT_PAGE_SIZE, "20"),
        (config_keys::LOCALE, "zh-CN"),
        (config_keys::DELETE_REQUIRES_CONFIRMATION, "true"),
    ];
    for (key, value) in config_entries {
        tx.execute(
            "INSERT INTO config_kv (scope_id, key, value, updated_at) VALUES ('global', ?1, ?2, ?3)",
            params![key, value, now_rfc3339],
        )?;
    }

    // 学科
    let subjects: &[(i64, &str, Option<i64>)] = &[
        (1, "Algoritmlar va Ma'lumotlar Tuzilmasi", Some(1)),
        (2, "Veb Dasturlash", Some(1)),
        (3, "Mashinali O'qitish Asoslari", Some(2)),
    ];
    for (id, name, department_id) in subjects {
        tx.execute(
            "INSERT INTO subject (id, name, department_id) VALUES (?1, ?2, ?3)",
            params![id, name, department_id],
        )?;
    }

    // 学生流
    let streams: &[(i64, &str)] = &[(1, "SE 3-kurs oqimi"), (2, "AI 1-kurs oqimi")];
    for (id, name) in streams {
        tx.execute(
            "INSERT INTO stream (id, name) VALUES (?1, ?2)",
            params![id, name],
        )?;
    }

    // 班组
    let class_groups: &[(i64, &str)] = &[(1, "SE-301"), (2, "SE-302"), (3, "AI-101")];
    for (id, name) in class_groups {
        tx.execute(
            "INSERT INTO class_group (id, name) VALUES (?1, ?2)",
            params![id, name],
        )?;
    }

    // 教学计划
    let edu_plans: &[(i64, &str)] = &[
        (1, "2023-2024 O'quv Rejasi"),
        (2, "2024-2025 O'quv Rejasi"),
    ];
    for (id, name) in edu_plans {
        tx.execute(
            "INSERT INTO edu_plan (id, name) VALUES (?1, ?2)",
            params![id, name],
        )?;
    }

    // 工作量场景:
    // - 学科1: 讲课走学生流, 实践/实验按班组拆分
    // - 学科2: 同一学生流的第二门课, 仅讲课+实验
    // - 学科3: 另一教学计划下的讲课+研讨
    let items: &[(i64, Option<i64>, Option<&str>, LoadType, i64, TargetKind, i64)] = &[
        (1, Some(1), Some("Algoritmlar 3-semestr"), LoadType::Lecture, 30, TargetKind::Stream, 1),
        (1, Some(1), Some("Algoritmlar 3-semestr"), LoadType::Practice, 15, TargetKind::Group, 1),
        (1, Some(1), Some("Algoritmlar 3-semestr"), LoadType::Practice, 15, TargetKind::Group, 2),
        (1, Some(1), Some("Algoritmlar 3-semestr"), LoadType::Lab, 15, TargetKind::Group, 1),
        (1, Some(1), Some("Algoritmlar 3-semestr"), LoadType::Lab, 15, TargetKind::Group, 2),
        (2, Some(1), None, LoadType::Lecture, 24, TargetKind::Stream, 1),
        (2, Some(1), None, LoadType::Lab, 12, TargetKind::Group, 1),
        (2, Some(1), None, LoadType::Lab, 12, TargetKind::Group, 2),
        (3, Some(2), Some("ML kirish kursi"), LoadType::Lecture, 20, TargetKind::Stream, 2),
        (3, Some(2), Some("ML kirish kursi"), LoadType::Seminar, 10, TargetKind::Group, 3),
    ];

    {
        let mut stmt = tx.prepare(
            "INSERT INTO workload_item \
             (id, subject_id, edu_plan_id, name, load_type, hours, target_kind, target_id, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )?;
        for (subject_id, edu_plan_id, name, load_type, hours, target_kind, target_id) in items {
            stmt.execute(params![
                Uuid::new_v4().to_string(),
                subject_id,
                edu_plan_id,
                name,
                load_type.to_db_str(),
                hours,
                target_kind.to_db_str(),
                target_id,
                now_rfc3339,
                now_rfc3339,
            ])?;
        }
    }

    tx.commit()?;

    eprintln!("Seeded demo scenario into workload_item ({} rows)", items.len());
    Ok(())
}

fn print_quick_counts(conn: &Connection) -> Result<(), Box<dyn Error>> {
    let tables = [
        "subject",
        "stream",
        "class_group",
        "edu_plan",
        "workload_item",
        "config_kv",
    ];

    eprintln!("Row counts:");
    for t in tables {
        let sql = format!("SELECT COUNT(*) FROM {}", t);
        let c: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
        eprintln!("  {:<16} {}", t, c);
    }
    Ok(())
}
