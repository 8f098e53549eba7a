#![allow(dead_code)]

use campus_attendance::db::MIGRATOR;
use campus_attendance::model::role::Role;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

/// In-memory database with the schema applied. A single connection so
/// every query sees the same memory instance.
pub async fn setup_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    MIGRATOR.run(&pool).await.unwrap();

    pool
}

pub struct Catalogue {
    pub course_aids: i64,
    pub course_aiml: i64,
    /// Machine Learning, belongs to AIDS
    pub subj_ml: i64,
    /// Data Mining, belongs to AIDS
    pub subj_dm: i64,
    /// Deep Learning, belongs to AIML
    pub subj_dl: i64,
}

pub async fn seed_catalogue(pool: &SqlitePool) -> Catalogue {
    let course_aids = insert_course(pool, "AI and Data Science", "AIDS", "7").await;
    let course_aiml = insert_course(pool, "AI and Machine Learning", "AIML", "7").await;

    Catalogue {
        subj_ml: insert_subject(pool, "Machine Learning", "ML101", course_aids).await,
        subj_dm: insert_subject(pool, "Data Mining", "DM101", course_aids).await,
        subj_dl: insert_subject(pool, "Deep Learning", "DL101", course_aiml).await,
        course_aids,
        course_aiml,
    }
}

pub async fn insert_course(pool: &SqlitePool, name: &str, code: &str, semester: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO courses (name, code, semester) VALUES (?, ?, ?) RETURNING id")
        .bind(name)
        .bind(code)
        .bind(semester)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn insert_subject(pool: &SqlitePool, name: &str, code: &str, course_id: i64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO subjects (name, code, course_id) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(name)
    .bind(code)
    .bind(course_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn insert_user(pool: &SqlitePool, username: &str, role: Role) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO users (username, password, role_id, name, email)
        VALUES (?, 'x', ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(username)
    .bind(role.id())
    .bind(format!("{username} name"))
    .bind(format!("{username}@campus.test"))
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn attendance_row_count(pool: &SqlitePool, student_id: i64, subject_id: i64) -> i64 {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM attendance WHERE student_id = ? AND subject_id = ?",
    )
    .bind(student_id)
    .bind(subject_id)
    .fetch_one(pool)
    .await
    .unwrap()
}
