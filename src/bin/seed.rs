//! Loads the course and subject catalogue into the database. Safe to
//! rerun: courses already present (by code) are skipped.

use anyhow::Context;
use campus_attendance::db::init_db;
use dotenvy::dotenv;
use std::env;

const CATALOGUE: &[(&str, &str, &str, &[(&str, &str)])] = &[
    (
        "Artificial Intelligence and Data Science",
        "AIDS",
        "7",
        &[
            ("Machine Learning", "ML101"),
            ("Data Mining", "DM101"),
            ("Big Data Analytics", "BDA101"),
        ],
    ),
    (
        "Artificial Intelligence and Machine Learning",
        "AIML",
        "7",
        &[
            ("Deep Learning", "DL101"),
            ("Natural Language Processing", "NLP101"),
            ("Computer Vision", "CV101"),
        ],
    ),
    (
        "Industrial Internet of Things",
        "IIOT",
        "7",
        &[
            ("IoT Architecture", "IOT101"),
            ("Sensor Networks", "SN101"),
            ("Edge Computing", "EC101"),
        ],
    ),
    (
        "Automation and Robotics",
        "AR",
        "7",
        &[
            ("Robotics Engineering", "RE101"),
            ("Control Systems", "CS101"),
            ("Industrial Automation", "IA101"),
        ],
    ),
];

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = init_db(&database_url).await;

    for (name, code, semester, subjects) in CATALOGUE {
        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM courses WHERE code = ?")
            .bind(code)
            .fetch_optional(&pool)
            .await?;

        if existing.is_some() {
            println!("course {code} already present, skipping");
            continue;
        }

        let course_id: i64 = sqlx::query_scalar(
            "INSERT INTO courses (name, code, semester) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(name)
        .bind(code)
        .bind(semester)
        .fetch_one(&pool)
        .await?;

        for (subject_name, subject_code) in *subjects {
            sqlx::query("INSERT INTO subjects (name, code, course_id) VALUES (?, ?, ?)")
                .bind(subject_name)
                .bind(subject_code)
                .bind(course_id)
                .execute(&pool)
                .await?;
        }

        println!("seeded course {code} with {} subjects", subjects.len());
    }

    Ok(())
}
