mod common;

use campus_attendance::model::role::Role;
use campus_attendance::service::attendance::{
    AttendanceEntry, record_attendance, student_summaries, subject_summary,
};
use campus_attendance::service::enrollment::{enroll_student, toggle_teacher_subject};
use chrono::NaiveDate;
use common::{insert_user, seed_catalogue, setup_pool};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

#[actix_web::test]
async fn two_of_three_present_is_sixty_six_point_sixty_seven() {
    let pool = setup_pool().await;
    let cat = seed_catalogue(&pool).await;

    let teacher = insert_user(&pool, "teach", Role::Teacher).await;
    toggle_teacher_subject(&pool, teacher, cat.subj_ml).await.unwrap();

    let student = insert_user(&pool, "ann", Role::Student).await;
    enroll_student(&pool, student, cat.course_aids).await.unwrap();

    for (d, status) in [(1, true), (2, true), (3, false)] {
        record_attendance(
            &pool,
            teacher,
            cat.subj_ml,
            day(d),
            &[AttendanceEntry {
                student_id: student,
                status,
            }],
        )
        .await
        .unwrap();
    }

    let summary = subject_summary(&pool, student, cat.subj_ml).await.unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.present, 2);
    assert!((summary.percentage - 66.67).abs() < 0.01);

    // newest first
    assert_eq!(summary.records[0].date, day(3));
    assert_eq!(summary.records[2].date, day(1));
}

#[actix_web::test]
async fn empty_history_yields_zero_percentage() {
    let pool = setup_pool().await;
    let cat = seed_catalogue(&pool).await;
    let student = insert_user(&pool, "ann", Role::Student).await;
    enroll_student(&pool, student, cat.course_aids).await.unwrap();

    let summary = subject_summary(&pool, student, cat.subj_ml).await.unwrap();
    assert_eq!(summary.total, 0);
    assert_eq!(summary.present, 0);
    assert_eq!(summary.percentage, 0.0);
    assert!(summary.records.is_empty());
}

#[actix_web::test]
async fn summaries_group_per_subject_with_consistent_counts() {
    let pool = setup_pool().await;
    let cat = seed_catalogue(&pool).await;

    let teacher = insert_user(&pool, "teach", Role::Teacher).await;
    toggle_teacher_subject(&pool, teacher, cat.subj_ml).await.unwrap();
    toggle_teacher_subject(&pool, teacher, cat.subj_dm).await.unwrap();

    let student = insert_user(&pool, "ann", Role::Student).await;
    enroll_student(&pool, student, cat.course_aids).await.unwrap();

    let mark = |status| {
        [AttendanceEntry {
            student_id: student,
            status,
        }]
    };

    record_attendance(&pool, teacher, cat.subj_ml, day(1), &mark(true)).await.unwrap();
    record_attendance(&pool, teacher, cat.subj_ml, day(2), &mark(false)).await.unwrap();
    record_attendance(&pool, teacher, cat.subj_dm, day(3), &mark(true)).await.unwrap();

    let summaries = student_summaries(&pool, student).await.unwrap();
    assert_eq!(summaries.len(), 2);

    // most recent mark first, so Data Mining leads
    assert_eq!(summaries[0].subject.code, "DM101");
    assert_eq!(summaries[0].total, 1);
    assert_eq!(summaries[0].present, 1);

    let ml = &summaries[1];
    assert_eq!(ml.subject.code, "ML101");
    assert_eq!(ml.total, 2);
    assert_eq!(ml.present, 1);
    assert_eq!(ml.records.len(), 2);
    assert_eq!(ml.records[0].date, day(2));

    for s in &summaries {
        assert!(s.present <= s.total);
    }
}

#[actix_web::test]
async fn overwritten_mark_keeps_totals_consistent() {
    let pool = setup_pool().await;
    let cat = seed_catalogue(&pool).await;

    let teacher = insert_user(&pool, "teach", Role::Teacher).await;
    toggle_teacher_subject(&pool, teacher, cat.subj_ml).await.unwrap();

    let student = insert_user(&pool, "ann", Role::Student).await;
    enroll_student(&pool, student, cat.course_aids).await.unwrap();

    let mark = |status| {
        [AttendanceEntry {
            student_id: student,
            status,
        }]
    };

    record_attendance(&pool, teacher, cat.subj_ml, day(1), &mark(false)).await.unwrap();
    record_attendance(&pool, teacher, cat.subj_ml, day(1), &mark(true)).await.unwrap();

    let summary = subject_summary(&pool, student, cat.subj_ml).await.unwrap();
    assert_eq!(summary.total, 1);
    assert_eq!(summary.present, 1);
    assert_eq!(summary.percentage, 100.0);
}
