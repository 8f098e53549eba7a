mod common;

use campus_attendance::model::role::Role;
use campus_attendance::service::enrollment::{enroll_student, toggle_teacher_subject};
use campus_attendance::service::error::ServiceError;
use common::{insert_user, seed_catalogue, setup_pool};

#[actix_web::test]
async fn first_enrollment_creates_student_row() {
    let pool = setup_pool().await;
    let cat = seed_catalogue(&pool).await;
    let user_id = insert_user(&pool, "alice", Role::Student).await;

    let outcome = enroll_student(&pool, user_id, cat.course_aids).await.unwrap();
    assert!(outcome.enrolled);
    assert_eq!(outcome.course.id, cat.course_aids);

    let (course_id, enrollment): (i64, String) =
        sqlx::query_as("SELECT course_id, enrollment FROM students WHERE id = ?")
            .bind(user_id)
            .fetch_one(&pool)
            .await
            .unwrap();

    assert_eq!(course_id, cat.course_aids);
    assert!(enrollment.starts_with("ST"));
}

#[actix_web::test]
async fn re_enrolling_current_course_is_rejected() {
    let pool = setup_pool().await;
    let cat = seed_catalogue(&pool).await;
    let user_id = insert_user(&pool, "alice", Role::Student).await;

    enroll_student(&pool, user_id, cat.course_aids).await.unwrap();

    let err = enroll_student(&pool, user_id, cat.course_aids)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[actix_web::test]
async fn switching_course_rebinds_and_leaves_old_roster() {
    let pool = setup_pool().await;
    let cat = seed_catalogue(&pool).await;
    let user_id = insert_user(&pool, "alice", Role::Student).await;

    enroll_student(&pool, user_id, cat.course_aids).await.unwrap();
    let outcome = enroll_student(&pool, user_id, cat.course_aiml).await.unwrap();
    assert_eq!(outcome.course.id, cat.course_aiml);

    let old_roster: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE course_id = ?")
            .bind(cat.course_aids)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(old_roster, 0);

    let current: i64 = sqlx::query_scalar("SELECT course_id FROM students WHERE id = ?")
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(current, cat.course_aiml);
}

#[actix_web::test]
async fn enrolling_into_unknown_course_is_not_found() {
    let pool = setup_pool().await;
    seed_catalogue(&pool).await;
    let user_id = insert_user(&pool, "alice", Role::Student).await;

    let err = enroll_student(&pool, user_id, 9999).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[actix_web::test]
async fn subject_toggle_twice_restores_original_state() {
    let pool = setup_pool().await;
    let cat = seed_catalogue(&pool).await;
    let user_id = insert_user(&pool, "bob", Role::Teacher).await;

    assert!(toggle_teacher_subject(&pool, user_id, cat.subj_ml).await.unwrap());
    assert!(!toggle_teacher_subject(&pool, user_id, cat.subj_ml).await.unwrap());

    let joins: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM teacher_subjects WHERE teacher_id = ?")
            .bind(user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(joins, 0);
}

#[actix_web::test]
async fn subject_toggle_creates_teacher_row_lazily() {
    let pool = setup_pool().await;
    let cat = seed_catalogue(&pool).await;
    let user_id = insert_user(&pool, "bob", Role::Teacher).await;

    toggle_teacher_subject(&pool, user_id, cat.subj_ml).await.unwrap();

    let (name, email): (String, String) =
        sqlx::query_as("SELECT name, email FROM teachers WHERE id = ?")
            .bind(user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(name, "bob name");
    assert_eq!(email, "bob@campus.test");
}

#[actix_web::test]
async fn toggling_unknown_subject_is_not_found() {
    let pool = setup_pool().await;
    seed_catalogue(&pool).await;
    let user_id = insert_user(&pool, "bob", Role::Teacher).await;

    let err = toggle_teacher_subject(&pool, user_id, 9999).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}
