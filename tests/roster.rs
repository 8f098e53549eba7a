mod common;

use campus_attendance::model::role::Role;
use campus_attendance::service::enrollment::{
    ensure_teacher, enroll_student, toggle_teacher_subject,
};
use campus_attendance::service::error::ServiceError;
use campus_attendance::service::roster::{
    enrolled_subjects, list_courses, list_subjects, roster_with_marks, student_profile,
    teacher_classes, teacher_students,
};
use chrono::NaiveDate;
use common::{insert_user, seed_catalogue, setup_pool};

#[actix_web::test]
async fn classes_cover_only_taught_courses_and_subjects() {
    let pool = setup_pool().await;
    let cat = seed_catalogue(&pool).await;

    let teacher = insert_user(&pool, "teach", Role::Teacher).await;
    toggle_teacher_subject(&pool, teacher, cat.subj_ml).await.unwrap();

    let student = insert_user(&pool, "ann", Role::Student).await;
    enroll_student(&pool, student, cat.course_aids).await.unwrap();

    let classes = teacher_classes(&pool, teacher).await.unwrap();
    assert_eq!(classes.len(), 1);

    let class = &classes[0];
    assert_eq!(class.id, cat.course_aids);
    // Data Mining is in the same course but not taught by this teacher
    assert_eq!(class.subjects.len(), 1);
    assert_eq!(class.subjects[0].code, "ML101");
    assert_eq!(class.students.len(), 1);
    assert_eq!(class.students[0].id, student);
}

#[actix_web::test]
async fn students_are_scoped_to_taught_courses() {
    let pool = setup_pool().await;
    let cat = seed_catalogue(&pool).await;

    let teacher = insert_user(&pool, "teach", Role::Teacher).await;
    toggle_teacher_subject(&pool, teacher, cat.subj_ml).await.unwrap();

    let in_course = insert_user(&pool, "ann", Role::Student).await;
    enroll_student(&pool, in_course, cat.course_aids).await.unwrap();

    let elsewhere = insert_user(&pool, "ben", Role::Student).await;
    enroll_student(&pool, elsewhere, cat.course_aiml).await.unwrap();

    let students = teacher_students(&pool, teacher).await.unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].id, in_course);
    assert_eq!(students[0].course.code, "AIDS");
}

#[actix_web::test]
async fn course_catalogue_flags_the_current_course() {
    let pool = setup_pool().await;
    let cat = seed_catalogue(&pool).await;

    let student = insert_user(&pool, "ann", Role::Student).await;
    enroll_student(&pool, student, cat.course_aiml).await.unwrap();

    let courses = list_courses(&pool, student).await.unwrap();
    assert_eq!(courses.len(), 2);

    let flagged = |id: i64| courses.iter().find(|c| c.id == id).unwrap().enrolled;
    assert!(!flagged(cat.course_aids));
    assert!(flagged(cat.course_aiml));

    let aids = courses.iter().find(|c| c.id == cat.course_aids).unwrap();
    assert_eq!(aids.subjects.len(), 2);
}

#[actix_web::test]
async fn subject_catalogue_flags_enrollment() {
    let pool = setup_pool().await;
    let cat = seed_catalogue(&pool).await;

    let teacher = insert_user(&pool, "teach", Role::Teacher).await;
    ensure_teacher(&pool, teacher).await.unwrap();
    toggle_teacher_subject(&pool, teacher, cat.subj_dl).await.unwrap();

    let subjects = list_subjects(&pool, teacher).await.unwrap();
    assert_eq!(subjects.len(), 3);

    let dl = subjects.iter().find(|s| s.id == cat.subj_dl).unwrap();
    assert!(dl.enrolled);
    assert_eq!(dl.course.code, "AIML");
    assert!(subjects.iter().filter(|s| s.enrolled).count() == 1);

    let mine = enrolled_subjects(&pool, teacher).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, cat.subj_dl);
}

#[actix_web::test]
async fn roster_read_requires_subject_enrollment() {
    let pool = setup_pool().await;
    let cat = seed_catalogue(&pool).await;

    let teacher = insert_user(&pool, "teach", Role::Teacher).await;
    ensure_teacher(&pool, teacher).await.unwrap();

    let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let err = roster_with_marks(&pool, teacher, cat.subj_ml, date)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));
}

#[actix_web::test]
async fn profile_appears_after_first_enrollment() {
    let pool = setup_pool().await;
    let cat = seed_catalogue(&pool).await;
    let student = insert_user(&pool, "ann", Role::Student).await;

    let err = student_profile(&pool, student).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    enroll_student(&pool, student, cat.course_aids).await.unwrap();

    let profile = student_profile(&pool, student).await.unwrap();
    assert_eq!(profile.id, student);
    assert_eq!(profile.course.code, "AIDS");
    assert!(profile.enrollment.starts_with("ST"));
}
