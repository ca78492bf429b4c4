use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::db::types::UserRole;
use crate::repositories;
use crate::test_support;

#[tokio::test]
async fn student_dashboard_counts_enrollments_quizzes_and_pending_work() {
    let Some(ctx) = test_support::setup_test_context().await else { return };
    let db = ctx.state.db();

    let teacher =
        test_support::insert_user(db, "Tina", "tina@example.com", UserRole::Teacher).await;
    let student = test_support::insert_user(db, "Sam", "sam@example.com", UserRole::Student).await;
    let course = test_support::insert_course(db, "Rust 101", &teacher.id).await;
    test_support::enroll(db, &student.id, &course.id).await;

    let graded = test_support::insert_assignment(db, &course.id, &teacher.id).await;
    let pending = test_support::insert_assignment(db, &course.id, &teacher.id).await;
    let graded_submission = test_support::insert_submission(db, &graded.id, &student.id).await;
    test_support::insert_submission(db, &pending.id, &student.id).await;
    repositories::assignment_submissions::grade(
        db,
        &graded_submission.id,
        repositories::assignment_submissions::GradeSubmission {
            marks: 8.0,
            feedback: None,
            graded_at: crate::core::time::primitive_now_utc(),
        },
    )
    .await
    .expect("grade");

    let quiz = test_support::insert_quiz(db, &course.id, &teacher.id).await;
    let question = test_support::insert_question(db, &quiz.id, &["A", "B"], "A").await;
    let token = test_support::bearer_token(&student.id, ctx.state.settings());
    for answer in ["A", "B"] {
        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/test/submit",
                Some(&token),
                Some(json!({
                    "testId": quiz.id,
                    "answers": [{"questionId": question.id, "selectedAnswer": answer}]
                })),
            ))
            .await
            .expect("submit quiz");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/dashboard/student",
            Some(&token),
            None,
        ))
        .await
        .expect("dashboard");

    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert_eq!(body["message"], "Student dashboard retrieved successfully");
    assert_eq!(body["studentId"], student.id);
    assert_eq!(body["totalEnrolledCourses"], 1);
    assert_eq!(body["completedCourses"], 0);
    assert_eq!(body["averageQuizScore"], 50);
    assert_eq!(body["pendingAssignments"], 1);
}

#[tokio::test]
async fn teacher_dashboard_counts_unique_students() {
    let Some(ctx) = test_support::setup_test_context().await else { return };
    let db = ctx.state.db();

    let teacher =
        test_support::insert_user(db, "Tina", "tina@example.com", UserRole::Teacher).await;
    let first = test_support::insert_user(db, "Sam", "sam@example.com", UserRole::Student).await;
    let second =
        test_support::insert_user(db, "Olive", "olive@example.com", UserRole::Student).await;
    let rust = test_support::insert_course(db, "Rust 101", &teacher.id).await;
    let go = test_support::insert_course(db, "Go 101", &teacher.id).await;
    test_support::enroll(db, &first.id, &rust.id).await;
    test_support::enroll(db, &first.id, &go.id).await;
    test_support::enroll(db, &second.id, &go.id).await;
    test_support::insert_quiz(db, &rust.id, &teacher.id).await;
    let assignment = test_support::insert_assignment(db, &go.id, &teacher.id).await;
    test_support::insert_submission(db, &assignment.id, &second.id).await;

    let token = test_support::bearer_token(&teacher.id, ctx.state.settings());
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/dashboard/teacher",
            Some(&token),
            None,
        ))
        .await
        .expect("dashboard");

    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert_eq!(body["totalCoursesCreated"], 2);
    assert_eq!(body["totalStudentsEnrolled"], 2);
    assert_eq!(body["pendingSubmissions"], 1);
    assert_eq!(body["totalQuizzesCreated"], 1);
}

#[tokio::test]
async fn dashboards_are_role_matched() {
    let Some(ctx) = test_support::setup_test_context().await else { return };

    let teacher =
        test_support::insert_user(ctx.state.db(), "Tina", "tina@example.com", UserRole::Teacher)
            .await;
    let token = test_support::bearer_token(&teacher.id, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/dashboard/student",
            Some(&token),
            None,
        ))
        .await
        .expect("dashboard");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
