use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::core::time::primitive_now_utc;
use crate::db::types::UserRole;
use crate::repositories;
use crate::test_support;

#[tokio::test]
async fn summary_without_quiz_attempts_reports_null_average() {
    let Some(ctx) = test_support::setup_test_context().await else { return };
    let db = ctx.state.db();

    let teacher =
        test_support::insert_user(db, "Tina", "tina@example.com", UserRole::Teacher).await;
    let student = test_support::insert_user(db, "Sam", "sam@example.com", UserRole::Student).await;
    let course = test_support::insert_course(db, "Rust 101", &teacher.id).await;
    let first = test_support::insert_lecture(db, &course.id, "Intro", 1).await;
    test_support::insert_lecture(db, &course.id, "Traits", 2).await;
    test_support::insert_lecture(db, &course.id, "Async", 3).await;
    test_support::watch(db, &student.id, &first.id, 0.0).await;

    let token = test_support::bearer_token(&student.id, ctx.state.settings());
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/progress/summary/{}", course.id),
            Some(&token),
            None,
        ))
        .await
        .expect("summary");

    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert_eq!(body["lectures"], json!({"total": 3, "watched": 1}));
    assert_eq!(body["quizzes"], json!({"averageScore": null, "attempted": 0}));
    assert_eq!(body["assignments"], json!({"submitted": 0, "graded": 0}));
    assert_eq!(body["completionPercent"], 33);
}

#[tokio::test]
async fn summary_combines_quizzes_and_assignments_but_completion_is_lecture_only() {
    let Some(ctx) = test_support::setup_test_context().await else { return };
    let db = ctx.state.db();

    let teacher =
        test_support::insert_user(db, "Tina", "tina@example.com", UserRole::Teacher).await;
    let student = test_support::insert_user(db, "Sam", "sam@example.com", UserRole::Student).await;
    let course = test_support::insert_course(db, "Rust 101", &teacher.id).await;
    test_support::insert_lecture(db, &course.id, "Intro", 1).await;

    let quiz = test_support::insert_quiz(db, &course.id, &teacher.id).await;
    let question = test_support::insert_question(db, &quiz.id, &["A", "B"], "A").await;
    let token = test_support::bearer_token(&student.id, ctx.state.settings());

    for selected in ["A", "B"] {
        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/test/submit",
                Some(&token),
                Some(json!({
                    "testId": quiz.id,
                    "answers": [{"questionId": question.id, "selectedAnswer": selected}]
                })),
            ))
            .await
            .expect("submit quiz");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let graded_assignment = test_support::insert_assignment(db, &course.id, &teacher.id).await;
    let open_assignment = test_support::insert_assignment(db, &course.id, &teacher.id).await;
    let graded = test_support::insert_submission(db, &graded_assignment.id, &student.id).await;
    test_support::insert_submission(db, &open_assignment.id, &student.id).await;
    repositories::assignment_submissions::grade(
        db,
        &graded.id,
        repositories::assignment_submissions::GradeSubmission {
            marks: 0.0,
            feedback: None,
            graded_at: primitive_now_utc(),
        },
    )
    .await
    .expect("grade");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/progress/summary/{}", course.id),
            Some(&token),
            None,
        ))
        .await
        .expect("summary");

    let body = test_support::read_json(response).await;
    assert_eq!(body["quizzes"], json!({"averageScore": 50, "attempted": 2}));
    assert_eq!(body["assignments"], json!({"submitted": 2, "graded": 1}));
    assert_eq!(body["completionPercent"], 0);
}

#[tokio::test]
async fn repeated_completion_counts_once() {
    let Some(ctx) = test_support::setup_test_context().await else { return };
    let db = ctx.state.db();

    let teacher =
        test_support::insert_user(db, "Tina", "tina@example.com", UserRole::Teacher).await;
    let student = test_support::insert_user(db, "Sam", "sam@example.com", UserRole::Student).await;
    let course = test_support::insert_course(db, "Rust 101", &teacher.id).await;
    let lecture = test_support::insert_lecture(db, &course.id, "Intro", 1).await;
    test_support::insert_lecture(db, &course.id, "Traits", 2).await;
    let token = test_support::bearer_token(&student.id, ctx.state.settings());

    for _ in 0..2 {
        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/progress/complete",
                Some(&token),
                Some(json!({"courseId": course.id, "lectureId": lecture.id})),
            ))
            .await
            .expect("mark complete");
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = test_support::read_json(response).await;
        assert_eq!(body["progress"]["completed"], true);
    }

    let rows = repositories::lecture_progress::count_rows_for_student(db, &student.id)
        .await
        .expect("count rows");
    assert_eq!(rows, 2);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/progress/course/{}", course.id),
            Some(&token),
            None,
        ))
        .await
        .expect("course progress");

    let body = test_support::read_json(response).await;
    assert_eq!(body["totalLectures"], 2);
    assert_eq!(body["completedLectures"], 1);
    assert_eq!(body["progressPercentage"], 50);
}

#[tokio::test]
async fn mark_complete_requires_both_ids() {
    let Some(ctx) = test_support::setup_test_context().await else { return };

    let student =
        test_support::insert_user(ctx.state.db(), "Sam", "sam@example.com", UserRole::Student)
            .await;
    let token = test_support::bearer_token(&student.id, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/progress/complete",
            Some(&token),
            Some(json!({"courseId": "c1"})),
        ))
        .await
        .expect("mark complete");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = test_support::read_json(response).await;
    assert_eq!(body["message"], "Please provide courseId and lectureId");
}
