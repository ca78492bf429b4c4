use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::db::types::UserRole;
use crate::repositories;
use crate::test_support;

#[tokio::test]
async fn teacher_builds_quiz_through_the_api() {
    let Some(ctx) = test_support::setup_test_context().await else { return };
    let db = ctx.state.db();

    let teacher =
        test_support::insert_user(db, "Tina", "tina@example.com", UserRole::Teacher).await;
    let course = test_support::insert_course(db, "Rust 101", &teacher.id).await;
    let token = test_support::bearer_token(&teacher.id, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/test/create",
            Some(&token),
            Some(json!({"title": "Week 1", "courseId": course.id})),
        ))
        .await
        .expect("create test");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = test_support::read_json(response).await;
    assert_eq!(body["message"], "Test created successfully");
    let test_id = body["testId"].as_str().expect("test id").to_string();

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/test/question",
            Some(&token),
            Some(json!({
                "testId": test_id,
                "questionText": "Which keyword moves a closure's captures?",
                "options": ["move", "ref", "mut", "box"],
                "correctAnswer": "move"
            })),
        ))
        .await
        .expect("add question");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = test_support::read_json(response).await;
    assert!(body["questionId"].is_string());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/test/course/{}", course.id),
            Some(&token),
            None,
        ))
        .await
        .expect("list tests");
    let body = test_support::read_json(response).await;
    assert_eq!(body["tests"], json!([{"id": test_id, "title": "Week 1"}]));
}

#[tokio::test]
async fn correct_answer_outside_options_is_not_persisted() {
    let Some(ctx) = test_support::setup_test_context().await else { return };
    let db = ctx.state.db();

    let teacher =
        test_support::insert_user(db, "Tina", "tina@example.com", UserRole::Teacher).await;
    let quiz = test_support::insert_quiz(db, "course-1", &teacher.id).await;
    let token = test_support::bearer_token(&teacher.id, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/test/question",
            Some(&token),
            Some(json!({
                "testId": quiz.id,
                "questionText": "2 + 2?",
                "options": ["3", "4", "5", "6"],
                "correctAnswer": "four"
            })),
        ))
        .await
        .expect("add question");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = test_support::read_json(response).await;
    assert_eq!(body["message"], "Correct answer must be one of the options");

    let stored = repositories::quiz_questions::count_for_quiz(db, &quiz.id).await.expect("count");
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn question_for_unknown_test_is_404() {
    let Some(ctx) = test_support::setup_test_context().await else { return };

    let teacher =
        test_support::insert_user(ctx.state.db(), "Tina", "tina@example.com", UserRole::Teacher)
            .await;
    let token = test_support::bearer_token(&teacher.id, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/test/question",
            Some(&token),
            Some(json!({
                "testId": "missing",
                "questionText": "?",
                "options": ["a"],
                "correctAnswer": "a"
            })),
        ))
        .await
        .expect("add question");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn quiz_view_hides_correct_answers() {
    let Some(ctx) = test_support::setup_test_context().await else { return };
    let db = ctx.state.db();

    let teacher =
        test_support::insert_user(db, "Tina", "tina@example.com", UserRole::Teacher).await;
    let student = test_support::insert_user(db, "Sam", "sam@example.com", UserRole::Student).await;
    let quiz = test_support::insert_quiz(db, "course-1", &teacher.id).await;
    test_support::insert_question(db, &quiz.id, &["A", "B", "C", "D"], "C").await;
    let token = test_support::bearer_token(&student.id, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/test/{}", quiz.id),
            Some(&token),
            None,
        ))
        .await
        .expect("get test");

    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert_eq!(body["totalQuestions"], 1);
    assert_eq!(body["test"]["courseId"], "course-1");
    assert!(body["questions"][0].get("correctAnswer").is_none());
    assert_eq!(body["questions"][0]["options"], json!(["A", "B", "C", "D"]));
}

#[tokio::test]
async fn partial_submission_is_scored_against_all_questions() {
    let Some(ctx) = test_support::setup_test_context().await else { return };
    let db = ctx.state.db();

    let teacher =
        test_support::insert_user(db, "Tina", "tina@example.com", UserRole::Teacher).await;
    let student = test_support::insert_user(db, "Sam", "sam@example.com", UserRole::Student).await;
    let quiz = test_support::insert_quiz(db, "course-1", &teacher.id).await;
    let mut questions = Vec::new();
    for _ in 0..4 {
        questions.push(test_support::insert_question(db, &quiz.id, &["A", "B"], "A").await);
    }
    let token = test_support::bearer_token(&student.id, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/test/submit",
            Some(&token),
            Some(json!({
                "testId": quiz.id,
                "answers": [
                    {"questionId": questions[0].id, "selectedAnswer": "A"},
                    {"questionId": questions[1].id, "selectedAnswer": "A"},
                    {"questionId": "not-a-question", "selectedAnswer": "A"}
                ]
            })),
        ))
        .await
        .expect("submit");

    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert_eq!(body["message"], "Test submitted successfully");
    assert_eq!(body["testResult"]["score"], 50);
    assert_eq!(body["testResult"]["correctAnswers"], 2);
    assert_eq!(body["testResult"]["totalQuestions"], 4);
    assert_eq!(body["answers"][2]["isCorrect"], false);
}

#[tokio::test]
async fn repeated_question_in_submission_counts_once() {
    let Some(ctx) = test_support::setup_test_context().await else { return };
    let db = ctx.state.db();

    let teacher =
        test_support::insert_user(db, "Tina", "tina@example.com", UserRole::Teacher).await;
    let student = test_support::insert_user(db, "Sam", "sam@example.com", UserRole::Student).await;
    let quiz = test_support::insert_quiz(db, "course-1", &teacher.id).await;
    let question = test_support::insert_question(db, &quiz.id, &["A", "B"], "A").await;
    let token = test_support::bearer_token(&student.id, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/test/submit",
            Some(&token),
            Some(json!({
                "testId": quiz.id,
                "answers": [
                    {"questionId": question.id, "selectedAnswer": "A"},
                    {"questionId": question.id, "selectedAnswer": "A"}
                ]
            })),
        ))
        .await
        .expect("submit");

    assert_eq!(response.status(), StatusCode::OK);
    let body = test_support::read_json(response).await;
    assert_eq!(body["testResult"]["score"], 100);
    assert_eq!(body["testResult"]["correctAnswers"], 1);
    assert_eq!(body["testResult"]["totalQuestions"], 1);
    assert_eq!(body["answers"][0]["isCorrect"], true);
    assert_eq!(body["answers"][1]["isCorrect"], false);

    let stored = repositories::quiz_results::scores_for_student(db, &student.id)
        .await
        .expect("stored scores");
    assert_eq!(stored, vec![100]);
}

#[tokio::test]
async fn submission_requires_answers() {
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
            "/api/test/submit",
            Some(&token),
            Some(json!({"testId": "t1", "answers": []})),
        ))
        .await
        .expect("submit");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = test_support::read_json(response).await;
    assert_eq!(body["message"], "Answers are required");
}

#[tokio::test]
async fn results_recount_from_stored_answers() {
    let Some(ctx) = test_support::setup_test_context().await else { return };
    let db = ctx.state.db();

    let teacher =
        test_support::insert_user(db, "Tina", "tina@example.com", UserRole::Teacher).await;
    let student = test_support::insert_user(db, "Sam", "sam@example.com", UserRole::Student).await;
    let quiz = test_support::insert_quiz(db, "course-1", &teacher.id).await;
    let question = test_support::insert_question(db, &quiz.id, &["A", "B"], "A").await;
    let teacher_token = test_support::bearer_token(&teacher.id, ctx.state.settings());
    let student_token = test_support::bearer_token(&student.id, ctx.state.settings());

    let results_request = || {
        test_support::json_request(
            Method::GET,
            &format!("/api/test/{}/results", quiz.id),
            Some(&teacher_token),
            None,
        )
    };

    let response = ctx.app.clone().oneshot(results_request()).await.expect("empty results");
    let body = test_support::read_json(response).await;
    assert_eq!(body, json!({"message": "No submissions yet", "results": []}));

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/test/submit",
            Some(&student_token),
            Some(json!({
                "testId": quiz.id,
                "answers": [{"questionId": question.id, "selectedAnswer": "A"}]
            })),
        ))
        .await
        .expect("submit");
    assert_eq!(response.status(), StatusCode::OK);

    // A question added after the attempt does not change its stored totals.
    test_support::insert_question(db, &quiz.id, &["A", "B"], "B").await;

    let response = ctx.app.clone().oneshot(results_request()).await.expect("results");
    let body = test_support::read_json(response).await;
    assert_eq!(body["message"], "Quiz results fetched successfully");
    assert_eq!(body["results"][0]["studentName"], "Sam");
    assert_eq!(body["results"][0]["score"], 100);
    assert_eq!(body["results"][0]["correctAnswers"], 1);
    assert_eq!(body["results"][0]["totalQuestions"], 1);
}

#[tokio::test]
async fn results_for_unknown_test_are_404() {
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
            "/api/test/missing/results",
            Some(&token),
            None,
        ))
        .await
        .expect("results");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = test_support::read_json(response).await;
    assert_eq!(body["message"], "Test not found");
}
