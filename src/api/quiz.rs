use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::extract::ApiJson;
use crate::api::guards::{AuthContext, TeacherAuth};
use crate::api::validation::validate;
use crate::core::metrics;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::repositories;
use crate::schemas::quiz::{
    AttemptSummary, QuestionCreate, QuestionCreatedResponse, QuizCreate, QuizCreatedResponse,
    QuizDetailResponse, QuizListResponse, QuizResultEntry, QuizResultsResponse, QuizSubmit,
    QuizSubmittedResponse, QuizSummary,
};
use crate::services::quiz_grading;

const TEST_NOT_FOUND: &str = "Test not found";

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_quiz))
        .route("/question", post(add_question))
        .route("/submit", post(submit_quiz))
        .route("/course/:course_id", get(list_course_quizzes))
        .route("/:test_id", get(get_quiz))
        .route("/:test_id/results", get(quiz_results))
}

async fn create_quiz(
    TeacherAuth(auth): TeacherAuth,
    state: State<AppState>,
    ApiJson(payload): ApiJson<QuizCreate>,
) -> Result<(StatusCode, Json<QuizCreatedResponse>), ApiError> {
    validate(&payload)?;

    let quiz = repositories::quizzes::create(
        state.db(),
        repositories::quizzes::CreateQuiz {
            id: &Uuid::new_v4().to_string(),
            title: payload.title.as_deref().unwrap_or_default(),
            course_id: payload.course_id.as_deref().unwrap_or_default(),
            created_by: &auth.user_id,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create test"))?;

    tracing::info!(
        teacher_id = %auth.user_id,
        course_id = %quiz.course_id,
        test_id = %quiz.id,
        action = "test_create",
        "Test created"
    );

    Ok((
        StatusCode::CREATED,
        Json(QuizCreatedResponse { message: "Test created successfully", test_id: quiz.id }),
    ))
}

async fn add_question(
    TeacherAuth(auth): TeacherAuth,
    state: State<AppState>,
    ApiJson(payload): ApiJson<QuestionCreate>,
) -> Result<(StatusCode, Json<QuestionCreatedResponse>), ApiError> {
    validate(&payload)?;
    if !payload.correct_answer_in_options() {
        return Err(ApiError::bad_request("Correct answer must be one of the options"));
    }

    let test_id = payload.test_id.as_deref().unwrap_or_default();
    repositories::quizzes::find_by_id(state.db(), test_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch test"))?
        .ok_or_else(|| ApiError::not_found(TEST_NOT_FOUND))?;

    let question = repositories::quiz_questions::create(
        state.db(),
        repositories::quiz_questions::CreateQuestion {
            id: &Uuid::new_v4().to_string(),
            quiz_id: test_id,
            question_text: payload.question_text.as_deref().unwrap_or_default(),
            options: payload.options.as_deref().unwrap_or_default(),
            correct_answer: payload.correct_answer.as_deref().unwrap_or_default(),
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to add question"))?;

    tracing::info!(
        teacher_id = %auth.user_id,
        test_id = %test_id,
        question_id = %question.id,
        action = "question_create",
        "Question added"
    );

    Ok((
        StatusCode::CREATED,
        Json(QuestionCreatedResponse {
            message: "Question added successfully",
            question_id: question.id,
        }),
    ))
}

async fn list_course_quizzes(
    Path(course_id): Path<String>,
    _auth: AuthContext,
    state: State<AppState>,
) -> Result<Json<QuizListResponse>, ApiError> {
    let quizzes = repositories::quizzes::list_for_course(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list tests"))?;

    Ok(Json(QuizListResponse {
        tests: quizzes
            .into_iter()
            .map(|quiz| QuizSummary { id: quiz.id, title: quiz.title })
            .collect(),
    }))
}

async fn get_quiz(
    Path(test_id): Path<String>,
    _auth: AuthContext,
    state: State<AppState>,
) -> Result<Json<QuizDetailResponse>, ApiError> {
    let quiz = repositories::quizzes::find_by_id(state.db(), &test_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch test"))?
        .ok_or_else(|| ApiError::not_found(TEST_NOT_FOUND))?;

    let questions = repositories::quiz_questions::list_for_quiz(state.db(), &quiz.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch questions"))?;

    Ok(Json(QuizDetailResponse::new(quiz, questions)))
}

/// Scored against every question of the quiz, not just the answered ones.
async fn submit_quiz(
    auth: AuthContext,
    state: State<AppState>,
    ApiJson(payload): ApiJson<QuizSubmit>,
) -> Result<Json<QuizSubmittedResponse>, ApiError> {
    validate(&payload)?;

    let test_id = payload.test_id.clone().unwrap_or_default();
    let quiz = repositories::quizzes::find_by_id(state.db(), &test_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch test"))?
        .ok_or_else(|| ApiError::not_found(TEST_NOT_FOUND))?;

    let questions = repositories::quiz_questions::list_for_quiz(state.db(), &quiz.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch questions"))?;

    let grade = quiz_grading::grade(&questions, payload.into_answer_inputs());

    let result = repositories::quiz_results::create(
        state.db(),
        repositories::quiz_results::CreateQuizResult {
            id: &Uuid::new_v4().to_string(),
            quiz_id: &quiz.id,
            student_id: &auth.user_id,
            score: grade.score,
            answers: &grade.answers,
            submitted_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to save test result"))?;

    metrics::record(metrics::QUIZ_SUBMISSIONS);
    tracing::info!(
        user_id = %auth.user_id,
        test_id = %quiz.id,
        result_id = %result.id,
        score = grade.score,
        action = "test_submit",
        "Test submitted"
    );

    Ok(Json(QuizSubmittedResponse {
        message: "Test submitted successfully",
        test_result: AttemptSummary {
            id: result.id,
            score: grade.score,
            correct_answers: grade.correct_answers,
            total_questions: grade.total_questions,
        },
        answers: grade.answers,
    }))
}

async fn quiz_results(
    Path(test_id): Path<String>,
    TeacherAuth(_auth): TeacherAuth,
    state: State<AppState>,
) -> Result<Json<QuizResultsResponse>, ApiError> {
    repositories::quizzes::find_by_id(state.db(), &test_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch test"))?
        .ok_or_else(|| ApiError::not_found(TEST_NOT_FOUND))?;

    let rows = repositories::quiz_results::list_for_quiz_with_student(state.db(), &test_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch test results"))?;

    let message =
        if rows.is_empty() { "No submissions yet" } else { "Quiz results fetched successfully" };

    Ok(Json(QuizResultsResponse {
        message,
        results: rows.into_iter().map(QuizResultEntry::from_row).collect(),
    }))
}

#[cfg(test)]
mod tests;
