use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::extract::ApiJson;
use crate::api::guards::StudentAuth;
use crate::api::validation::validate;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::repositories;
use crate::schemas::progress::{
    CourseProgressResponse, MarkComplete, MarkCompleteResponse, ProgressRecord,
    ProgressSummaryResponse,
};
use crate::services::{completion, progress_summary};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/complete", post(mark_complete))
        .route("/course/:course_id", get(course_progress))
        .route("/summary/:course_id", get(summary))
}

/// Every call appends a row; repeated completions are collapsed when counted.
async fn mark_complete(
    StudentAuth(auth): StudentAuth,
    state: State<AppState>,
    ApiJson(payload): ApiJson<MarkComplete>,
) -> Result<(StatusCode, Json<MarkCompleteResponse>), ApiError> {
    validate(&payload)?;

    let progress = repositories::lecture_progress::create(
        state.db(),
        repositories::lecture_progress::CreateProgress {
            id: &Uuid::new_v4().to_string(),
            student_id: &auth.user_id,
            course_id: payload.course_id.as_deref().unwrap_or_default(),
            lecture_id: payload.lecture_id.as_deref().unwrap_or_default(),
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to mark lecture as completed"))?;

    tracing::info!(
        student_id = %auth.user_id,
        course_id = %progress.course_id,
        lecture_id = %progress.lecture_id,
        action = "lecture_complete",
        "Lecture marked as completed"
    );

    Ok((
        StatusCode::CREATED,
        Json(MarkCompleteResponse {
            message: "Lecture marked as completed",
            progress: ProgressRecord {
                student_id: progress.student_id,
                course_id: progress.course_id,
                lecture_id: progress.lecture_id,
                completed: progress.completed,
            },
        }),
    ))
}

async fn course_progress(
    Path(course_id): Path<String>,
    StudentAuth(auth): StudentAuth,
    state: State<AppState>,
) -> Result<Json<CourseProgressResponse>, ApiError> {
    let total_lectures = repositories::lectures::count_for_course(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to count lectures"))?;
    let completed_lectures = repositories::lecture_progress::count_completed_in_course(
        state.db(),
        &auth.user_id,
        &course_id,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to count completed lectures"))?;

    Ok(Json(CourseProgressResponse {
        message: "Course progress retrieved successfully",
        course_id,
        student_id: auth.user_id,
        total_lectures,
        completed_lectures,
        progress_percentage: completion::completion_percent(total_lectures, completed_lectures),
    }))
}

async fn summary(
    Path(course_id): Path<String>,
    StudentAuth(auth): StudentAuth,
    state: State<AppState>,
) -> Result<Json<ProgressSummaryResponse>, ApiError> {
    let summary = progress_summary::load(state.db(), &auth.user_id, &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to build progress summary"))?;

    Ok(Json(ProgressSummaryResponse::new(course_id, auth.user_id, summary)))
}

#[cfg(test)]
mod tests;
