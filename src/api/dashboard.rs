use axum::{extract::State, routing::get, Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::{StudentAuth, TeacherAuth};
use crate::core::state::AppState;
use crate::schemas::dashboard::{StudentDashboardResponse, TeacherDashboardResponse};
use crate::services::dashboard;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/student", get(student_dashboard))
        .route("/teacher", get(teacher_dashboard))
}

async fn student_dashboard(
    StudentAuth(auth): StudentAuth,
    state: State<AppState>,
) -> Result<Json<StudentDashboardResponse>, ApiError> {
    let summary = dashboard::student(state.db(), &auth.user_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load student dashboard"))?;

    Ok(Json(StudentDashboardResponse::new(auth.user_id, summary)))
}

async fn teacher_dashboard(
    TeacherAuth(auth): TeacherAuth,
    state: State<AppState>,
) -> Result<Json<TeacherDashboardResponse>, ApiError> {
    let summary = dashboard::teacher(state.db(), &auth.user_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load teacher dashboard"))?;

    Ok(Json(TeacherDashboardResponse::new(auth.user_id, summary)))
}

#[cfg(test)]
mod tests;
