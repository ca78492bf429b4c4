use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::api::errors::ApiError;
use crate::api::guards::TeacherAuth;
use crate::core::state::AppState;
use crate::repositories;
use crate::schemas::course::{CourseEnrollmentEntry, CourseEnrollmentsResponse};

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/course/:course_id", get(list_course_enrollments))
}

async fn list_course_enrollments(
    Path(course_id): Path<String>,
    TeacherAuth(_auth): TeacherAuth,
    state: State<AppState>,
) -> Result<Json<CourseEnrollmentsResponse>, ApiError> {
    let enrollments = repositories::enrollments::list_for_course(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list enrollments"))?;

    Ok(Json(CourseEnrollmentsResponse {
        message: "Enrollments retrieved successfully",
        course_id,
        count: enrollments.len(),
        enrollments: enrollments.into_iter().map(CourseEnrollmentEntry::from_row).collect(),
    }))
}
