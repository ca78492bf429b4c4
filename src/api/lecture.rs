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
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::repositories;
use crate::schemas::lecture::{
    CourseLecturesResponse, LectureCreate, LectureCreatedResponse, LectureResponse,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_lecture))
        .route("/add", post(create_lecture))
        .route("/course/:course_id", get(list_course_lectures))
}

async fn create_lecture(
    TeacherAuth(auth): TeacherAuth,
    state: State<AppState>,
    ApiJson(payload): ApiJson<LectureCreate>,
) -> Result<(StatusCode, Json<LectureCreatedResponse>), ApiError> {
    validate(&payload)?;

    let lecture = repositories::lectures::create(
        state.db(),
        repositories::lectures::CreateLecture {
            id: &Uuid::new_v4().to_string(),
            course_id: payload.course_id.as_deref().unwrap_or_default(),
            title: payload.title.as_deref().unwrap_or_default(),
            video_url: payload.video_url.as_deref().unwrap_or_default(),
            sort_order: payload.sort_order(),
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to add lecture"))?;

    tracing::info!(
        teacher_id = %auth.user_id,
        course_id = %lecture.course_id,
        lecture_id = %lecture.id,
        action = "lecture_create",
        "Lecture added"
    );

    Ok((
        StatusCode::CREATED,
        Json(LectureCreatedResponse {
            message: "Lecture added successfully",
            lecture: LectureResponse::from_db(lecture),
        }),
    ))
}

async fn list_course_lectures(
    Path(course_id): Path<String>,
    _auth: AuthContext,
    state: State<AppState>,
) -> Result<Json<CourseLecturesResponse>, ApiError> {
    let lectures = repositories::lectures::list_for_course(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list lectures"))?;

    Ok(Json(CourseLecturesResponse {
        message: "Lectures retrieved successfully",
        course_id,
        lecture_count: lectures.len(),
        lectures: lectures.into_iter().map(LectureResponse::from_db).collect(),
    }))
}
