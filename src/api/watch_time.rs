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
use crate::schemas::watch_time::{
    WatchTimeRecord, WatchTimeResponse, WatchTimeSave, WatchTimeSavedResponse,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/save", post(save_watch_time))
        .route("/lecture/:lecture_id", get(get_watch_time))
}

/// One row per (student, lecture): 201 when the row is new, 200 when an
/// existing position was overwritten.
async fn save_watch_time(
    StudentAuth(auth): StudentAuth,
    state: State<AppState>,
    ApiJson(payload): ApiJson<WatchTimeSave>,
) -> Result<(StatusCode, Json<WatchTimeSavedResponse>), ApiError> {
    validate(&payload)?;
    let lecture_id = payload.lecture_id.as_deref().unwrap_or_default();
    let position_seconds = payload.current_time.unwrap_or_default();

    let saved = repositories::watch_times::upsert(
        state.db(),
        repositories::watch_times::UpsertWatchTime {
            id: &Uuid::new_v4().to_string(),
            student_id: &auth.user_id,
            lecture_id,
            position_seconds,
            updated_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to save watch time"))?;

    tracing::debug!(
        student_id = %auth.user_id,
        lecture_id = %lecture_id,
        position_seconds,
        inserted = saved.inserted,
        action = "watch_time_save",
        "Watch time saved"
    );

    let (status, message) = if saved.inserted {
        (StatusCode::CREATED, "Watch time saved successfully")
    } else {
        (StatusCode::OK, "Watch time updated successfully")
    };

    let watch_time = saved.watch_time;
    Ok((
        status,
        Json(WatchTimeSavedResponse {
            message,
            watch_time: WatchTimeRecord {
                student_id: watch_time.student_id,
                lecture_id: watch_time.lecture_id,
                current_time: watch_time.position_seconds,
            },
        }),
    ))
}

async fn get_watch_time(
    Path(lecture_id): Path<String>,
    StudentAuth(auth): StudentAuth,
    state: State<AppState>,
) -> Result<Json<WatchTimeResponse>, ApiError> {
    let record =
        repositories::watch_times::find_for_student_lecture(state.db(), &auth.user_id, &lecture_id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to fetch watch time"))?;

    let response = match record {
        Some(record) => WatchTimeResponse {
            message: "Watch time retrieved successfully",
            lecture_id,
            current_time: record.position_seconds,
        },
        None => WatchTimeResponse {
            message: "No watch time found. Starting from beginning",
            lecture_id,
            current_time: 0.0,
        },
    };

    Ok(Json(response))
}
