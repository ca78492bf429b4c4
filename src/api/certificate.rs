use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use time::OffsetDateTime;

use crate::api::errors::ApiError;
use crate::api::guards::StudentAuth;
use crate::core::metrics;
use crate::core::state::AppState;
use crate::repositories;
use crate::services::{certificate, completion};

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/course/:course_id", get(course_certificate))
}

/// Regenerated on every request; nothing about the certificate is stored.
async fn course_certificate(
    Path(course_id): Path<String>,
    StudentAuth(auth): StudentAuth,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let course = repositories::courses::find_by_id(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch course"))?
        .ok_or_else(|| ApiError::not_found("Course not found"))?;

    let progress = completion::lecture_completion(state.db(), &auth.user_id, &course.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to compute completion"))?;
    if !progress.is_complete() {
        return Err(ApiError::CompletionRequired { completion_percent: progress.percent });
    }

    let bytes = certificate::render_pdf(&certificate::CertificateContent {
        student_name: &auth.user.name,
        course_title: &course.title,
        completed_on: OffsetDateTime::now_utc().date(),
    })
    .map_err(|e| ApiError::internal(e, "Failed to generate certificate"))?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        certificate::file_name(&course.id, &auth.user_id)
    );
    let disposition = HeaderValue::from_str(&disposition)
        .map_err(|e| ApiError::internal(e, "Failed to generate certificate"))?;

    metrics::record(metrics::CERTIFICATES_ISSUED);
    tracing::info!(
        student_id = %auth.user_id,
        course_id = %course.id,
        action = "certificate_issue",
        "Certificate issued"
    );

    let mut response = (StatusCode::OK, bytes).into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
    response.headers_mut().insert(header::CONTENT_DISPOSITION, disposition);
    Ok(response)
}
