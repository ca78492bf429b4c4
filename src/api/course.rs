use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::extract::ApiJson;
use crate::api::guards::{StudentAuth, TeacherAuth};
use crate::api::validation::validate;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db;
use crate::repositories;
use crate::schemas::course::{
    CatalogCourse, CourseCreate, CourseCreatedResponse, CourseListResponse, CourseResponse,
    EnrollRequest, EnrolledResponse, EnrollmentResponse,
};

const ALREADY_ENROLLED: &str = "You are already enrolled in this course";

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_course))
        .route("/all", get(list_all_courses))
        .route("/enroll", post(enroll))
        .route("/teacher", get(list_teacher_courses))
        .route("/enrolled", get(list_enrolled_courses))
}

async fn create_course(
    TeacherAuth(auth): TeacherAuth,
    state: State<AppState>,
    ApiJson(payload): ApiJson<CourseCreate>,
) -> Result<(StatusCode, Json<CourseCreatedResponse>), ApiError> {
    validate(&payload)?;
    let title = payload.title.as_deref().unwrap_or_default();

    let course = repositories::courses::create(
        state.db(),
        repositories::courses::CreateCourse {
            id: &Uuid::new_v4().to_string(),
            title,
            description: payload.description.as_deref(),
            teacher_id: &auth.user_id,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create course"))?;

    tracing::info!(
        teacher_id = %auth.user_id,
        course_id = %course.id,
        action = "course_create",
        "Course created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CourseCreatedResponse {
            message: "Course created successfully",
            course: CourseResponse::from_db(course),
        }),
    ))
}

async fn list_all_courses(
    StudentAuth(_auth): StudentAuth,
    state: State<AppState>,
) -> Result<Json<CourseListResponse<CatalogCourse>>, ApiError> {
    let courses = repositories::courses::list_with_teacher(state.db(), false)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list courses"))?;

    Ok(Json(CourseListResponse {
        message: "Courses retrieved successfully",
        courses: courses.into_iter().map(CatalogCourse::from_row).collect(),
    }))
}

async fn enroll(
    StudentAuth(auth): StudentAuth,
    state: State<AppState>,
    ApiJson(payload): ApiJson<EnrollRequest>,
) -> Result<(StatusCode, Json<EnrolledResponse>), ApiError> {
    validate(&payload)?;
    let course_id = payload.course_id.as_deref().unwrap_or_default();

    repositories::courses::find_by_id(state.db(), course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch course"))?
        .ok_or_else(|| ApiError::not_found("Course not found"))?;

    let existing =
        repositories::enrollments::find_for_student_course(state.db(), &auth.user_id, course_id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to check enrollment"))?;
    if existing.is_some() {
        return Err(ApiError::bad_request(ALREADY_ENROLLED));
    }

    let enrollment = repositories::enrollments::create(
        state.db(),
        repositories::enrollments::CreateEnrollment {
            id: &Uuid::new_v4().to_string(),
            student_id: &auth.user_id,
            course_id,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| {
        if db::is_unique_violation(&e) {
            ApiError::bad_request(ALREADY_ENROLLED)
        } else {
            ApiError::internal(e, "Failed to enroll in course")
        }
    })?;

    tracing::info!(
        student_id = %auth.user_id,
        course_id = %course_id,
        action = "course_enroll",
        "Student enrolled"
    );

    Ok((
        StatusCode::CREATED,
        Json(EnrolledResponse {
            message: "Enrolled in course successfully",
            enrollment: EnrollmentResponse {
                id: enrollment.id,
                student_id: enrollment.student_id,
                course_id: enrollment.course_id,
            },
        }),
    ))
}

async fn list_teacher_courses(
    TeacherAuth(auth): TeacherAuth,
    state: State<AppState>,
) -> Result<Json<CourseListResponse<CourseResponse>>, ApiError> {
    let courses = repositories::courses::list_by_teacher(state.db(), &auth.user_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list teacher courses"))?;

    Ok(Json(CourseListResponse {
        message: "Teacher courses retrieved successfully",
        courses: courses.into_iter().map(CourseResponse::from_db).collect(),
    }))
}

async fn list_enrolled_courses(
    StudentAuth(auth): StudentAuth,
    state: State<AppState>,
) -> Result<Json<CourseListResponse<CourseResponse>>, ApiError> {
    let courses = repositories::courses::list_enrolled_for_student(state.db(), &auth.user_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list enrolled courses"))?;

    Ok(Json(CourseListResponse {
        message: "Enrolled courses retrieved successfully",
        courses: courses.into_iter().map(CourseResponse::from_db).collect(),
    }))
}
