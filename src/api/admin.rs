use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::extract::ApiJson;
use crate::api::guards::AdminAuth;
use crate::api::validation::validate;
use crate::core::security;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db;
use crate::db::types::UserRole;
use crate::repositories;
use crate::schemas::admin::{
    AdminCourseEntry, AdminCourseListResponse, AdminCreate, AdminCreatedResponse,
    CourseEnrollmentEntry, EnrollmentOverviewResponse, RoleUpdate, RoleUpdatedResponse,
    StudentEnrollmentEntry, TeacherEntry, TeacherListResponse, UserDeletedResponse,
    UserListEntry, UserListResponse, UserSummary,
};
use crate::schemas::dashboard::AdminStatsResponse;
use crate::services::dashboard;

const EMAIL_TAKEN: &str = "Email already registered";
const USER_NOT_FOUND: &str = "User not found";

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats))
        .route("/users", get(list_users))
        .route("/teachers", get(list_teachers))
        .route("/courses", get(list_courses))
        .route("/enrollments", get(enrollment_overview))
        .route("/create", post(create_admin))
        .route("/user/:user_id/role", patch(update_role))
        .route("/user/:user_id", delete(delete_user))
}

async fn stats(
    AdminAuth(auth): AdminAuth,
    state: State<AppState>,
) -> Result<Json<AdminStatsResponse>, ApiError> {
    let stats = dashboard::admin(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load admin stats"))?;

    Ok(Json(AdminStatsResponse::new(auth.user_id, stats)))
}

async fn list_users(
    AdminAuth(_auth): AdminAuth,
    state: State<AppState>,
) -> Result<Json<UserListResponse>, ApiError> {
    let users = repositories::users::list_newest_first(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list users"))?;

    let users: Vec<UserListEntry> = users.into_iter().map(UserListEntry::from_db).collect();
    Ok(Json(UserListResponse {
        message: "Users retrieved successfully",
        count: users.len(),
        users,
    }))
}

async fn list_teachers(
    AdminAuth(_auth): AdminAuth,
    state: State<AppState>,
) -> Result<Json<TeacherListResponse>, ApiError> {
    let rows = repositories::users::list_teachers_with_course_count(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list teachers"))?;

    let teachers: Vec<TeacherEntry> = rows.into_iter().map(TeacherEntry::from_row).collect();
    Ok(Json(TeacherListResponse {
        message: "Teachers retrieved successfully",
        count: teachers.len(),
        teachers,
    }))
}

async fn list_courses(
    AdminAuth(_auth): AdminAuth,
    state: State<AppState>,
) -> Result<Json<AdminCourseListResponse>, ApiError> {
    let rows = repositories::courses::list_with_teacher(state.db(), true)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list courses"))?;

    let courses: Vec<AdminCourseEntry> =
        rows.into_iter().map(AdminCourseEntry::from_row).collect();
    Ok(Json(AdminCourseListResponse {
        message: "Courses retrieved successfully",
        count: courses.len(),
        courses,
    }))
}

async fn enrollment_overview(
    AdminAuth(_auth): AdminAuth,
    state: State<AppState>,
) -> Result<Json<EnrollmentOverviewResponse>, ApiError> {
    let rows = repositories::enrollments::list_overview(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list enrollments"))?;
    let per_course = repositories::courses::enrollment_counts(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to count enrollments"))?;

    let enrollments_by_students: Vec<StudentEnrollmentEntry> =
        rows.into_iter().map(StudentEnrollmentEntry::from_row).collect();
    Ok(Json(EnrollmentOverviewResponse {
        message: "Enrollments retrieved successfully",
        total_enrollments: enrollments_by_students.len(),
        enrollments_by_students,
        enrollments_by_course: per_course
            .into_iter()
            .map(CourseEnrollmentEntry::from_row)
            .collect(),
    }))
}

async fn create_admin(
    AdminAuth(auth): AdminAuth,
    state: State<AppState>,
    ApiJson(payload): ApiJson<AdminCreate>,
) -> Result<(StatusCode, Json<AdminCreatedResponse>), ApiError> {
    validate(&payload)?;
    let email = payload.email.as_deref().unwrap_or_default();

    let existing = repositories::users::find_by_email(state.db(), email)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to check email"))?;
    if existing.is_some() {
        return Err(ApiError::bad_request(EMAIL_TAKEN));
    }

    let hashed_password = security::hash_password(payload.password.as_deref().unwrap_or_default())
        .map_err(|e| ApiError::internal(e, "Failed to hash password"))?;

    let admin = repositories::users::create(
        state.db(),
        repositories::users::CreateUser {
            id: &Uuid::new_v4().to_string(),
            name: payload.name.as_deref().unwrap_or_default(),
            email,
            hashed_password: &hashed_password,
            role: UserRole::Admin,
            email_verified: true,
            auth_provider: "local",
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| {
        if db::is_unique_violation(&e) {
            ApiError::bad_request(EMAIL_TAKEN)
        } else {
            ApiError::internal(e, "Failed to create admin")
        }
    })?;

    tracing::info!(
        admin_id = %auth.user_id,
        created_user_id = %admin.id,
        action = "admin_create",
        "Admin user created"
    );

    Ok((
        StatusCode::CREATED,
        Json(AdminCreatedResponse {
            message: "Admin user created successfully",
            admin: UserSummary::from_db(admin),
        }),
    ))
}

async fn update_role(
    Path(user_id): Path<String>,
    AdminAuth(auth): AdminAuth,
    state: State<AppState>,
    ApiJson(payload): ApiJson<RoleUpdate>,
) -> Result<Json<RoleUpdatedResponse>, ApiError> {
    validate(&payload)?;
    let role: UserRole = payload
        .role
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid role. Must be student, teacher, or admin"))?;

    let user = repositories::users::update_role(state.db(), &user_id, role)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to update role"))?
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))?;

    tracing::info!(
        admin_id = %auth.user_id,
        user_id = %user.id,
        role = %role,
        action = "user_role_update",
        "User role updated"
    );

    Ok(Json(RoleUpdatedResponse {
        message: "User role updated successfully",
        user: UserSummary::from_db(user),
    }))
}

async fn delete_user(
    Path(user_id): Path<String>,
    AdminAuth(auth): AdminAuth,
    state: State<AppState>,
) -> Result<Json<UserDeletedResponse>, ApiError> {
    if user_id == auth.user_id {
        return Err(ApiError::bad_request("Cannot delete your own admin account"));
    }

    let user = repositories::users::delete(state.db(), &user_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to delete user"))?
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))?;

    tracing::info!(
        admin_id = %auth.user_id,
        user_id = %user.id,
        action = "user_delete",
        "User deleted"
    );

    Ok(Json(UserDeletedResponse {
        message: "User deleted successfully",
        deleted_user: UserSummary::from_db(user),
    }))
}
