use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::extract::ApiJson;
use crate::api::guards::{AuthContext, StudentAuth, TeacherAuth};
use crate::api::validation::validate;
use crate::core::metrics;
use crate::core::state::AppState;
use crate::core::time::{parse_date_or_datetime, primitive_now_utc};
use crate::db;
use crate::repositories;
use crate::schemas::assignment::{
    AssignmentCreate, AssignmentCreatedResponse, AssignmentEntry, AssignmentListResponse,
    AssignmentSubmit, EvaluateRequest, GradeRequest, GradedResponse, GradedSubmission,
    SubmissionEnvelope, SubmissionListResponse, SubmissionResponse,
    SubmissionWithStudentResponse, SubmittedResponse,
};
use crate::services::assignment_grading::{normalize_feedback, validate_marks};

const ALREADY_SUBMITTED: &str = "You have already submitted this assignment";
const ASSIGNMENT_NOT_FOUND: &str = "Assignment not found";
const SUBMISSION_NOT_FOUND: &str = "Submission not found";

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_assignment))
        .route("/course/:course_id", get(list_course_assignments))
        .route("/submit", post(submit_assignment))
        .route("/evaluate", post(evaluate_submission))
        .route("/submission/:submission_id", get(get_submission))
        .route("/submission/:submission_id/grade", put(grade_submission))
        .route("/:assignment_id/my-submission", get(my_submission))
        .route("/:assignment_id/submissions", get(list_submissions))
}

async fn create_assignment(
    TeacherAuth(auth): TeacherAuth,
    state: State<AppState>,
    ApiJson(payload): ApiJson<AssignmentCreate>,
) -> Result<(StatusCode, Json<AssignmentCreatedResponse>), ApiError> {
    validate(&payload)?;
    let due_date = parse_date_or_datetime(payload.due_date.as_deref().unwrap_or_default())
        .ok_or_else(|| ApiError::bad_request("Invalid due date"))?;

    let assignment = repositories::assignments::create(
        state.db(),
        repositories::assignments::CreateAssignment {
            id: &Uuid::new_v4().to_string(),
            title: payload.title.as_deref().unwrap_or_default(),
            description: payload.description.as_deref().unwrap_or_default(),
            course_id: payload.course_id.as_deref().unwrap_or_default(),
            created_by: &auth.user_id,
            due_date,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create assignment"))?;

    tracing::info!(
        teacher_id = %auth.user_id,
        course_id = %assignment.course_id,
        assignment_id = %assignment.id,
        action = "assignment_create",
        "Assignment created"
    );

    Ok((
        StatusCode::CREATED,
        Json(AssignmentCreatedResponse {
            message: "Assignment created successfully",
            assignment_id: assignment.id,
        }),
    ))
}

async fn list_course_assignments(
    Path(course_id): Path<String>,
    _auth: AuthContext,
    state: State<AppState>,
) -> Result<Json<AssignmentListResponse>, ApiError> {
    let rows = repositories::assignments::list_for_course_with_teacher(state.db(), &course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list assignments"))?;

    let assignments: Vec<AssignmentEntry> =
        rows.into_iter().map(AssignmentEntry::from_row).collect();
    Ok(Json(AssignmentListResponse { total_assignments: assignments.len(), assignments }))
}

async fn submit_assignment(
    StudentAuth(auth): StudentAuth,
    state: State<AppState>,
    ApiJson(payload): ApiJson<AssignmentSubmit>,
) -> Result<(StatusCode, Json<SubmittedResponse>), ApiError> {
    validate(&payload)?;
    let assignment_id = payload.assignment_id.as_deref().unwrap_or_default();

    repositories::assignments::find_by_id(state.db(), assignment_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch assignment"))?
        .ok_or_else(|| ApiError::not_found(ASSIGNMENT_NOT_FOUND))?;

    let existing = repositories::assignment_submissions::find_for_assignment_student(
        state.db(),
        assignment_id,
        &auth.user_id,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to check submission"))?;
    if existing.is_some() {
        return Err(ApiError::bad_request(ALREADY_SUBMITTED));
    }

    let submission = repositories::assignment_submissions::create(
        state.db(),
        repositories::assignment_submissions::CreateSubmission {
            id: &Uuid::new_v4().to_string(),
            assignment_id,
            student_id: &auth.user_id,
            answer_text: payload.answer_text.as_deref().unwrap_or_default(),
            submitted_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| {
        if db::is_unique_violation(&e) {
            ApiError::bad_request(ALREADY_SUBMITTED)
        } else {
            ApiError::internal(e, "Failed to submit assignment")
        }
    })?;

    metrics::record(metrics::ASSIGNMENT_SUBMISSIONS);
    tracing::info!(
        student_id = %auth.user_id,
        assignment_id = %assignment_id,
        submission_id = %submission.id,
        action = "assignment_submit",
        "Assignment submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmittedResponse {
            message: "Assignment submitted successfully",
            submission_id: submission.id,
        }),
    ))
}

async fn evaluate_submission(
    TeacherAuth(auth): TeacherAuth,
    state: State<AppState>,
    ApiJson(payload): ApiJson<EvaluateRequest>,
) -> Result<Json<GradedResponse>, ApiError> {
    let submission_id = payload
        .submission_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("Submission ID is required"))?;

    apply_grade(&state, &auth, &submission_id, payload.grade).await.map(Json)
}

async fn grade_submission(
    Path(submission_id): Path<String>,
    TeacherAuth(auth): TeacherAuth,
    state: State<AppState>,
    ApiJson(payload): ApiJson<GradeRequest>,
) -> Result<Json<GradedResponse>, ApiError> {
    apply_grade(&state, &auth, &submission_id, payload).await.map(Json)
}

/// Shared by both grading routes. Re-grading a checked submission
/// overwrites marks, feedback and timestamps.
async fn apply_grade(
    state: &AppState,
    auth: &AuthContext,
    submission_id: &str,
    grade: GradeRequest,
) -> Result<GradedResponse, ApiError> {
    let marks = validate_marks(grade.marks.as_ref())
        .map_err(|err| ApiError::bad_request(err.to_string()))?;

    let submission = repositories::assignment_submissions::grade(
        state.db(),
        submission_id,
        repositories::assignment_submissions::GradeSubmission {
            marks,
            feedback: normalize_feedback(grade.feedback.as_deref()),
            graded_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to grade submission"))?
    .ok_or_else(|| ApiError::not_found(SUBMISSION_NOT_FOUND))?;

    metrics::record(metrics::ASSIGNMENTS_GRADED);
    tracing::info!(
        teacher_id = %auth.user_id,
        submission_id = %submission.id,
        marks,
        action = "assignment_grade",
        "Submission graded"
    );

    Ok(GradedResponse {
        message: "Assignment graded successfully",
        submission: GradedSubmission::from_db(submission),
    })
}

async fn get_submission(
    Path(submission_id): Path<String>,
    TeacherAuth(_auth): TeacherAuth,
    state: State<AppState>,
) -> Result<Json<SubmissionEnvelope<SubmissionWithStudentResponse>>, ApiError> {
    let row = repositories::assignment_submissions::find_with_student(state.db(), &submission_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch submission"))?
        .ok_or_else(|| ApiError::not_found(SUBMISSION_NOT_FOUND))?;

    Ok(Json(SubmissionEnvelope { submission: SubmissionWithStudentResponse::from_row(row) }))
}

async fn my_submission(
    Path(assignment_id): Path<String>,
    StudentAuth(auth): StudentAuth,
    state: State<AppState>,
) -> Result<Json<SubmissionEnvelope<SubmissionResponse>>, ApiError> {
    let submission = repositories::assignment_submissions::find_for_assignment_student(
        state.db(),
        &assignment_id,
        &auth.user_id,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to fetch submission"))?
    .ok_or_else(|| ApiError::not_found("You have not submitted this assignment"))?;

    Ok(Json(SubmissionEnvelope { submission: SubmissionResponse::from_db(submission) }))
}

async fn list_submissions(
    Path(assignment_id): Path<String>,
    TeacherAuth(_auth): TeacherAuth,
    state: State<AppState>,
) -> Result<Json<SubmissionListResponse>, ApiError> {
    let rows = repositories::assignment_submissions::list_for_assignment_with_student(
        state.db(),
        &assignment_id,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to list submissions"))?;

    let submissions: Vec<SubmissionWithStudentResponse> =
        rows.into_iter().map(SubmissionWithStudentResponse::from_row).collect();
    Ok(Json(SubmissionListResponse { total_submissions: submissions.len(), submissions }))
}
