use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::models::AssignmentSubmission;
use crate::db::types::SubmissionStatus;
use crate::repositories::assignments::AssignmentWithTeacher;
use crate::repositories::assignment_submissions::SubmissionWithStudent;
use crate::schemas::FieldOrder;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct AssignmentCreate {
    #[serde(default)]
    #[validate(
        required(message = "Title is required"),
        length(min = 1, message = "Title is required")
    )]
    pub(crate) title: Option<String>,
    #[serde(default)]
    #[validate(
        required(message = "Description is required"),
        length(min = 1, message = "Description is required")
    )]
    pub(crate) description: Option<String>,
    #[serde(default)]
    #[serde(alias = "courseId")]
    #[validate(
        required(message = "Course ID is required"),
        length(min = 1, message = "Course ID is required")
    )]
    pub(crate) course_id: Option<String>,
    #[serde(default)]
    #[serde(alias = "dueDate")]
    #[validate(
        required(message = "Due date is required"),
        length(min = 1, message = "Due date is required")
    )]
    pub(crate) due_date: Option<String>,
}

impl FieldOrder for AssignmentCreate {
    const FIELDS: &'static [&'static str] = &["title", "description", "course_id", "due_date"];
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct AssignmentSubmit {
    #[serde(default)]
    #[serde(alias = "assignmentId")]
    #[validate(
        required(message = "Assignment ID is required"),
        length(min = 1, message = "Assignment ID is required")
    )]
    pub(crate) assignment_id: Option<String>,
    #[serde(default)]
    #[serde(alias = "answerText")]
    #[validate(
        required(message = "Answer text is required"),
        length(min = 1, message = "Answer text is required")
    )]
    pub(crate) answer_text: Option<String>,
}

impl FieldOrder for AssignmentSubmit {
    const FIELDS: &'static [&'static str] = &["assignment_id", "answer_text"];
}

/// Marks stay raw JSON until the grading service checks them.
#[derive(Debug, Deserialize)]
pub(crate) struct GradeRequest {
    #[serde(default)]
    pub(crate) marks: Option<serde_json::Value>,
    #[serde(default)]
    pub(crate) feedback: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EvaluateRequest {
    #[serde(default)]
    #[serde(alias = "submissionId")]
    pub(crate) submission_id: Option<String>,
    #[serde(flatten)]
    pub(crate) grade: GradeRequest,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssignmentCreatedResponse {
    pub(crate) message: &'static str,
    pub(crate) assignment_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssignmentEntry {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) course_id: String,
    pub(crate) created_by: String,
    pub(crate) teacher_name: Option<String>,
    pub(crate) due_date: String,
    pub(crate) created_at: String,
}

impl AssignmentEntry {
    pub(crate) fn from_row(row: AssignmentWithTeacher) -> Self {
        let assignment = row.assignment;
        Self {
            id: assignment.id,
            title: assignment.title,
            description: assignment.description,
            course_id: assignment.course_id,
            created_by: assignment.created_by,
            teacher_name: row.teacher_name,
            due_date: format_primitive(assignment.due_date),
            created_at: format_primitive(assignment.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssignmentListResponse {
    pub(crate) assignments: Vec<AssignmentEntry>,
    pub(crate) total_assignments: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmittedResponse {
    pub(crate) message: &'static str,
    pub(crate) submission_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmissionResponse {
    pub(crate) id: String,
    pub(crate) assignment_id: String,
    pub(crate) student_id: String,
    pub(crate) answer_text: String,
    pub(crate) marks: Option<f64>,
    pub(crate) feedback: Option<String>,
    pub(crate) status: SubmissionStatus,
    pub(crate) submitted_at: String,
    pub(crate) evaluated_at: Option<String>,
    pub(crate) graded_at: Option<String>,
}

impl SubmissionResponse {
    pub(crate) fn from_db(submission: AssignmentSubmission) -> Self {
        Self {
            id: submission.id,
            assignment_id: submission.assignment_id,
            student_id: submission.student_id,
            answer_text: submission.answer_text,
            marks: submission.marks,
            feedback: submission.feedback,
            status: submission.status,
            submitted_at: format_primitive(submission.submitted_at),
            evaluated_at: submission.evaluated_at.map(format_primitive),
            graded_at: submission.graded_at.map(format_primitive),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmissionWithStudentResponse {
    #[serde(flatten)]
    pub(crate) submission: SubmissionResponse,
    pub(crate) student_name: Option<String>,
    pub(crate) student_email: Option<String>,
}

impl SubmissionWithStudentResponse {
    pub(crate) fn from_row(row: SubmissionWithStudent) -> Self {
        Self {
            submission: SubmissionResponse::from_db(row.submission),
            student_name: row.student_name,
            student_email: row.student_email,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmissionEnvelope<T> {
    pub(crate) submission: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmissionListResponse {
    pub(crate) submissions: Vec<SubmissionWithStudentResponse>,
    pub(crate) total_submissions: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GradedSubmission {
    pub(crate) id: String,
    pub(crate) marks: Option<f64>,
    pub(crate) feedback: Option<String>,
    pub(crate) status: SubmissionStatus,
    pub(crate) graded_at: Option<String>,
}

impl GradedSubmission {
    pub(crate) fn from_db(submission: AssignmentSubmission) -> Self {
        Self {
            id: submission.id,
            marks: submission.marks,
            feedback: submission.feedback,
            status: submission.status,
            graded_at: submission.graded_at.map(format_primitive),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GradedResponse {
    pub(crate) message: &'static str,
    pub(crate) submission: GradedSubmission,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_request_flattens_grade_fields() {
        let request: EvaluateRequest = serde_json::from_value(serde_json::json!({
            "submissionId": "sub-1",
            "marks": 8,
            "feedback": "Solid"
        }))
        .unwrap();

        assert_eq!(request.submission_id.as_deref(), Some("sub-1"));
        assert_eq!(request.grade.marks, Some(serde_json::json!(8)));
        assert_eq!(request.grade.feedback.as_deref(), Some("Solid"));
    }

    #[test]
    fn create_reports_fields_in_declared_order() {
        let payload: AssignmentCreate =
            serde_json::from_value(serde_json::json!({"courseId": "c1"})).unwrap();
        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("description"));
        assert!(fields.contains_key("due_date"));
        assert!(!fields.contains_key("course_id"));
        assert_eq!(AssignmentCreate::FIELDS[0], "title");
    }
}
