use sqlx::PgPool;

use crate::db::models::AssignmentSubmission;
use crate::db::types::SubmissionStatus;

const COLUMNS: &str = "id, assignment_id, student_id, answer_text, marks, feedback, status, \
                       submitted_at, evaluated_at, graded_at";

pub(crate) struct CreateSubmission<'a> {
    pub(crate) id: &'a str,
    pub(crate) assignment_id: &'a str,
    pub(crate) student_id: &'a str,
    pub(crate) answer_text: &'a str,
    pub(crate) submitted_at: time::PrimitiveDateTime,
}

pub(crate) struct GradeSubmission<'a> {
    pub(crate) marks: f64,
    pub(crate) feedback: Option<&'a str>,
    pub(crate) graded_at: time::PrimitiveDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct SubmissionWithStudent {
    #[sqlx(flatten)]
    pub(crate) submission: AssignmentSubmission,
    pub(crate) student_name: Option<String>,
    pub(crate) student_email: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct SubmissionCounts {
    pub(crate) submitted: i64,
    pub(crate) graded: i64,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateSubmission<'_>,
) -> Result<AssignmentSubmission, sqlx::Error> {
    sqlx::query_as::<_, AssignmentSubmission>(&format!(
        "INSERT INTO assignment_submissions (
            id, assignment_id, student_id, answer_text, status, submitted_at
         ) VALUES ($1,$2,$3,$4,$5,$6)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.assignment_id)
    .bind(params.student_id)
    .bind(params.answer_text)
    .bind(SubmissionStatus::Submitted)
    .bind(params.submitted_at)
    .fetch_one(pool)
    .await
}

#[cfg(test)]
pub(crate) async fn find_by_id(
    pool: &PgPool,
    submission_id: &str,
) -> Result<Option<AssignmentSubmission>, sqlx::Error> {
    sqlx::query_as::<_, AssignmentSubmission>(&format!(
        "SELECT {COLUMNS} FROM assignment_submissions WHERE id = $1"
    ))
    .bind(submission_id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn find_with_student(
    pool: &PgPool,
    submission_id: &str,
) -> Result<Option<SubmissionWithStudent>, sqlx::Error> {
    sqlx::query_as::<_, SubmissionWithStudent>(
        "SELECT s.id, s.assignment_id, s.student_id, s.answer_text, s.marks, s.feedback, s.status,
                s.submitted_at, s.evaluated_at, s.graded_at,
                u.name AS student_name, u.email AS student_email
         FROM assignment_submissions s
         LEFT JOIN users u ON u.id = s.student_id
         WHERE s.id = $1",
    )
    .bind(submission_id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn find_for_assignment_student(
    pool: &PgPool,
    assignment_id: &str,
    student_id: &str,
) -> Result<Option<AssignmentSubmission>, sqlx::Error> {
    sqlx::query_as::<_, AssignmentSubmission>(&format!(
        "SELECT {COLUMNS} FROM assignment_submissions WHERE assignment_id = $1 AND student_id = $2"
    ))
    .bind(assignment_id)
    .bind(student_id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn list_for_assignment_with_student(
    pool: &PgPool,
    assignment_id: &str,
) -> Result<Vec<SubmissionWithStudent>, sqlx::Error> {
    sqlx::query_as::<_, SubmissionWithStudent>(
        "SELECT s.id, s.assignment_id, s.student_id, s.answer_text, s.marks, s.feedback, s.status,
                s.submitted_at, s.evaluated_at, s.graded_at,
                u.name AS student_name, u.email AS student_email
         FROM assignment_submissions s
         LEFT JOIN users u ON u.id = s.student_id
         WHERE s.assignment_id = $1
         ORDER BY s.submitted_at DESC",
    )
    .bind(assignment_id)
    .fetch_all(pool)
    .await
}

/// Marks the submission `checked`. `feedback` only overwrites the stored
/// value when present; `evaluated_at` always mirrors `graded_at`.
pub(crate) async fn grade(
    pool: &PgPool,
    submission_id: &str,
    params: GradeSubmission<'_>,
) -> Result<Option<AssignmentSubmission>, sqlx::Error> {
    sqlx::query_as::<_, AssignmentSubmission>(&format!(
        "UPDATE assignment_submissions SET
            marks = $1,
            feedback = COALESCE($2, feedback),
            status = $3,
            graded_at = $4,
            evaluated_at = $4
         WHERE id = $5
         RETURNING {COLUMNS}",
    ))
    .bind(params.marks)
    .bind(params.feedback)
    .bind(SubmissionStatus::Checked)
    .bind(params.graded_at)
    .bind(submission_id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn counts_for_student_in_course(
    pool: &PgPool,
    student_id: &str,
    course_id: &str,
) -> Result<SubmissionCounts, sqlx::Error> {
    sqlx::query_as::<_, SubmissionCounts>(
        "SELECT COUNT(*) AS submitted, COUNT(s.marks) AS graded
         FROM assignment_submissions s
         WHERE s.student_id = $1
           AND s.assignment_id IN (SELECT a.id FROM assignments a WHERE a.course_id = $2)",
    )
    .bind(student_id)
    .bind(course_id)
    .fetch_one(pool)
    .await
}

/// Ungraded submissions of the student on assignments of courses they are
/// enrolled in.
pub(crate) async fn count_pending_for_student(
    pool: &PgPool,
    student_id: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*)
         FROM assignment_submissions s
         WHERE s.student_id = $1
           AND s.marks IS NULL
           AND s.assignment_id IN (
               SELECT a.id FROM assignments a
               WHERE a.course_id IN (SELECT e.course_id FROM enrollments e WHERE e.student_id = $1)
           )",
    )
    .bind(student_id)
    .fetch_one(pool)
    .await
}

/// Ungraded submissions across every assignment the teacher created.
pub(crate) async fn count_pending_for_teacher(
    pool: &PgPool,
    teacher_id: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*)
         FROM assignment_submissions s
         WHERE s.marks IS NULL
           AND s.assignment_id IN (SELECT a.id FROM assignments a WHERE a.created_by = $1)",
    )
    .bind(teacher_id)
    .fetch_one(pool)
    .await
}
