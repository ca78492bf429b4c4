use sqlx::types::Json;
use sqlx::PgPool;

use crate::db::models::{GradedAnswer, QuizResult};

const COLUMNS: &str = "id, quiz_id, student_id, score, answers, submitted_at";

pub(crate) struct CreateQuizResult<'a> {
    pub(crate) id: &'a str,
    pub(crate) quiz_id: &'a str,
    pub(crate) student_id: &'a str,
    pub(crate) score: i32,
    pub(crate) answers: &'a [GradedAnswer],
    pub(crate) submitted_at: time::PrimitiveDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct QuizResultWithStudent {
    pub(crate) id: String,
    pub(crate) score: i32,
    pub(crate) answers: Json<Vec<GradedAnswer>>,
    pub(crate) submitted_at: time::PrimitiveDateTime,
    pub(crate) student_name: Option<String>,
    pub(crate) student_email: Option<String>,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateQuizResult<'_>,
) -> Result<QuizResult, sqlx::Error> {
    sqlx::query_as::<_, QuizResult>(&format!(
        "INSERT INTO quiz_results (id, quiz_id, student_id, score, answers, submitted_at)
         VALUES ($1,$2,$3,$4,$5,$6)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.quiz_id)
    .bind(params.student_id)
    .bind(params.score)
    .bind(Json(params.answers))
    .bind(params.submitted_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn list_for_quiz_with_student(
    pool: &PgPool,
    quiz_id: &str,
) -> Result<Vec<QuizResultWithStudent>, sqlx::Error> {
    sqlx::query_as::<_, QuizResultWithStudent>(
        "SELECT r.id, r.score, r.answers, r.submitted_at,
                u.name AS student_name, u.email AS student_email
         FROM quiz_results r
         LEFT JOIN users u ON u.id = r.student_id
         WHERE r.quiz_id = $1
         ORDER BY r.submitted_at DESC",
    )
    .bind(quiz_id)
    .fetch_all(pool)
    .await
}

/// Scores of every attempt the student made on quizzes of the course.
pub(crate) async fn scores_for_student_in_course(
    pool: &PgPool,
    student_id: &str,
    course_id: &str,
) -> Result<Vec<i32>, sqlx::Error> {
    sqlx::query_scalar::<_, i32>(
        "SELECT r.score
         FROM quiz_results r
         WHERE r.student_id = $1
           AND r.quiz_id IN (SELECT q.id FROM quizzes q WHERE q.course_id = $2)",
    )
    .bind(student_id)
    .bind(course_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn scores_for_student(
    pool: &PgPool,
    student_id: &str,
) -> Result<Vec<i32>, sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT score FROM quiz_results WHERE student_id = $1")
        .bind(student_id)
        .fetch_all(pool)
        .await
}
