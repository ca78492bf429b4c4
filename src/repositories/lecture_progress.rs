use sqlx::PgPool;

use crate::db::models::LectureProgress;

const COLUMNS: &str = "id, student_id, course_id, lecture_id, completed, created_at";

pub(crate) struct CreateProgress<'a> {
    pub(crate) id: &'a str,
    pub(crate) student_id: &'a str,
    pub(crate) course_id: &'a str,
    pub(crate) lecture_id: &'a str,
    pub(crate) created_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateProgress<'_>,
) -> Result<LectureProgress, sqlx::Error> {
    sqlx::query_as::<_, LectureProgress>(&format!(
        "INSERT INTO lecture_progress (id, student_id, course_id, lecture_id, completed, created_at)
         VALUES ($1,$2,$3,$4,TRUE,$5)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.student_id)
    .bind(params.course_id)
    .bind(params.lecture_id)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

/// Distinct completed lectures that still belong to the course.
pub(crate) async fn count_completed_in_course(
    pool: &PgPool,
    student_id: &str,
    course_id: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(DISTINCT p.lecture_id)
         FROM lecture_progress p
         JOIN lectures l ON l.id = p.lecture_id AND l.course_id = p.course_id
         WHERE p.student_id = $1 AND p.course_id = $2 AND p.completed",
    )
    .bind(student_id)
    .bind(course_id)
    .fetch_one(pool)
    .await
}

#[cfg(test)]
pub(crate) async fn count_rows_for_student(
    pool: &PgPool,
    student_id: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM lecture_progress WHERE student_id = $1")
        .bind(student_id)
        .fetch_one(pool)
        .await
}
