use sqlx::PgPool;

use crate::db::models::Enrollment;

const COLUMNS: &str = "id, student_id, course_id, created_at";

pub(crate) struct CreateEnrollment<'a> {
    pub(crate) id: &'a str,
    pub(crate) student_id: &'a str,
    pub(crate) course_id: &'a str,
    pub(crate) created_at: time::PrimitiveDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct CourseEnrollmentRow {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) course_id: String,
    pub(crate) student_name: Option<String>,
    pub(crate) student_email: Option<String>,
    pub(crate) created_at: time::PrimitiveDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct EnrollmentOverviewRow {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) student_name: Option<String>,
    pub(crate) student_email: Option<String>,
    pub(crate) course_title: Option<String>,
    pub(crate) course_exists: bool,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateEnrollment<'_>,
) -> Result<Enrollment, sqlx::Error> {
    sqlx::query_as::<_, Enrollment>(&format!(
        "INSERT INTO enrollments (id, student_id, course_id, created_at)
         VALUES ($1,$2,$3,$4)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.student_id)
    .bind(params.course_id)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_for_student_course(
    pool: &PgPool,
    student_id: &str,
    course_id: &str,
) -> Result<Option<Enrollment>, sqlx::Error> {
    sqlx::query_as::<_, Enrollment>(&format!(
        "SELECT {COLUMNS} FROM enrollments WHERE student_id = $1 AND course_id = $2"
    ))
    .bind(student_id)
    .bind(course_id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn list_for_course(
    pool: &PgPool,
    course_id: &str,
) -> Result<Vec<CourseEnrollmentRow>, sqlx::Error> {
    sqlx::query_as::<_, CourseEnrollmentRow>(
        "SELECT e.id, e.student_id, e.course_id, e.created_at,
                u.name AS student_name, u.email AS student_email
         FROM enrollments e
         LEFT JOIN users u ON u.id = e.student_id
         WHERE e.course_id = $1
         ORDER BY e.created_at DESC",
    )
    .bind(course_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_overview(
    pool: &PgPool,
) -> Result<Vec<EnrollmentOverviewRow>, sqlx::Error> {
    sqlx::query_as::<_, EnrollmentOverviewRow>(
        "SELECT e.id, e.course_id,
                u.name AS student_name, u.email AS student_email,
                c.title AS course_title, (c.id IS NOT NULL) AS course_exists
         FROM enrollments e
         LEFT JOIN users u ON u.id = e.student_id
         LEFT JOIN courses c ON c.id = e.course_id
         ORDER BY e.created_at",
    )
    .fetch_all(pool)
    .await
}

pub(crate) async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM enrollments").fetch_one(pool).await
}

pub(crate) async fn count_for_student(pool: &PgPool, student_id: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM enrollments WHERE student_id = $1")
        .bind(student_id)
        .fetch_one(pool)
        .await
}

/// Distinct students across every course owned by the teacher.
pub(crate) async fn count_distinct_students_for_teacher(
    pool: &PgPool,
    teacher_id: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(DISTINCT e.student_id)
         FROM enrollments e
         JOIN courses c ON c.id = e.course_id
         WHERE c.teacher_id = $1",
    )
    .bind(teacher_id)
    .fetch_one(pool)
    .await
}
