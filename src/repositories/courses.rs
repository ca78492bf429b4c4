use sqlx::PgPool;

use crate::db::models::Course;

const COLUMNS: &str = "id, title, description, teacher_id, created_at";

pub(crate) struct CreateCourse<'a> {
    pub(crate) id: &'a str,
    pub(crate) title: &'a str,
    pub(crate) description: Option<&'a str>,
    pub(crate) teacher_id: &'a str,
    pub(crate) created_at: time::PrimitiveDateTime,
}

/// Course joined with its teacher; the teacher columns are `None` when the
/// referenced user no longer exists.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct CourseWithTeacher {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) teacher_id: String,
    pub(crate) teacher_name: Option<String>,
    pub(crate) teacher_email: Option<String>,
    pub(crate) created_at: time::PrimitiveDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct CourseEnrollmentCount {
    pub(crate) course_id: String,
    pub(crate) course_name: String,
    pub(crate) student_count: i64,
}

pub(crate) async fn create(pool: &PgPool, params: CreateCourse<'_>) -> Result<Course, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        "INSERT INTO courses (id, title, description, teacher_id, created_at)
         VALUES ($1,$2,$3,$4,$5)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.title)
    .bind(params.description)
    .bind(params.teacher_id)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_by_id(
    pool: &PgPool,
    course_id: &str,
) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!("SELECT {COLUMNS} FROM courses WHERE id = $1"))
        .bind(course_id)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn list_with_teacher(
    pool: &PgPool,
    newest_first: bool,
) -> Result<Vec<CourseWithTeacher>, sqlx::Error> {
    let order = if newest_first { "DESC" } else { "ASC" };
    sqlx::query_as::<_, CourseWithTeacher>(&format!(
        "SELECT c.id, c.title, c.description, c.teacher_id, c.created_at,
                u.name AS teacher_name, u.email AS teacher_email
         FROM courses c
         LEFT JOIN users u ON u.id = c.teacher_id
         ORDER BY c.created_at {order}",
    ))
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_by_teacher(
    pool: &PgPool,
    teacher_id: &str,
) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        "SELECT {COLUMNS} FROM courses WHERE teacher_id = $1 ORDER BY created_at"
    ))
    .bind(teacher_id)
    .fetch_all(pool)
    .await
}

/// Courses the student is enrolled in, in enrollment order. Enrollments that
/// point at a deleted course simply drop out of the join.
pub(crate) async fn list_enrolled_for_student(
    pool: &PgPool,
    student_id: &str,
) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT c.id, c.title, c.description, c.teacher_id, c.created_at
         FROM enrollments e
         JOIN courses c ON c.id = e.course_id
         WHERE e.student_id = $1
         ORDER BY e.created_at",
    )
    .bind(student_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn enrollment_counts(
    pool: &PgPool,
) -> Result<Vec<CourseEnrollmentCount>, sqlx::Error> {
    sqlx::query_as::<_, CourseEnrollmentCount>(
        "SELECT c.id AS course_id, c.title AS course_name,
                (SELECT COUNT(*) FROM enrollments e WHERE e.course_id = c.id) AS student_count
         FROM courses c
         ORDER BY c.created_at",
    )
    .fetch_all(pool)
    .await
}

pub(crate) async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses").fetch_one(pool).await
}

pub(crate) async fn count_by_teacher(pool: &PgPool, teacher_id: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses WHERE teacher_id = $1")
        .bind(teacher_id)
        .fetch_one(pool)
        .await
}
