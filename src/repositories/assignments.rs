use sqlx::PgPool;

use crate::db::models::Assignment;

const COLUMNS: &str = "id, title, description, course_id, created_by, due_date, created_at";

pub(crate) struct CreateAssignment<'a> {
    pub(crate) id: &'a str,
    pub(crate) title: &'a str,
    pub(crate) description: &'a str,
    pub(crate) course_id: &'a str,
    pub(crate) created_by: &'a str,
    pub(crate) due_date: time::PrimitiveDateTime,
    pub(crate) created_at: time::PrimitiveDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct AssignmentWithTeacher {
    #[sqlx(flatten)]
    pub(crate) assignment: Assignment,
    pub(crate) teacher_name: Option<String>,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateAssignment<'_>,
) -> Result<Assignment, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(&format!(
        "INSERT INTO assignments (id, title, description, course_id, created_by, due_date, created_at)
         VALUES ($1,$2,$3,$4,$5,$6,$7)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.title)
    .bind(params.description)
    .bind(params.course_id)
    .bind(params.created_by)
    .bind(params.due_date)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_by_id(
    pool: &PgPool,
    assignment_id: &str,
) -> Result<Option<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(&format!("SELECT {COLUMNS} FROM assignments WHERE id = $1"))
        .bind(assignment_id)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn list_for_course_with_teacher(
    pool: &PgPool,
    course_id: &str,
) -> Result<Vec<AssignmentWithTeacher>, sqlx::Error> {
    sqlx::query_as::<_, AssignmentWithTeacher>(
        "SELECT a.id, a.title, a.description, a.course_id, a.created_by, a.due_date, a.created_at,
                u.name AS teacher_name
         FROM assignments a
         LEFT JOIN users u ON u.id = a.created_by
         WHERE a.course_id = $1
         ORDER BY a.due_date, a.created_at",
    )
    .bind(course_id)
    .fetch_all(pool)
    .await
}
