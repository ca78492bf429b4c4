use sqlx::PgPool;

use crate::db::models::User;
use crate::db::types::UserRole;

const COLUMNS: &str = "id, name, email, hashed_password, role, email_verified, auth_provider, created_at";

pub(crate) struct CreateUser<'a> {
    pub(crate) id: &'a str,
    pub(crate) name: &'a str,
    pub(crate) email: &'a str,
    pub(crate) hashed_password: &'a str,
    pub(crate) role: UserRole,
    pub(crate) email_verified: bool,
    pub(crate) auth_provider: &'a str,
    pub(crate) created_at: time::PrimitiveDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct TeacherWithCourseCount {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) course_count: i64,
    pub(crate) created_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(pool: &PgPool, params: CreateUser<'_>) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (
            id, name, email, hashed_password, role, email_verified, auth_provider, created_at
         ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.name)
    .bind(params.email)
    .bind(params.hashed_password)
    .bind(params.role)
    .bind(params.email_verified)
    .bind(params.auth_provider)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE email = $1"))
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn list_newest_first(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC"))
        .fetch_all(pool)
        .await
}

pub(crate) async fn list_teachers_with_course_count(
    pool: &PgPool,
) -> Result<Vec<TeacherWithCourseCount>, sqlx::Error> {
    sqlx::query_as::<_, TeacherWithCourseCount>(
        "SELECT u.id, u.name, u.email, u.created_at,
                (SELECT COUNT(*) FROM courses c WHERE c.teacher_id = u.id) AS course_count
         FROM users u
         WHERE u.role = $1
         ORDER BY u.created_at DESC",
    )
    .bind(UserRole::Teacher)
    .fetch_all(pool)
    .await
}

pub(crate) async fn update_role(
    pool: &PgPool,
    id: &str,
    role: UserRole,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET role = $1 WHERE id = $2 RETURNING {COLUMNS}"
    ))
    .bind(role)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn repair_admin(
    pool: &PgPool,
    id: &str,
    hashed_password: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE users SET hashed_password = $1, role = $2, email_verified = TRUE WHERE id = $3",
    )
    .bind(hashed_password)
    .bind(UserRole::Admin)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

pub(crate) async fn delete(pool: &PgPool, id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("DELETE FROM users WHERE id = $1 RETURNING {COLUMNS}"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users").fetch_one(pool).await
}

pub(crate) async fn count_by_role(pool: &PgPool, role: UserRole) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = $1")
        .bind(role)
        .fetch_one(pool)
        .await
}
