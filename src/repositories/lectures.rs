use sqlx::PgPool;

use crate::db::models::Lecture;

const COLUMNS: &str = "id, course_id, title, video_url, sort_order, created_at";

pub(crate) struct CreateLecture<'a> {
    pub(crate) id: &'a str,
    pub(crate) course_id: &'a str,
    pub(crate) title: &'a str,
    pub(crate) video_url: &'a str,
    pub(crate) sort_order: i32,
    pub(crate) created_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateLecture<'_>,
) -> Result<Lecture, sqlx::Error> {
    sqlx::query_as::<_, Lecture>(&format!(
        "INSERT INTO lectures (id, course_id, title, video_url, sort_order, created_at)
         VALUES ($1,$2,$3,$4,$5,$6)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.course_id)
    .bind(params.title)
    .bind(params.video_url)
    .bind(params.sort_order)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn list_for_course(
    pool: &PgPool,
    course_id: &str,
) -> Result<Vec<Lecture>, sqlx::Error> {
    sqlx::query_as::<_, Lecture>(&format!(
        "SELECT {COLUMNS} FROM lectures WHERE course_id = $1 ORDER BY sort_order, created_at"
    ))
    .bind(course_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn count_for_course(pool: &PgPool, course_id: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM lectures WHERE course_id = $1")
        .bind(course_id)
        .fetch_one(pool)
        .await
}
