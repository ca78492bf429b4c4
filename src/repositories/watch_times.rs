use sqlx::PgPool;

use crate::db::models::WatchTime;

const COLUMNS: &str = "id, student_id, lecture_id, position_seconds, updated_at";

pub(crate) struct UpsertWatchTime<'a> {
    pub(crate) id: &'a str,
    pub(crate) student_id: &'a str,
    pub(crate) lecture_id: &'a str,
    pub(crate) position_seconds: f64,
    pub(crate) updated_at: time::PrimitiveDateTime,
}

/// Saved row plus whether this call created it (`xmax = 0` on a fresh insert).
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UpsertedWatchTime {
    #[sqlx(flatten)]
    pub(crate) watch_time: WatchTime,
    pub(crate) inserted: bool,
}

pub(crate) async fn upsert(
    pool: &PgPool,
    params: UpsertWatchTime<'_>,
) -> Result<UpsertedWatchTime, sqlx::Error> {
    sqlx::query_as::<_, UpsertedWatchTime>(&format!(
        "INSERT INTO watch_times (id, student_id, lecture_id, position_seconds, updated_at)
         VALUES ($1,$2,$3,$4,$5)
         ON CONFLICT (student_id, lecture_id) DO UPDATE
         SET position_seconds = EXCLUDED.position_seconds,
             updated_at = EXCLUDED.updated_at
         RETURNING {COLUMNS}, (xmax = 0) AS inserted",
    ))
    .bind(params.id)
    .bind(params.student_id)
    .bind(params.lecture_id)
    .bind(params.position_seconds)
    .bind(params.updated_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_for_student_lecture(
    pool: &PgPool,
    student_id: &str,
    lecture_id: &str,
) -> Result<Option<WatchTime>, sqlx::Error> {
    sqlx::query_as::<_, WatchTime>(&format!(
        "SELECT {COLUMNS} FROM watch_times WHERE student_id = $1 AND lecture_id = $2"
    ))
    .bind(student_id)
    .bind(lecture_id)
    .fetch_optional(pool)
    .await
}

/// Lectures of the course that have at least one watch-time row for the
/// student, whatever the saved position.
pub(crate) async fn count_watched_in_course(
    pool: &PgPool,
    student_id: &str,
    course_id: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(DISTINCT w.lecture_id)
         FROM watch_times w
         WHERE w.student_id = $1
           AND w.lecture_id IN (SELECT l.id FROM lectures l WHERE l.course_id = $2)",
    )
    .bind(student_id)
    .bind(course_id)
    .fetch_one(pool)
    .await
}
