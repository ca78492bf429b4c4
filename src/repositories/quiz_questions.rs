use sqlx::PgPool;

use crate::db::models::QuizQuestion;

const COLUMNS: &str = "id, quiz_id, question_text, options, correct_answer, created_at";

pub(crate) struct CreateQuestion<'a> {
    pub(crate) id: &'a str,
    pub(crate) quiz_id: &'a str,
    pub(crate) question_text: &'a str,
    pub(crate) options: &'a [String],
    pub(crate) correct_answer: &'a str,
    pub(crate) created_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateQuestion<'_>,
) -> Result<QuizQuestion, sqlx::Error> {
    sqlx::query_as::<_, QuizQuestion>(&format!(
        "INSERT INTO quiz_questions (id, quiz_id, question_text, options, correct_answer, created_at)
         VALUES ($1,$2,$3,$4,$5,$6)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.quiz_id)
    .bind(params.question_text)
    .bind(params.options)
    .bind(params.correct_answer)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn list_for_quiz(
    pool: &PgPool,
    quiz_id: &str,
) -> Result<Vec<QuizQuestion>, sqlx::Error> {
    sqlx::query_as::<_, QuizQuestion>(&format!(
        "SELECT {COLUMNS} FROM quiz_questions WHERE quiz_id = $1 ORDER BY created_at"
    ))
    .bind(quiz_id)
    .fetch_all(pool)
    .await
}

#[cfg(test)]
pub(crate) async fn count_for_quiz(pool: &PgPool, quiz_id: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM quiz_questions WHERE quiz_id = $1")
        .bind(quiz_id)
        .fetch_one(pool)
        .await
}
