use sqlx::PgPool;

/// Round-trips to the database and returns the server version it reports.
pub(crate) async fn database_version(pool: &PgPool) -> Result<String, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SHOW server_version").fetch_one(pool).await
}
