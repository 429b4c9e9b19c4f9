//! Database bootstrap: ensure the database and the food_scales table exist.

use crate::error::AppError;
use crate::sql::TABLE;
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// Idempotent DDL for the food_scales table and its full-text index.
/// The dimensions CHECK keeps every persisted row at exactly 3 values.
pub async fn ensure_scales_table(pool: &PgPool) -> Result<(), AppError> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {TABLE} (
            id BIGSERIAL PRIMARY KEY,
            model TEXT NOT NULL,
            price DOUBLE PRECISION NOT NULL DEFAULT 1,
            year INTEGER NOT NULL,
            dimensions DOUBLE PRECISION[] NOT NULL CHECK (array_length(dimensions, 1) = 3),
            runtime INTEGER NOT NULL CHECK (runtime > 0),
            version INTEGER NOT NULL DEFAULT 1
        )
        "#
    );
    sqlx::query(&ddl).execute(pool).await?;

    let index = format!(
        "CREATE INDEX IF NOT EXISTS {TABLE}_model_idx ON {TABLE} USING GIN (to_tsvector('simple', model))"
    );
    sqlx::query(&index).execute(pool).await?;

    Ok(())
}

/// Ensure the database named in `database_url` exists; create it if not.
/// Connects to the default `postgres` database to run CREATE DATABASE.
/// Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let opts = PgConnectOptions::from_str(database_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let Some(db_name) = opts.get_database().map(str::to_string) else {
        return Ok(());
    };
    if db_name == "postgres" {
        return Ok(());
    }

    let mut conn = opts.database("postgres").connect().await.map_err(AppError::Db)?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await
            .map_err(AppError::Db)?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await
            .map_err(AppError::Db)?;
    }
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
