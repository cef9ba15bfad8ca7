//! Serial Registry Database Queries
//!
//! All serial-related database operations. Uses runtime queries
//! (`sqlx::query` / `sqlx::query_as`) to avoid requiring a live database at
//! compile time. Column names are quoted because the historical schema uses
//! mixed case.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::types::SerialRecord;

/// Look up a serial. Bounded to one row by the primary key.
pub async fn find_serial(pool: &PgPool, serial_id: &str) -> sqlx::Result<Option<SerialRecord>> {
    sqlx::query_as::<_, SerialRecord>(
        r#"
        SELECT "serialID", "Time"
        FROM "NewTable"
        WHERE "serialID" = $1
        LIMIT 1
        "#,
    )
    .bind(serial_id)
    .fetch_optional(pool)
    .await
}

/// Insert a serial with its registration timestamp.
///
/// Returns `true` when the row was inserted. `ON CONFLICT DO NOTHING` makes
/// concurrent registrations of the same serial race-free: exactly one caller
/// observes `true`, the rest fall through to the already-registered path.
pub async fn insert_serial(
    pool: &PgPool,
    serial_id: &str,
    registered_at: DateTime<Utc>,
) -> sqlx::Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO "NewTable" ("serialID", "Time")
        VALUES ($1, $2)
        ON CONFLICT ("serialID") DO NOTHING
        "#,
    )
    .bind(serial_id)
    .bind(registered_at)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a serial. Returns `true` when a row was removed.
pub async fn delete_serial(pool: &PgPool, serial_id: &str) -> sqlx::Result<bool> {
    let result = sqlx::query(r#"DELETE FROM "NewTable" WHERE "serialID" = $1"#)
        .bind(serial_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
