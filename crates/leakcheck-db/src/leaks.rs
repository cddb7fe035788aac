//! Leaked identifier records and exact-match lookup.

use crate::breaches::row_to_record;
use crate::error::Result;
use leakcheck_core::{BreachRecord, LeakResult, QueryKind};
use sqlx::{Pool, Sqlite};

/// Record that `value` of `kind` appeared in breach `breach_id`.
///
/// Returns `false` if the identifier was already recorded for that breach.
pub async fn record_leak(
    pool: &Pool<Sqlite>,
    breach_id: i64,
    kind: QueryKind,
    value: &str,
) -> Result<bool> {
    let added_at = chrono::Utc::now().to_rfc3339();

    let result = sqlx::query(
        "INSERT OR IGNORE INTO leaked_data (breach_id, data_type, data_value, added_at)
         VALUES (?, ?, ?, ?)",
    )
    .bind(breach_id)
    .bind(kind.as_str())
    .bind(value)
    .bind(&added_at)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Breaches in which `value` of `kind` appears, most recent first.
///
/// Matching is exact; callers pass the already-trimmed identifier.
pub async fn matching_breaches(
    pool: &Pool<Sqlite>,
    kind: QueryKind,
    value: &str,
) -> Result<Vec<BreachRecord>> {
    let rows = sqlx::query(
        "SELECT b.id, b.name, b.date, b.records, b.description
         FROM leaked_data ld
         JOIN breaches b ON ld.breach_id = b.id
         WHERE ld.data_type = ? AND ld.data_value = ?
         ORDER BY b.date DESC, b.id ASC",
    )
    .bind(kind.as_str())
    .bind(value)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(row_to_record).collect())
}

/// Classify `value` by the number of breaches it appears in.
pub async fn lookup(pool: &Pool<Sqlite>, kind: QueryKind, value: &str) -> Result<LeakResult> {
    let breaches = matching_breaches(pool, kind, value).await?;
    let labels = breaches.iter().map(BreachRecord::label).collect();
    Ok(LeakResult::from_breach_labels(labels))
}
