//! Breach catalogue operations.
//!
//! CRUD for the `breaches` table: one row per known breach incident.

use crate::error::{DatabaseError, Result};
use leakcheck_core::BreachRecord;
use sqlx::{Pool, Row, Sqlite};

/// Parameters for cataloguing a breach.
#[derive(Debug, Clone)]
pub struct NewBreach {
    /// Service name
    pub name: String,
    /// Free-text incident date
    pub date: String,
    /// Number of affected records
    pub records: i64,
    /// Description
    pub description: Option<String>,
}

impl NewBreach {
    /// Breach with no description.
    #[must_use]
    pub fn new(name: impl Into<String>, date: impl Into<String>, records: i64) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            records,
            description: None,
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

pub(crate) fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> BreachRecord {
    BreachRecord {
        id: row.get("id"),
        name: row.get("name"),
        date: row.get("date"),
        records: row.get("records"),
        description: row.get("description"),
    }
}

/// Insert a breach and return the stored record.
pub async fn insert_breach(pool: &Pool<Sqlite>, params: NewBreach) -> Result<BreachRecord> {
    let id = sqlx::query(
        "INSERT INTO breaches (name, date, records, description) VALUES (?, ?, ?, ?)",
    )
    .bind(&params.name)
    .bind(&params.date)
    .bind(params.records)
    .bind(&params.description)
    .execute(pool)
    .await?
    .last_insert_rowid();

    tracing::debug!("Catalogued breach {} {} as #{}", params.name, params.date, id);

    Ok(BreachRecord {
        id,
        name: params.name,
        date: params.date,
        records: params.records,
        description: params.description,
    })
}

/// List every catalogued breach, most recent first.
pub async fn list_breaches(pool: &Pool<Sqlite>) -> Result<Vec<BreachRecord>> {
    let rows = sqlx::query(
        "SELECT id, name, date, records, description
         FROM breaches
         ORDER BY date DESC, id ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(row_to_record).collect())
}

/// Fetch one breach by id.
pub async fn get_breach(pool: &Pool<Sqlite>, id: i64) -> Result<BreachRecord> {
    let row = sqlx::query(
        "SELECT id, name, date, records, description FROM breaches WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFoundWithMessage(format!("Breach #{id} not found")))?;

    Ok(row_to_record(&row))
}

/// Delete a breach and, through the foreign key, its leaked identifiers.
pub async fn delete_breach(pool: &Pool<Sqlite>, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM breaches WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFoundWithMessage(format!(
            "Breach #{id} not found"
        )));
    }
    Ok(())
}
