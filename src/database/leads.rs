// ABOUTME: Lead insert and read operations on the append-only leads table
// ABOUTME: Assigns ids and UTC timestamps at insert time; rows are never updated

use super::LeadStore;
use avatar_leads_core::errors::{AppError, AppResult};
use avatar_leads_core::models::{Lead, LeadId, NewLead};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::time::Instant;
use tracing::debug;

const LEAD_COLUMNS: &str =
    "id, conversation_id, name, email, phone, company, source, extra, created_at";

impl LeadStore {
    /// Persist a lead and return its newly assigned id
    ///
    /// Duplicate inserts (same conversation, same fields) are stored as
    /// separate rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata cannot be encoded or the insert fails
    pub async fn save_lead(&self, lead: &NewLead) -> AppResult<LeadId> {
        Ok(self.insert_lead(lead).await?.id)
    }

    /// Persist a lead and return the stored row
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata cannot be encoded or the insert fails
    pub async fn insert_lead(&self, lead: &NewLead) -> AppResult<Lead> {
        let started = Instant::now();
        let created_at = Utc::now();
        let extra = serde_json::to_string(&lead.extra)?;

        let result = sqlx::query(
            r"
            INSERT INTO leads (conversation_id, name, email, phone, company, source, extra, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(lead.conversation_id.as_deref())
        .bind(lead.name.as_deref())
        .bind(lead.email.as_deref())
        .bind(lead.phone.as_deref())
        .bind(lead.company.as_deref())
        .bind(&lead.source)
        .bind(&extra)
        .bind(created_at.to_rfc3339_opts(SecondsFormat::Millis, true))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert lead: {e}")))?;

        let id = LeadId::new(result.last_insert_rowid());
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        debug!(
            db.operation = "insert",
            db.table = "leads",
            lead.id = %id,
            conversation.id = lead.conversation_id.as_deref().unwrap_or("none"),
            db.duration_ms = elapsed_ms,
            "Lead stored"
        );

        Ok(Lead {
            id,
            conversation_id: lead.conversation_id.clone(),
            name: lead.name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            company: lead.company.clone(),
            source: Some(lead.source.clone()),
            extra: lead.extra.clone(),
            created_at,
        })
    }

    /// Fetch a single lead by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed
    pub async fn get_lead(&self, id: LeadId) -> AppResult<Option<Lead>> {
        let row = sqlx::query(&format!("SELECT {LEAD_COLUMNS} FROM leads WHERE id = $1"))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to fetch lead {id}: {e}")))?;

        row.as_ref().map(row_to_lead).transpose()
    }

    /// Most recent leads first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed
    pub async fn list_leads(&self, limit: u32) -> AppResult<Vec<Lead>> {
        let rows = sqlx::query(&format!(
            "SELECT {LEAD_COLUMNS} FROM leads ORDER BY id DESC LIMIT $1"
        ))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list leads: {e}")))?;

        rows.iter().map(row_to_lead).collect()
    }

    /// Every lead captured from one conversation, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed
    pub async fn leads_for_conversation(&self, conversation_id: &str) -> AppResult<Vec<Lead>> {
        let rows = sqlx::query(&format!(
            "SELECT {LEAD_COLUMNS} FROM leads WHERE conversation_id = $1 ORDER BY id ASC"
        ))
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::database(format!(
                "Failed to list leads for conversation {conversation_id}: {e}"
            ))
        })?;

        rows.iter().map(row_to_lead).collect()
    }

    /// Number of stored leads
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_leads(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM leads")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count leads: {e}")))
    }
}

fn row_to_lead(row: &SqliteRow) -> AppResult<Lead> {
    let column = |e: sqlx::Error| AppError::database(format!("Malformed lead row: {e}"));

    let extra = row
        .try_get::<Option<String>, _>("extra")
        .map_err(column)?
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| serde_json::from_str::<Map<String, Value>>(&raw))
        .transpose()?
        .unwrap_or_default();

    let created_at: String = row.try_get("created_at").map_err(column)?;

    Ok(Lead {
        id: LeadId::new(row.try_get("id").map_err(column)?),
        conversation_id: row.try_get("conversation_id").map_err(column)?,
        name: row.try_get("name").map_err(column)?,
        email: row.try_get("email").map_err(column)?,
        phone: row.try_get("phone").map_err(column)?,
        company: row.try_get("company").map_err(column)?,
        source: row.try_get("source").map_err(column)?,
        extra,
        created_at: parse_timestamp(&created_at)?,
    })
}

/// Accept RFC 3339 plus the offset-less forms older writers produced (UTC assumed)
fn parse_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::database(format!("Unrecognised lead timestamp '{raw}'")))
}
