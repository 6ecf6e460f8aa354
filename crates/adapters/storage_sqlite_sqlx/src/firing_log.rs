//! `SQLite` implementation of [`FiringLog`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use auditflow_app::ports::FiringLog;
use auditflow_domain::error::WorkflowError;
use auditflow_domain::firing::{ActionResult, FiringRecord};
use auditflow_domain::id::{EventId, FiringId, RuleId};

use crate::error::StorageError;

struct Wrapper(FiringRecord);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let rule_id: String = row.try_get("rule_id")?;
        let event_id: String = row.try_get("event_id")?;
        let matched_at: String = row.try_get("matched_at")?;
        let results_json: String = row.try_get("action_results")?;

        let id = FiringId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let rule_id =
            RuleId::from_str(&rule_id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let event_id =
            EventId::from_str(&event_id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let matched_at = chrono::DateTime::parse_from_rfc3339(&matched_at)
            .map(|dt| dt.to_utc())
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let action_results: Vec<ActionResult> = serde_json::from_str(&results_json)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(FiringRecord {
            id,
            rule_id,
            event_id,
            matched_at,
            action_results,
        }))
    }
}

/// `SQLite`-backed execution log.
///
/// Rows are only ever inserted; there is no update or delete path.
pub struct SqliteFiringLog {
    pool: SqlitePool,
}

impl SqliteFiringLog {
    /// Create a new log backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl FiringLog for SqliteFiringLog {
    async fn record(&self, firing: FiringRecord) -> Result<FiringRecord, WorkflowError> {
        let results_json =
            serde_json::to_string(&firing.action_results).map_err(StorageError::from)?;

        sqlx::query(
            "INSERT INTO firings (id, rule_id, event_id, matched_at, action_results) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(firing.id.to_string())
        .bind(firing.rule_id.to_string())
        .bind(firing.event_id.to_string())
        .bind(firing.matched_at.to_rfc3339())
        .bind(&results_json)
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        Ok(firing)
    }

    async fn get_recent(&self, limit: usize) -> Result<Vec<FiringRecord>, WorkflowError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<Wrapper> =
            sqlx::query_as("SELECT * FROM firings ORDER BY rowid DESC LIMIT ?")
                .bind(limit)
                .fetch_all(&self.pool)
                .await
                .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn find_by_rule(
        &self,
        rule_id: RuleId,
        limit: usize,
    ) -> Result<Vec<FiringRecord>, WorkflowError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<Wrapper> =
            sqlx::query_as("SELECT * FROM firings WHERE rule_id = ? ORDER BY rowid DESC LIMIT ?")
                .bind(rule_id.to_string())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
                .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}
