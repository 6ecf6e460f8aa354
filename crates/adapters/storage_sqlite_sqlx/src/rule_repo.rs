//! `SQLite` implementation of [`RuleRepository`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use auditflow_app::ports::RuleRepository;
use auditflow_domain::error::WorkflowError;
use auditflow_domain::id::RuleId;
use auditflow_domain::rule::{Action, Trigger, WorkflowRule};

use crate::error::StorageError;

struct Wrapper(WorkflowRule);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<WorkflowRule> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let description: String = row.try_get("description")?;
        let enabled: bool = row.try_get("enabled")?;
        let trigger_json: String = row.try_get("trigger_data")?;
        let actions_json: String = row.try_get("actions")?;

        let id = RuleId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let trigger: Trigger = serde_json::from_str(&trigger_json)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let actions: Vec<Action> = serde_json::from_str(&actions_json)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(WorkflowRule {
            id,
            name,
            description,
            enabled,
            trigger,
            actions,
        }))
    }
}

/// `SQLite`-backed rule catalogue.
///
/// Insertion order is preserved through `rowid`, so listing queries never
/// reorder the catalogue.
pub struct SqliteRuleRepository {
    pool: SqlitePool,
}

impl SqliteRuleRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl RuleRepository for SqliteRuleRepository {
    async fn create(&self, rule: WorkflowRule) -> Result<WorkflowRule, WorkflowError> {
        let trigger_json = serde_json::to_string(&rule.trigger).map_err(StorageError::from)?;
        let actions_json = serde_json::to_string(&rule.actions).map_err(StorageError::from)?;

        sqlx::query(
            "INSERT INTO workflow_rules (id, name, description, enabled, trigger_data, actions) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(rule.id.to_string())
        .bind(&rule.name)
        .bind(&rule.description)
        .bind(rule.enabled)
        .bind(&trigger_json)
        .bind(&actions_json)
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        Ok(rule)
    }

    async fn get_by_id(&self, id: RuleId) -> Result<Option<WorkflowRule>, WorkflowError> {
        let row: Option<Wrapper> = sqlx::query_as("SELECT * FROM workflow_rules WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<WorkflowRule>, WorkflowError> {
        let rows: Vec<Wrapper> = sqlx::query_as("SELECT * FROM workflow_rules ORDER BY rowid")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn get_enabled(&self) -> Result<Vec<WorkflowRule>, WorkflowError> {
        let rows: Vec<Wrapper> =
            sqlx::query_as("SELECT * FROM workflow_rules WHERE enabled = 1 ORDER BY rowid")
                .fetch_all(&self.pool)
                .await
                .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, rule: WorkflowRule) -> Result<WorkflowRule, WorkflowError> {
        let trigger_json = serde_json::to_string(&rule.trigger).map_err(StorageError::from)?;
        let actions_json = serde_json::to_string(&rule.actions).map_err(StorageError::from)?;

        sqlx::query(
            "UPDATE workflow_rules SET name = ?, description = ?, enabled = ?, trigger_data = ?, actions = ? WHERE id = ?",
        )
        .bind(&rule.name)
        .bind(&rule.description)
        .bind(rule.enabled)
        .bind(&trigger_json)
        .bind(&actions_json)
        .bind(rule.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        Ok(rule)
    }

    async fn delete(&self, id: RuleId) -> Result<(), WorkflowError> {
        sqlx::query("DELETE FROM workflow_rules WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}
