//! Milestone record and its Postgres store.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use milestone_board_core::MilestoneId;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use std::str::FromStr;

use super::{MilestoneStore, StoreError};

/// A persisted milestone: a dated, titled event record.
///
/// Title and event date are always present on a persisted record; all other
/// fields are optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Server-assigned stable ID.
    pub id: MilestoneId,
    /// Title, non-empty and at most 200 characters.
    pub title: String,
    /// Optional description, at most 2000 characters.
    pub description: Option<String>,
    /// The calendar date of the event.
    pub event_date: NaiveDate,
    /// Optional image URL (well-formed absolute URL).
    pub image_url: Option<String>,
    /// When created.
    pub created_at: DateTime<Utc>,
    /// When last updated.
    pub updated_at: DateTime<Utc>,
}

impl Milestone {
    /// Creates a new milestone record with a fresh ID.
    #[must_use]
    pub fn new(
        title: String,
        description: Option<String>,
        event_date: NaiveDate,
        image_url: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: MilestoneId::new(),
            title,
            description,
            event_date,
            image_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces all editable fields (full replace, not a partial patch).
    pub fn replace_fields(
        &mut self,
        title: String,
        description: Option<String>,
        event_date: NaiveDate,
        image_url: Option<String>,
    ) {
        self.title = title;
        self.description = description;
        self.event_date = event_date;
        self.image_url = image_url;
        self.updated_at = Utc::now();
    }
}

/// Row type for milestone queries.
#[derive(FromRow)]
struct MilestoneRow {
    id: String,
    title: String,
    description: Option<String>,
    event_date: NaiveDate,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MilestoneRow {
    fn try_into_record(self) -> Result<Milestone, sqlx::Error> {
        let id = MilestoneId::from_str(&self.id).map_err(|e| {
            sqlx::Error::Decode(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid milestone id '{}': {}", self.id, e),
            )))
        })?;
        Ok(Milestone {
            id,
            title: self.title,
            description: self.description,
            event_date: self.event_date,
            image_url: self.image_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Postgres-backed milestone store.
pub struct PgMilestoneStore {
    pool: PgPool,
}

impl PgMilestoneStore {
    /// Creates a new store over the given pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MilestoneStore for PgMilestoneStore {
    async fn list(&self) -> Result<Vec<Milestone>, StoreError> {
        let rows: Vec<MilestoneRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, event_date, image_url, created_at, updated_at
            FROM milestones
            ORDER BY event_date DESC, created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|r| r.try_into_record().map_err(StoreError::from))
            .collect()
    }

    async fn find(&self, id: MilestoneId) -> Result<Option<Milestone>, StoreError> {
        let row: Option<MilestoneRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, event_date, image_url, created_at, updated_at
            FROM milestones
            WHERE id = $1
            "#,
        )
        .bind(id.as_ulid().to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(r.try_into_record()?)),
            None => Ok(None),
        }
    }

    async fn create(&self, milestone: &Milestone) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO milestones (id, title, description, event_date, image_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(milestone.id.as_ulid().to_string())
        .bind(&milestone.title)
        .bind(&milestone.description)
        .bind(milestone.event_date)
        .bind(&milestone.image_url)
        .bind(milestone.created_at)
        .bind(milestone.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, milestone: &Milestone) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE milestones
            SET title = $2, description = $3, event_date = $4, image_url = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(milestone.id.as_ulid().to_string())
        .bind(&milestone.title)
        .bind(&milestone.description)
        .bind(milestone.event_date)
        .bind(&milestone.image_url)
        .bind(milestone.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: MilestoneId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM milestones WHERE id = $1")
            .bind(id.as_ulid().to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
