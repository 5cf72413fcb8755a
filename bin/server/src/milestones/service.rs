//! Mutation service for milestone records.
//!
//! Preconditions for every operation: the caller has already passed the
//! authorization gate with administrator privilege. The service enforces the
//! field invariants before persistence and reports violations as typed
//! results, never as faults.

use milestone_board_core::MilestoneId;
use std::sync::Arc;

use crate::db::{Milestone, MilestoneStore};
use crate::error::MilestoneError;
use crate::milestones::form::MilestoneDraft;

/// Gated create/update/delete operations over the milestone store.
#[derive(Clone)]
pub struct MilestoneService {
    store: Arc<dyn MilestoneStore>,
}

impl MilestoneService {
    /// Creates a service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn MilestoneStore>) -> Self {
        Self { store }
    }

    /// Lists milestones, newest event first.
    pub async fn list(&self) -> Result<Vec<Milestone>, MilestoneError> {
        Ok(self.store.list().await?)
    }

    /// Fetches one milestone.
    ///
    /// # Errors
    ///
    /// Returns [`MilestoneError::NotFound`] when the id does not exist.
    pub async fn fetch(&self, id: MilestoneId) -> Result<Milestone, MilestoneError> {
        self.store
            .find(id)
            .await?
            .ok_or_else(|| MilestoneError::NotFound { id: id.to_string() })
    }

    /// Validates and persists a new milestone.
    pub async fn create(&self, draft: MilestoneDraft) -> Result<Milestone, MilestoneError> {
        let fields = draft
            .normalize()
            .map_err(|errors| MilestoneError::ValidationFailed { errors })?;

        let milestone = Milestone::new(
            fields.title,
            fields.description,
            fields.event_date,
            fields.image_url,
        );
        self.store.create(&milestone).await?;

        tracing::info!(milestone_id = %milestone.id, "milestone created");
        Ok(milestone)
    }

    /// Validates the draft and fully replaces the editable fields of an
    /// existing milestone.
    pub async fn update(
        &self,
        id: MilestoneId,
        draft: MilestoneDraft,
    ) -> Result<Milestone, MilestoneError> {
        let mut milestone = self.fetch(id).await?;

        let fields = draft
            .normalize()
            .map_err(|errors| MilestoneError::ValidationFailed { errors })?;

        milestone.replace_fields(
            fields.title,
            fields.description,
            fields.event_date,
            fields.image_url,
        );

        if !self.store.update(&milestone).await? {
            // The record vanished between the load and the write.
            return Err(MilestoneError::NotFound { id: id.to_string() });
        }

        tracing::info!(milestone_id = %milestone.id, "milestone updated");
        Ok(milestone)
    }

    /// Deletes a milestone. Irreversible; confirmation is a UI concern.
    pub async fn delete(&self, id: MilestoneId) -> Result<(), MilestoneError> {
        if !self.store.delete(id).await? {
            return Err(MilestoneError::NotFound { id: id.to_string() });
        }

        tracing::info!(milestone_id = %id, "milestone deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::StoreError;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    /// In-memory store for exercising the service without a database.
    #[derive(Default)]
    struct InMemoryStore {
        records: Mutex<Vec<Milestone>>,
    }

    #[async_trait]
    impl MilestoneStore for InMemoryStore {
        async fn list(&self) -> Result<Vec<Milestone>, StoreError> {
            let mut records = self.records.lock().expect("lock").clone();
            records.sort_by(|a, b| {
                b.event_date
                    .cmp(&a.event_date)
                    .then(b.created_at.cmp(&a.created_at))
            });
            Ok(records)
        }

        async fn find(&self, id: MilestoneId) -> Result<Option<Milestone>, StoreError> {
            Ok(self
                .records
                .lock()
                .expect("lock")
                .iter()
                .find(|m| m.id == id)
                .cloned())
        }

        async fn create(&self, milestone: &Milestone) -> Result<(), StoreError> {
            self.records.lock().expect("lock").push(milestone.clone());
            Ok(())
        }

        async fn update(&self, milestone: &Milestone) -> Result<bool, StoreError> {
            let mut records = self.records.lock().expect("lock");
            match records.iter_mut().find(|m| m.id == milestone.id) {
                Some(existing) => {
                    *existing = milestone.clone();
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn delete(&self, id: MilestoneId) -> Result<bool, StoreError> {
            let mut records = self.records.lock().expect("lock");
            let before = records.len();
            records.retain(|m| m.id != id);
            Ok(records.len() < before)
        }
    }

    fn service() -> MilestoneService {
        MilestoneService::new(Arc::new(InMemoryStore::default()))
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid date")
    }

    #[tokio::test]
    async fn create_then_fetch_round_trips_submitted_values() {
        let service = service();
        let created = service
            .create(MilestoneDraft {
                title: "Church anniversary".to_string(),
                description: Some("50 years".to_string()),
                event_date: Some(date("2026-03-14")),
                image_url: Some("https://example.com/photo.jpg".to_string()),
            })
            .await
            .expect("should create");

        let fetched = service.fetch(created.id).await.expect("should fetch");
        assert_eq!(fetched.title, "Church anniversary");
        assert_eq!(fetched.description.as_deref(), Some("50 years"));
        assert_eq!(fetched.event_date, date("2026-03-14"));
        assert_eq!(
            fetched.image_url.as_deref(),
            Some("https://example.com/photo.jpg")
        );
    }

    #[tokio::test]
    async fn create_with_no_optionals_stores_them_absent() {
        let service = service();
        let created = service
            .create(MilestoneDraft {
                title: "Ibadah Natal 2025".to_string(),
                description: None,
                event_date: Some(date("2025-12-25")),
                image_url: None,
            })
            .await
            .expect("should create");

        assert_eq!(created.title, "Ibadah Natal 2025");
        assert_eq!(created.event_date, date("2025-12-25"));
        assert_eq!(created.description, None);
        assert_eq!(created.image_url, None);
    }

    #[tokio::test]
    async fn create_normalizes_empty_optionals_to_absent() {
        let service = service();
        let created = service
            .create(MilestoneDraft {
                title: "Launch".to_string(),
                description: Some("  ".to_string()),
                event_date: Some(date("2025-06-01")),
                image_url: Some(String::new()),
            })
            .await
            .expect("should create");

        assert_eq!(created.description, None);
        assert_eq!(created.image_url, None);
    }

    #[tokio::test]
    async fn invalid_draft_is_rejected_without_persisting() {
        let service = service();
        let err = service
            .create(MilestoneDraft {
                title: String::new(),
                description: None,
                event_date: None,
                image_url: Some("not a url".to_string()),
            })
            .await
            .unwrap_err();

        match err {
            MilestoneError::ValidationFailed { errors } => {
                assert!(errors.contains_key("title"));
                assert!(errors.contains_key("event_date"));
                assert!(errors.contains_key("image_url"));
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert!(service.list().await.expect("should list").is_empty());
    }

    #[tokio::test]
    async fn update_fully_replaces_editable_fields() {
        let service = service();
        let created = service
            .create(MilestoneDraft {
                title: "Old".to_string(),
                description: Some("old description".to_string()),
                event_date: Some(date("2025-01-01")),
                image_url: Some("https://example.com/old.jpg".to_string()),
            })
            .await
            .expect("should create");

        let updated = service
            .update(
                created.id,
                MilestoneDraft {
                    title: "New".to_string(),
                    description: None,
                    event_date: Some(date("2025-02-02")),
                    image_url: None,
                },
            )
            .await
            .expect("should update");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "New");
        // Full replace: omitted optionals are cleared, not kept.
        assert_eq!(updated.description, None);
        assert_eq!(updated.image_url, None);
        assert_eq!(updated.event_date, date("2025-02-02"));
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let service = service();
        let err = service
            .update(
                MilestoneId::new(),
                MilestoneDraft {
                    title: "Anything".to_string(),
                    description: None,
                    event_date: Some(date("2025-01-01")),
                    image_url: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, MilestoneError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_of_unknown_id_is_not_found_and_changes_nothing() {
        let service = service();
        service
            .create(MilestoneDraft {
                title: "Keep me".to_string(),
                description: None,
                event_date: Some(date("2025-05-05")),
                image_url: None,
            })
            .await
            .expect("should create");

        let err = service.delete(MilestoneId::new()).await.unwrap_err();
        assert!(matches!(err, MilestoneError::NotFound { .. }));
        assert_eq!(service.list().await.expect("should list").len(), 1);
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let service = service();
        let created = service
            .create(MilestoneDraft {
                title: "Ephemeral".to_string(),
                description: None,
                event_date: Some(date("2025-05-05")),
                image_url: None,
            })
            .await
            .expect("should create");

        service.delete(created.id).await.expect("should delete");
        let err = service.fetch(created.id).await.unwrap_err();
        assert!(matches!(err, MilestoneError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_orders_by_event_date_descending() {
        let service = service();
        for (title, when) in [
            ("Middle", "2025-06-01"),
            ("Oldest", "2024-01-01"),
            ("Newest", "2026-01-01"),
        ] {
            service
                .create(MilestoneDraft {
                    title: title.to_string(),
                    description: None,
                    event_date: Some(date(when)),
                    image_url: None,
                })
                .await
                .expect("should create");
        }

        let titles: Vec<String> = service
            .list()
            .await
            .expect("should list")
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
    }
}
