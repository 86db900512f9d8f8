//! Equipment service

use uuid::Uuid;
use validator::Validate;

use super::{
    feed::SnapshotFeed,
    inventory::{self, InventorySummary},
};
use crate::{
    error::AppResult,
    models::equipment::{CreateEquipment, Equipment, EquipmentQuery, UpdateEquipment},
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
    feed: SnapshotFeed,
}

impl EquipmentService {
    pub fn new(repository: Repository, feed: SnapshotFeed) -> Self {
        Self { repository, feed }
    }

    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list(query).await
    }

    /// Catalog totals computed on the current snapshot
    pub fn summary(&self) -> InventorySummary {
        inventory::summarize(&self.feed.current().equipment)
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        data.validate()?;
        let id = data
            .id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let equipment = self.repository.equipment.create(&id, data).await?;
        tracing::info!("Equipment {} ({}) created", equipment.id, equipment.short_name);
        self.feed.refresh_after_write(&self.repository).await;
        Ok(equipment)
    }

    pub async fn update(&self, id: &str, data: &UpdateEquipment) -> AppResult<Equipment> {
        data.validate()?;
        let equipment = self.repository.equipment.update(id, data).await?;
        self.feed.refresh_after_write(&self.repository).await;
        Ok(equipment)
    }

    /// Delete equipment. Reservations pointing at it are not cleaned up; they
    /// resolve to zero availability from then on.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let referencing = self.repository.equipment.count_jobs_referencing(id).await?;
        self.repository.equipment.delete(id).await?;
        if referencing > 0 {
            tracing::warn!(
                "Equipment {} deleted while still reserved by {} job(s)",
                id,
                referencing
            );
        } else {
            tracing::info!("Equipment {} deleted", id);
        }
        self.feed.refresh_after_write(&self.repository).await;
        Ok(())
    }
}
