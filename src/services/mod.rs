//! Business logic services

pub mod availability;
pub mod equipment;
pub mod feed;
pub mod inventory;
pub mod jobs;

use crate::{error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub equipment: equipment::EquipmentService,
    pub jobs: jobs::JobsService,
    pub availability: availability::AvailabilityService,
    pub feed: feed::SnapshotFeed,
    pub repository: Repository,
}

impl Services {
    /// Create all services, seeding the snapshot feed from the repository
    pub async fn new(repository: Repository) -> AppResult<Self> {
        let feed = feed::SnapshotFeed::new(repository.snapshot().await?);

        Ok(Self {
            equipment: equipment::EquipmentService::new(repository.clone(), feed.clone()),
            jobs: jobs::JobsService::new(repository.clone(), feed.clone()),
            availability: availability::AvailabilityService::new(feed.clone()),
            feed,
            repository,
        })
    }
}
