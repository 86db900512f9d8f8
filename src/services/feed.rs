//! Snapshot feed: change notification for the catalog and job list
//!
//! Holds the latest consistent snapshot and republishes a fresh one after
//! every write. Readers get an `Arc` to an immutable value; nothing in the
//! calculator ever sees the live channel.

use std::sync::Arc;

use tokio::sync::watch;

use crate::{error::AppResult, models::snapshot::Snapshot, repository::SnapshotSource};

#[derive(Clone)]
pub struct SnapshotFeed {
    sender: Arc<watch::Sender<Arc<Snapshot>>>,
}

impl SnapshotFeed {
    pub fn new(initial: Snapshot) -> Self {
        let (sender, _) = watch::channel(Arc::new(initial));
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Latest published snapshot
    pub fn current(&self) -> Arc<Snapshot> {
        self.sender.borrow().clone()
    }

    /// Receiver notified on every publish
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.sender.subscribe()
    }

    pub fn publish(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let snapshot = Arc::new(snapshot);
        self.sender.send_replace(snapshot.clone());
        snapshot
    }

    /// Reload from `source` and publish the result
    pub async fn refresh(&self, source: &dyn SnapshotSource) -> AppResult<Arc<Snapshot>> {
        let snapshot = source.load_snapshot().await?;
        tracing::debug!(
            equipment = snapshot.equipment.len(),
            jobs = snapshot.jobs.len(),
            "Publishing snapshot"
        );
        Ok(self.publish(snapshot))
    }

    /// Refresh after a committed write; failure keeps the previous snapshot
    pub async fn refresh_after_write(&self, source: &dyn SnapshotSource) {
        if let Err(e) = self.refresh(source).await {
            tracing::warn!("Snapshot refresh failed, keeping previous snapshot: {}", e);
        }
    }
}
