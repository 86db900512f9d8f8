//! Repository layer for database operations

pub mod equipment;
pub mod jobs;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{equipment::Equipment, job::Job, snapshot::Snapshot},
};
use equipment::{EquipmentRow, EQUIPMENT_COLUMNS};
use jobs::{JobRow, JOB_COLUMNS};

/// Anything that can produce a consistent catalog/job snapshot
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn load_snapshot(&self) -> AppResult<Snapshot>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub equipment: equipment::EquipmentRepository,
    pub jobs: jobs::JobsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            jobs: jobs::JobsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Check database connectivity
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Read the full catalog and job list in one repeatable-read transaction
    pub async fn snapshot(&self) -> AppResult<Snapshot> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let equipment = sqlx::query_as::<_, EquipmentRow>(&format!(
            "SELECT {} FROM equipment ORDER BY short_name, id",
            EQUIPMENT_COLUMNS
        ))
        .fetch_all(&mut *tx)
        .await?;

        let jobs = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {} FROM jobs ORDER BY job_date, title, id",
            JOB_COLUMNS
        ))
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Snapshot::new(
            equipment.into_iter().map(Equipment::from).collect(),
            jobs.into_iter().map(Job::from).collect(),
        ))
    }
}

#[async_trait]
impl SnapshotSource for Repository {
    async fn load_snapshot(&self) -> AppResult<Snapshot> {
        self.snapshot().await
    }
}

/// Turn a unique-key violation into a conflict, pass anything else through
pub(crate) fn map_unique_violation(error: sqlx::Error, message: String) -> AppError {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Conflict(message),
        _ => AppError::Database(error),
    }
}
