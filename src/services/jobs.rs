//! Jobs service: job records, gear editing and the packing checklist

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::feed::SnapshotFeed;
use crate::{
    availability::{self, GearLine, PackingSummary},
    error::AppResult,
    models::job::{CreateJob, Job, JobQuery, UpdateJob, DEFAULT_JOB_TITLE},
    repository::Repository,
};

/// A job together with the availability of each of its reservations
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JobGear {
    pub job: Job,
    pub lines: Vec<GearLine>,
}

/// Packing checklist for one job
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Checklist {
    pub job_id: String,
    pub summary: PackingSummary,
    pub lines: Vec<GearLine>,
}

#[derive(Clone)]
pub struct JobsService {
    repository: Repository,
    feed: SnapshotFeed,
}

impl JobsService {
    pub fn new(repository: Repository, feed: SnapshotFeed) -> Self {
        Self { repository, feed }
    }

    pub async fn list(&self, query: &JobQuery) -> AppResult<Vec<Job>> {
        self.repository.jobs.list(query).await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Job> {
        self.repository.jobs.get_by_id(id).await
    }

    pub async fn create(&self, data: CreateJob) -> AppResult<Job> {
        data.validate()?;
        let job = new_job(data);
        let job = self.repository.jobs.create(&job).await?;
        tracing::info!("Job {} created on {}", job.id, job.date);
        self.feed.refresh_after_write(&self.repository).await;
        Ok(job)
    }

    pub async fn update(&self, id: &str, data: UpdateJob) -> AppResult<Job> {
        data.validate()?;
        let current = self.repository.jobs.get_by_id(id).await?;
        let job = self.repository.jobs.replace(&apply_update(current, data)).await?;
        self.feed.refresh_after_write(&self.repository).await;
        Ok(job)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.repository.jobs.delete(id).await?;
        tracing::info!("Job {} deleted", id);
        self.feed.refresh_after_write(&self.repository).await;
        Ok(())
    }

    /// Gear of a stored job with availability computed on the current snapshot
    pub async fn gear(&self, id: &str) -> AppResult<JobGear> {
        let job = self.repository.jobs.get_by_id(id).await?;
        Ok(self.with_lines(job))
    }

    /// Add one unit of catalog equipment to a job
    pub async fn add_gear(&self, id: &str, equipment_id: &str) -> AppResult<JobGear> {
        let snapshot = self.feed.current();
        if !snapshot.equipment.iter().any(|e| e.id == equipment_id) {
            // Catalog might be newer than the feed; ask the store before refusing
            self.repository.equipment.get_by_id(equipment_id).await?;
        }
        self.edit_gear(id, |job| availability::add_reservation(job, equipment_id))
            .await
    }

    pub async fn set_gear_quantity(&self, id: &str, equipment_id: &str, quantity: i64) -> AppResult<JobGear> {
        self.edit_gear(id, |job| availability::set_quantity(job, equipment_id, quantity))
            .await
    }

    pub async fn remove_gear(&self, id: &str, equipment_id: &str) -> AppResult<JobGear> {
        self.edit_gear(id, |job| availability::remove_reservation(job, equipment_id))
            .await
    }

    pub async fn toggle_packed(&self, id: &str, equipment_id: &str) -> AppResult<JobGear> {
        self.edit_gear(id, |job| availability::toggle_packed(job, equipment_id))
            .await
    }

    pub async fn checklist(&self, id: &str) -> AppResult<Checklist> {
        let JobGear { job, lines } = self.gear(id).await?;
        Ok(Checklist {
            job_id: job.id.clone(),
            summary: availability::packing_summary(&job),
            lines,
        })
    }

    /// Availability for a job that may not be saved yet
    pub fn preview(&self, mut draft: Job) -> JobGear {
        draft.gear = availability::normalize_gear(draft.gear);
        self.with_lines(draft)
    }

    async fn edit_gear(&self, id: &str, edit: impl FnOnce(&Job) -> Job) -> AppResult<JobGear> {
        let current = self.repository.jobs.get_by_id(id).await?;
        let edited = edit(&current);
        if edited.gear == current.gear {
            return Ok(self.with_lines(current));
        }

        let job = self.repository.jobs.replace_gear(id, &edited.gear).await?;
        self.feed.refresh_after_write(&self.repository).await;
        Ok(self.with_lines(job))
    }

    fn with_lines(&self, job: Job) -> JobGear {
        let snapshot = self.feed.current();
        let lines = snapshot.calculator().gear_lines(&job);
        JobGear { job, lines }
    }
}

fn new_job(data: CreateJob) -> Job {
    Job {
        id: data
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        date: data.date,
        title: data
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_JOB_TITLE.to_string()),
        location: data.location,
        price: data.price,
        description: data.description,
        gear: availability::normalize_gear(data.gear.unwrap_or_default()),
    }
}

fn apply_update(mut job: Job, data: UpdateJob) -> Job {
    if let Some(date) = data.date {
        job.date = date;
    }
    if let Some(title) = data.title {
        job.title = title;
    }
    if data.location.is_some() {
        job.location = data.location;
    }
    if data.price.is_some() {
        job.price = data.price;
    }
    if data.description.is_some() {
        job.description = data.description;
    }
    if let Some(gear) = data.gear {
        job.gear = availability::normalize_gear(gear);
    }
    job
}
