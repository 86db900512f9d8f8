//! Jobs repository

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use sqlx::{types::Json, FromRow, Pool, Postgres};

use super::map_unique_violation;
use crate::{
    availability::normalize_gear,
    error::{AppError, AppResult},
    models::job::{Job, JobQuery, Reservation, DEFAULT_JOB_TITLE},
};

pub(crate) const JOB_COLUMNS: &str = "id, job_date, title, location, price, description, gear";

/// Gear entry as found in the JSONB column; tolerant of missing or bad values
#[derive(Debug, Deserialize)]
pub(crate) struct StoredReservation {
    #[serde(default)]
    pub equipment_id: Option<String>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub packed: Option<bool>,
}

impl StoredReservation {
    /// Entries without an equipment id cannot be booked and are dropped
    fn into_reservation(self) -> Option<Reservation> {
        let equipment_id = self.equipment_id.filter(|id| !id.trim().is_empty())?;
        Some(Reservation {
            equipment_id,
            // Float to int casts saturate; NaN and negatives end up at 1
            quantity: (self.quantity.unwrap_or(1.0) as u32).max(1),
            packed: self.packed.unwrap_or(false),
        })
    }
}

/// Decode stored gear element by element, skipping entries that cannot be read
fn decode_gear(job_id: &str, stored: Vec<serde_json::Value>) -> Vec<Reservation> {
    let total = stored.len();
    let gear: Vec<Reservation> = stored
        .into_iter()
        .filter_map(|value| serde_json::from_value::<StoredReservation>(value).ok())
        .filter_map(StoredReservation::into_reservation)
        .collect();

    if gear.len() < total {
        tracing::warn!(
            "Job {} has {} unreadable gear entries, ignoring them",
            job_id,
            total - gear.len()
        );
    }
    normalize_gear(gear)
}

#[derive(Debug, FromRow)]
pub(crate) struct JobRow {
    pub id: String,
    pub job_date: NaiveDate,
    pub title: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub gear: Json<Vec<serde_json::Value>>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        let gear = decode_gear(&row.id, row.gear.0);
        Self {
            id: row.id,
            date: row.job_date,
            title: row.title.unwrap_or_else(|| DEFAULT_JOB_TITLE.to_string()),
            location: row.location,
            price: row.price,
            description: row.description,
            gear,
        }
    }
}

#[derive(Clone)]
pub struct JobsRepository {
    pool: Pool<Postgres>,
}

impl JobsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List jobs ordered by date, optionally bounded by the query's date filters
    pub async fn list(&self, query: &JobQuery) -> AppResult<Vec<Job>> {
        let (start, end) = query.date_range()?;

        let mut conditions = Vec::new();
        let mut idx = 1;

        if start.is_some() {
            conditions.push(format!("job_date >= ${}", idx));
            idx += 1;
        }
        if end.is_some() {
            conditions.push(format!("job_date <= ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let select_q = format!(
            "SELECT {} FROM jobs {} ORDER BY job_date, title, id",
            JOB_COLUMNS, where_clause
        );
        let mut builder = sqlx::query_as::<_, JobRow>(&select_q);
        if let Some(sd) = start { builder = builder.bind(sd); }
        if let Some(ed) = end { builder = builder.bind(ed); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Job::from).collect())
    }

    /// Get job by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<Job> {
        sqlx::query_as::<_, JobRow>(&format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Job::from)
            .ok_or_else(|| AppError::NotFound(format!("Job {} not found", id)))
    }

    /// Insert a fully materialised job
    pub async fn create(&self, job: &Job) -> AppResult<Job> {
        let row = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            INSERT INTO jobs (id, job_date, title, location, price, description, gear)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(&job.id)
        .bind(job.date)
        .bind(&job.title)
        .bind(&job.location)
        .bind(job.price)
        .bind(&job.description)
        .bind(Json(&job.gear))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, format!("Job {} already exists", job.id)))?;
        Ok(row.into())
    }

    /// Write every field of `job` over the stored record
    pub async fn replace(&self, job: &Job) -> AppResult<Job> {
        sqlx::query_as::<_, JobRow>(&format!(
            r#"
            UPDATE jobs
            SET job_date = $2, title = $3, location = $4, price = $5, description = $6,
                gear = $7, modif_date = $8
            WHERE id = $1
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(&job.id)
        .bind(job.date)
        .bind(&job.title)
        .bind(&job.location)
        .bind(job.price)
        .bind(&job.description)
        .bind(Json(&job.gear))
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .map(Job::from)
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", job.id)))
    }

    /// Replace only the gear list of a job
    pub async fn replace_gear(&self, id: &str, gear: &[Reservation]) -> AppResult<Job> {
        sqlx::query_as::<_, JobRow>(&format!(
            "UPDATE jobs SET gear = $2, modif_date = $3 WHERE id = $1 RETURNING {}",
            JOB_COLUMNS
        ))
        .bind(id)
        .bind(Json(gear))
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .map(Job::from)
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", id)))
    }

    /// Delete a job
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Job {} not found", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_gear_is_normalized() {
        let stored: Vec<serde_json::Value> = serde_json::from_str(
            r#"[
                {"equipment_id": "cam1", "quantity": -2},
                {"equipment_id": "mic"},
                {"equipment_id": "cam1", "quantity": 2, "packed": true}
            ]"#,
        )
        .unwrap();

        let row = JobRow {
            id: "j1".into(),
            job_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            title: None,
            location: None,
            price: None,
            description: None,
            gear: Json(stored),
        };
        let job = Job::from(row);

        assert_eq!(job.title, DEFAULT_JOB_TITLE);
        assert_eq!(job.gear.len(), 2);
        assert_eq!(job.gear[0].quantity, 3);
        assert!(job.gear[0].packed);
        assert_eq!(job.gear[1], Reservation::new("mic", 1));
    }

    #[test]
    fn test_unreadable_gear_entries_are_skipped() {
        let stored: Vec<serde_json::Value> = serde_json::from_str(
            r#"[
                {"quantity": 4},
                {"equipment_id": "", "quantity": 1},
                "cam1",
                null,
                {"equipment_id": 42},
                {"equipment_id": "cam1", "quantity": "two"},
                {"equipment_id": "mic", "quantity": 2.0, "packed": true},
                {"equipment_id": "light", "quantity": 1e12}
            ]"#,
        )
        .unwrap();

        let gear = decode_gear("j1", stored);

        assert_eq!(gear.len(), 2);
        assert_eq!(gear[0].equipment_id, "mic");
        assert_eq!(gear[0].quantity, 2);
        assert!(gear[0].packed);
        assert_eq!(gear[1].quantity, u32::MAX);
    }
}
