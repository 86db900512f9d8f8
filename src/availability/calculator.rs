//! Per-date availability calculator

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{equipment::Equipment, job::Job};

/// Outcome of an availability lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// Units free for jobs other than the excluded one
    Found(u32),
    /// Equipment id is not in the catalog (never existed or was deleted)
    NotFound,
}

impl Availability {
    /// Collapse to a unit count, treating unknown equipment as unavailable
    pub fn or_zero(self) -> u32 {
        match self {
            Availability::Found(n) => n,
            Availability::NotFound => 0,
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, Availability::Found(_))
    }
}

/// One row of the job edit surface: how much is free versus how much the job needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct GearLine {
    pub equipment_id: String,
    /// Catalog short name, absent for dangling references
    pub short_name: Option<String>,
    pub full_name: Option<String>,
    /// Units not committed by any other job on the same date
    pub free: u32,
    /// `free` plus what this job already holds
    pub available: u32,
    /// Units this job reserves
    pub needed: u32,
    pub packed: bool,
    /// Whether the equipment id exists in the catalog
    pub known: bool,
    pub overbooked: bool,
}

/// Read-only view over a catalog and job list.
///
/// Callers are responsible for handing in a consistent pair; the calculator
/// never keeps a reference past the borrow.
#[derive(Debug, Clone, Copy)]
pub struct Calculator<'a> {
    equipment: &'a [Equipment],
    jobs: &'a [Job],
}

impl<'a> Calculator<'a> {
    pub fn new(equipment: &'a [Equipment], jobs: &'a [Job]) -> Self {
        Self { equipment, jobs }
    }

    fn equipment(&self, equipment_id: &str) -> Option<&'a Equipment> {
        self.equipment.iter().find(|e| e.id == equipment_id)
    }

    /// Units of `equipment_id` committed on `date` by every job except `excluding_job_id`
    pub fn reserved_by_others(&self, equipment_id: &str, date: NaiveDate, excluding_job_id: &str) -> u32 {
        self.jobs
            .iter()
            .filter(|j| j.date == date && j.id != excluding_job_id)
            .filter_map(|j| j.reservation(equipment_id))
            .fold(0u32, |sum, g| sum.saturating_add(g.quantity))
    }

    /// Free units for allocation, distinguishing "full" from "unknown equipment"
    pub fn lookup(&self, equipment_id: &str, date: NaiveDate, excluding_job_id: &str) -> Availability {
        match self.equipment(equipment_id) {
            Some(item) => Availability::Found(
                item.how_many
                    .saturating_sub(self.reserved_by_others(equipment_id, date, excluding_job_id)),
            ),
            None => Availability::NotFound,
        }
    }

    /// Free units for allocation; 0 when the equipment is unknown
    pub fn available_for(&self, equipment_id: &str, date: NaiveDate, excluding_job_id: &str) -> u32 {
        self.lookup(equipment_id, date, excluding_job_id).or_zero()
    }

    /// Availability of every reservation in `job`, as the job itself sees it.
    ///
    /// The job's own quantity is added back into `available`. A line is
    /// overbooked when the job needs more than other jobs left free, i.e. when
    /// the date's total demand exceeds the owned count.
    pub fn gear_lines(&self, job: &Job) -> Vec<GearLine> {
        job.gear
            .iter()
            .map(|g| {
                let item = self.equipment(&g.equipment_id);
                let free = self.available_for(&g.equipment_id, job.date, &job.id);
                let available = free.saturating_add(g.quantity);
                GearLine {
                    equipment_id: g.equipment_id.clone(),
                    short_name: item.map(|e| e.short_name.clone()),
                    full_name: item.and_then(|e| e.full_name.clone()),
                    free,
                    available,
                    needed: g.quantity,
                    packed: g.packed,
                    known: item.is_some(),
                    overbooked: g.quantity > free,
                }
            })
            .collect()
    }

    /// True when any reservation of `job` exceeds what is available to it
    pub fn is_overbooked(&self, job: &Job) -> bool {
        self.gear_lines(job).iter().any(|line| line.overbooked)
    }
}
