//! Point-in-time copy of the catalog and job list

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{equipment::Equipment, job::Job};
use crate::availability::Calculator;

/// Consistent (equipment, jobs) pair read from the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Snapshot {
    pub equipment: Vec<Equipment>,
    pub jobs: Vec<Job>,
}

impl Snapshot {
    pub fn new(equipment: Vec<Equipment>, jobs: Vec<Job>) -> Self {
        Self { equipment, jobs }
    }

    /// Availability calculator borrowing this snapshot
    pub fn calculator(&self) -> Calculator<'_> {
        Calculator::new(&self.equipment, &self.jobs)
    }

    pub fn job(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }
}
