//! Availability queries and the monthly calendar, answered from the snapshot feed

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::feed::SnapshotFeed;
use crate::{
    availability::Availability,
    error::AppResult,
    models::{job::parse_month, snapshot::Snapshot},
};

/// Availability of one equipment item on one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AvailabilityReport {
    pub equipment_id: String,
    pub date: NaiveDate,
    /// Owned units; absent when the equipment is not in the catalog
    pub capacity: Option<u32>,
    /// Units committed by other jobs on that date
    pub reserved_by_others: u32,
    /// Units free for allocation (0 for unknown equipment)
    pub available: u32,
    pub known: bool,
}

/// A job as shown on the calendar
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CalendarEntry {
    pub id: String,
    pub title: String,
    pub location: Option<String>,
    /// Total units reserved
    pub units: u32,
    /// Some reservation exceeds what the date has left
    pub overbooked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub jobs: Vec<CalendarEntry>,
}

/// Every day of a month with the jobs scheduled on it
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CalendarMonth {
    /// YYYY-MM
    pub month: String,
    pub days: Vec<CalendarDay>,
}

#[derive(Clone)]
pub struct AvailabilityService {
    feed: SnapshotFeed,
}

impl AvailabilityService {
    pub fn new(feed: SnapshotFeed) -> Self {
        Self { feed }
    }

    /// Free units of `equipment_id` on `date`, ignoring `exclude_job_id`'s own reservation
    pub fn query(&self, equipment_id: &str, date: NaiveDate, exclude_job_id: Option<&str>) -> AvailabilityReport {
        report(&self.feed.current(), equipment_id, date, exclude_job_id)
    }

    /// Calendar for a `YYYY-MM` month
    pub fn calendar(&self, month: &str) -> AppResult<CalendarMonth> {
        let (first, last) = parse_month(month)?;
        Ok(calendar(&self.feed.current(), first, last))
    }
}

fn report(snapshot: &Snapshot, equipment_id: &str, date: NaiveDate, exclude_job_id: Option<&str>) -> AvailabilityReport {
    let calc = snapshot.calculator();
    // No stored job has an empty id, so "" excludes nothing
    let excluding = exclude_job_id.unwrap_or("");
    let lookup = calc.lookup(equipment_id, date, excluding);

    AvailabilityReport {
        equipment_id: equipment_id.to_string(),
        date,
        capacity: snapshot
            .equipment
            .iter()
            .find(|e| e.id == equipment_id)
            .map(|e| e.how_many),
        reserved_by_others: calc.reserved_by_others(equipment_id, date, excluding),
        available: lookup.or_zero(),
        known: matches!(lookup, Availability::Found(_)),
    }
}

fn calendar(snapshot: &Snapshot, first: NaiveDate, last: NaiveDate) -> CalendarMonth {
    let calc = snapshot.calculator();
    let days = first
        .iter_days()
        .take_while(|d| *d <= last)
        .map(|date| CalendarDay {
            date,
            jobs: snapshot
                .jobs
                .iter()
                .filter(|j| j.date == date)
                .map(|j| CalendarEntry {
                    id: j.id.clone(),
                    title: j.title.clone(),
                    location: j.location.clone(),
                    units: j.reserved_units(),
                    overbooked: calc.is_overbooked(j),
                })
                .collect(),
        })
        .collect();

    CalendarMonth {
        month: first.format("%Y-%m").to_string(),
        days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        equipment::Equipment,
        job::{Job, Reservation},
    };

    fn may(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn snapshot() -> Snapshot {
        let mut a = Job::new("a", may(1));
        a.gear = vec![Reservation::new("cam1", 2)];
        let mut b = Job::new("b", may(1));
        b.gear = vec![Reservation::new("cam1", 1)];
        Snapshot::new(vec![Equipment::new("cam1", "A7 III", 2)], vec![a, b])
    }

    #[test]
    fn test_report_without_exclusion_counts_everyone() {
        let r = report(&snapshot(), "cam1", may(1), None);
        assert_eq!(r.capacity, Some(2));
        assert_eq!(r.reserved_by_others, 3);
        assert_eq!(r.available, 0);
        assert!(r.known);
    }

    #[test]
    fn test_report_unknown_equipment() {
        let r = report(&snapshot(), "ghost", may(1), Some("a"));
        assert_eq!(r.capacity, None);
        assert_eq!(r.available, 0);
        assert!(!r.known);
    }

    #[test]
    fn test_calendar_lists_every_day() {
        let month = calendar(&snapshot(), may(1), may(31));
        assert_eq!(month.month, "2024-05");
        assert_eq!(month.days.len(), 31);
        assert_eq!(month.days[0].jobs.len(), 2);
        assert!(month.days[0].jobs.iter().all(|j| j.overbooked));
        assert!(month.days[1].jobs.is_empty());
    }

    #[test]
    fn test_calendar_units_saturate() {
        let mut big = Job::new("big", may(3));
        big.gear = vec![Reservation::new("cam1", u32::MAX), Reservation::new("mic", 5)];
        let snap = Snapshot::new(vec![Equipment::new("cam1", "A7 III", 2)], vec![big]);

        let month = calendar(&snap, may(1), may(31));
        assert_eq!(month.days[2].jobs[0].units, u32::MAX);
        assert!(month.days[2].jobs[0].overbooked);
    }

    #[test]
    fn test_service_reads_published_snapshot() {
        let feed = SnapshotFeed::new(Snapshot::default());
        let service = AvailabilityService::new(feed.clone());
        assert!(!service.query("cam1", may(1), None).known);

        feed.publish(snapshot());
        assert_eq!(service.query("cam1", may(1), Some("a")).available, 1);
        assert!(service.calendar("2024-5x").is_err());
    }
}
