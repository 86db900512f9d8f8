//! End-to-end availability scenarios over in-memory snapshots

use chrono::NaiveDate;

use gearbook::availability::{self, Availability};
use gearbook::models::{Equipment, Job, Snapshot};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn catalog() -> Vec<Equipment> {
    vec![Equipment::new("cam1", "A7 III", 2)]
}

#[test]
fn test_camera_booking_sequence() {
    let day = date("2024-05-01");

    let job_a = availability::add_reservation(&Job::new("job-a", day), "cam1");
    let snapshot = Snapshot::new(catalog(), vec![job_a.clone()]);

    // Job B is new on the same date
    let job_b = Job::new("job-b", day);
    assert_eq!(snapshot.calculator().available_for("cam1", day, &job_b.id), 1);

    let job_b = availability::add_reservation(&job_b, "cam1");
    let snapshot = Snapshot::new(catalog(), vec![job_a.clone(), job_b.clone()]);

    assert_eq!(snapshot.calculator().available_for("cam1", day, "job-c"), 0);
    assert_eq!(
        snapshot.calculator().available_for("cam1", date("2024-05-02"), "job-d"),
        2
    );

    // Job A goes away; only B's own reservation remains, and it is excluded
    let snapshot = Snapshot::new(catalog(), vec![job_b.clone()]);
    let calc = snapshot.calculator();
    assert_eq!(calc.available_for("cam1", day, &job_b.id), 2);

    let line = &calc.gear_lines(&job_b)[0];
    assert_eq!(line.available, 2 + job_b.gear[0].quantity);
    assert!(!line.overbooked);
}

#[test]
fn test_pair_of_jobs_matches_capacity_minus_other() {
    let day = date("2024-06-10");
    let capacity = 5;
    let equipment = vec![Equipment::new("light", "Aputure 300d", capacity)];

    for (q1, q2) in [(1u32, 1u32), (2, 3), (4, 4), (1, 9)] {
        let j1 = availability::set_quantity(
            &availability::add_reservation(&Job::new("j1", day), "light"),
            "light",
            q1.into(),
        );
        let j2 = availability::set_quantity(
            &availability::add_reservation(&Job::new("j2", day), "light"),
            "light",
            q2.into(),
        );
        let snapshot = Snapshot::new(equipment.clone(), vec![j1, j2]);

        assert_eq!(
            snapshot.calculator().available_for("light", day, "j1"),
            capacity.saturating_sub(q2)
        );
    }
}

#[test]
fn test_deleted_equipment_reads_as_not_found() {
    let day = date("2024-05-01");
    let job = availability::add_reservation(&Job::new("job-a", day), "cam1");

    // Catalog no longer carries cam1
    let snapshot = Snapshot::new(Vec::new(), vec![job.clone()]);
    let calc = snapshot.calculator();

    assert_eq!(calc.lookup("cam1", day, "job-b"), Availability::NotFound);
    assert_eq!(calc.available_for("cam1", day, "job-b"), 0);

    let lines = calc.gear_lines(&job);
    assert!(!lines[0].known);
    assert!(lines[0].overbooked);
}

#[test]
fn test_editing_sequence_keeps_one_entry_per_equipment() {
    let day = date("2024-05-01");
    let mut job = Job::new("job-a", day);
    for id in ["cam1", "lens", "cam1", "cam1"] {
        job = availability::add_reservation(&job, id);
    }
    job = availability::set_quantity(&job, "lens", -4);
    job = availability::toggle_packed(&job, "lens");
    job = availability::remove_reservation(&job, "tripod");

    assert_eq!(job.gear.len(), 2);
    assert_eq!(job.reservation("cam1").map(|g| g.quantity), Some(3));
    assert_eq!(job.reservation("lens").map(|g| (g.quantity, g.packed)), Some((1, true)));

    let summary = availability::packing_summary(&job);
    assert_eq!(summary.status, availability::PackingStatus::Partial);
    assert_eq!(summary.units, 4);
}
