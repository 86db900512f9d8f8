//! API integration tests against a running server

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn unique_id(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4())
}

async fn create_equipment(client: &Client, id: &str, how_many: i32) {
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .json(&json!({
            "id": id,
            "short_name": "Test camera",
            "how_many": how_many
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
}

async fn create_job(client: &Client, id: &str, date: &str, gear: Value) {
    let response = client
        .post(format!("{}/jobs", BASE_URL))
        .json(&json!({ "id": id, "date": date, "title": "Test shoot", "gear": gear }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
}

async fn available(client: &Client, equipment_id: &str, date: &str, exclude: &str) -> i64 {
    let body: Value = client
        .get(format!("{}/availability", BASE_URL))
        .query(&[("equipment_id", equipment_id), ("date", date), ("exclude_job_id", exclude)])
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    body["available"].as_i64().expect("No available count")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_create_and_delete_equipment() {
    let client = Client::new();
    let id = unique_id("cam");
    create_equipment(&client, &id, 2).await;

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .json(&json!({ "id": id, "short_name": "Duplicate" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    let response = client
        .delete(format!("{}/equipment/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_reject_empty_short_name() {
    let client = Client::new();

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .json(&json!({ "short_name": "" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_booking_scenario() {
    let client = Client::new();
    let cam = unique_id("cam");
    let (job_a, job_b) = (unique_id("job-a"), unique_id("job-b"));
    // Far-future date keeps the test isolated from other data
    let date = "2199-05-01";

    create_equipment(&client, &cam, 2).await;
    create_job(&client, &job_a, date, json!([{ "equipment_id": cam, "quantity": 1 }])).await;

    assert_eq!(available(&client, &cam, date, &job_b).await, 1);

    create_job(&client, &job_b, date, json!([])).await;
    let response = client
        .post(format!("{}/jobs/{}/gear", BASE_URL, job_b))
        .json(&json!({ "equipment_id": cam }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    assert_eq!(available(&client, &cam, date, "job-c").await, 0);
    assert_eq!(available(&client, &cam, "2199-05-02", "job-d").await, 2);

    client
        .delete(format!("{}/jobs/{}", BASE_URL, job_a))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(available(&client, &cam, date, &job_b).await, 2);

    // Cleanup
    let _ = client.delete(format!("{}/jobs/{}", BASE_URL, job_b)).send().await;
    let _ = client.delete(format!("{}/equipment/{}", BASE_URL, cam)).send().await;
}

#[tokio::test]
#[ignore]
async fn test_set_quantity_clamps_to_one() {
    let client = Client::new();
    let cam = unique_id("cam");
    let job = unique_id("job");

    create_equipment(&client, &cam, 1).await;
    create_job(&client, &job, "2199-06-01", json!([{ "equipment_id": cam, "quantity": 3 }])).await;

    let body: Value = client
        .put(format!("{}/jobs/{}/gear/{}", BASE_URL, job, cam))
        .json(&json!({ "quantity": 0 }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["job"]["gear"][0]["quantity"], 1);
    assert_eq!(body["lines"][0]["overbooked"], false);

    let _ = client.delete(format!("{}/jobs/{}", BASE_URL, job)).send().await;
    let _ = client.delete(format!("{}/equipment/{}", BASE_URL, cam)).send().await;
}

#[tokio::test]
#[ignore]
async fn test_calendar_rejects_bad_month() {
    let client = Client::new();

    let response = client
        .get(format!("{}/calendar?month=May", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_unknown_job_is_not_found() {
    let client = Client::new();

    let response = client
        .get(format!("{}/jobs/{}/checklist", BASE_URL, unique_id("missing")))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_list_equipment_search_and_status() {
    let client = Client::new();
    let id = unique_id("cam");
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .json(&json!({ "id": id, "short_name": "Searchable", "notes": format!("tag {}", id) }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = client
        .get(format!("{}/equipment", BASE_URL))
        .query(&[("search", id.to_uppercase().as_str()), ("status", "NEW")])
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let found = body.as_array().expect("Expected a list");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], id.as_str());

    let body: Value = client
        .get(format!("{}/equipment", BASE_URL))
        .query(&[("search", id.as_str()), ("status", "DAMAGED")])
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(body.as_array().expect("Expected a list").is_empty());

    let response = client
        .get(format!("{}/equipment?sort=colour", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let _ = client.delete(format!("{}/equipment/{}", BASE_URL, id)).send().await;
}

#[tokio::test]
#[ignore]
async fn test_inventory_summary_counts_new_units() {
    let client = Client::new();

    let before: Value = client
        .get(format!("{}/equipment/summary", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let id = unique_id("cam");
    create_equipment(&client, &id, 4).await;

    let after: Value = client
        .get(format!("{}/equipment/summary", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(
        after["total_units"].as_u64().unwrap(),
        before["total_units"].as_u64().unwrap() + 4
    );
    assert_eq!(after["units_by_status"].as_array().map(Vec::len), Some(4));

    let _ = client.delete(format!("{}/equipment/{}", BASE_URL, id)).send().await;
}
