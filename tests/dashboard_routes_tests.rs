mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

async fn donate(app: &TestApp, donor: &str, amount: f64, target: serde_json::Value) {
    let resp = app
        .post_json(
            "/api/process_donation",
            json!({"donor_name": donor, "amount": amount, "target": target}),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK, "{:?}", resp.body);
}

#[tokio::test]
async fn empty_dashboard_reports_zero_totals() {
    let app = TestApp::spawn().await;

    let resp = app.get("/api/dashboard_data").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["total_donations"], json!(0.0));
    assert_eq!(resp.body["general_fund"], json!(0.0));
    assert_eq!(resp.body["students"], json!([]));
    assert_eq!(resp.body["recent_donations"], json!([]));
}

#[tokio::test]
async fn dashboard_totals_match_donation_sums() {
    let app = TestApp::spawn().await;
    let student = app.enroll("Mara", "mara@example.org").await;

    donate(&app, "Lee", 30.0, json!("general")).await;
    donate(&app, "Kim", 12.5, json!("general")).await;
    donate(&app, "Lee", 20.0, json!(student)).await;

    let resp = app.get("/api/dashboard_data").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["total_donations"].as_f64(), Some(62.5));
    assert_eq!(resp.body["general_fund"].as_f64(), Some(42.5));

    let students = resp.body["students"].as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["student_id"].as_i64(), Some(student));
    assert_eq!(students[0]["name"], "Mara");
    assert_eq!(students[0]["donations_received"].as_f64(), Some(20.0));
    assert!(students[0].get("email").is_none());
}

#[tokio::test]
async fn recent_donations_are_newest_first_and_capped() {
    let app = TestApp::spawn().await;

    for i in 1..=6 {
        donate(&app, &format!("donor-{i}"), i as f64, json!("general")).await;
    }

    let resp = app.get("/api/dashboard_data").await;
    let recent = resp.body["recent_donations"].as_array().unwrap();

    assert_eq!(recent.len(), 5);
    let names: Vec<&str> = recent
        .iter()
        .map(|d| d["donor_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["donor-6", "donor-5", "donor-4", "donor-3", "donor-2"]);
    assert_eq!(recent[0]["donation_target"], "general");
    assert!(recent[0]["donation_date"].is_string());
}

#[tokio::test]
async fn leaderboard_ranks_donors_by_total() {
    let app = TestApp::spawn().await;

    donate(&app, "A", 10.0, json!("general")).await;
    donate(&app, "B", 50.0, json!("general")).await;
    donate(&app, "A", 30.0, json!("general")).await;
    donate(&app, "C", 5.0, json!("general")).await;
    donate(&app, "D", 20.0, json!("general")).await;
    donate(&app, "E", 15.0, json!("general")).await;
    donate(&app, "F", 1.0, json!("general")).await;

    let resp = app.get("/api/leaderboard_data").await;
    assert_eq!(resp.status, StatusCode::OK);

    let donors = resp.body["donors"].as_array().unwrap();
    let ranked: Vec<(&str, f64)> = donors
        .iter()
        .map(|d| (d["name"].as_str().unwrap(), d["total_donated"].as_f64().unwrap()))
        .collect();
    assert_eq!(
        ranked,
        [("B", 50.0), ("A", 40.0), ("D", 20.0), ("E", 15.0), ("C", 5.0)]
    );
}

#[tokio::test]
async fn leaderboard_ranks_volunteers_by_points() {
    let app = TestApp::spawn().await;

    for (i, name) in ["v1", "v2", "v3", "v4", "v5", "v6"].iter().enumerate() {
        let resp = app
            .post_json(
                "/api/apply_volunteer",
                json!({"name": name, "email": format!("{name}@example.org")}),
            )
            .await;
        assert_eq!(resp.status, StatusCode::CREATED);
        app.execute(&format!(
            "UPDATE volunteers SET points = {} WHERE name = '{name}'",
            (i as i64 * 7) % 6
        ))
        .await;
    }

    let resp = app.get("/api/leaderboard_data").await;
    let volunteers = resp.body["volunteers"].as_array().unwrap();

    assert_eq!(volunteers.len(), 5);
    let points: Vec<i64> = volunteers
        .iter()
        .map(|v| v["points"].as_i64().unwrap())
        .collect();
    let mut sorted = points.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(points, sorted);
    assert_eq!(points[0], 5);
    assert!(resp.body["donors"].as_array().unwrap().is_empty());
}
