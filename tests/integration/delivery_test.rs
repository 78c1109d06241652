//! Integration tests for read/snooze state and the inbox.

mod helpers;

use chrono::{DateTime, Utc};
use http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

async fn org_alert(app: &helpers::TestApp, title: &str) -> Uuid {
    app.create_alert(json!({
        "title": title,
        "message": "Please acknowledge",
        "severity": "critical",
        "visibility_scope": "org",
    }))
    .await
}

fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    serde_json::from_value(value.clone()).ok()
}

#[tokio::test]
async fn test_mark_read_shows_in_inbox() {
    let app = helpers::TestApp::new();
    let alert_id = org_alert(&app, "Security training due").await;
    let token = app.member_token(Uuid::new_v4(), "pat@example.com");

    let response = app
        .request(
            "PUT",
            &format!("/api/alerts/{alert_id}/read"),
            Some(json!({ "read": true })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["read"], true);
    assert!(timestamp(&response.body["data"]["read_at"]).is_some());

    let inbox = app.request("GET", "/api/inbox", None, Some(&token)).await;
    assert_eq!(inbox.status, StatusCode::OK);
    let item = &inbox.body["data"][0];
    assert_eq!(item["id"], alert_id.to_string());
    assert_eq!(item["read"], true);
    assert_eq!(item["next_reminder_due"], Value::Null);
}

#[tokio::test]
async fn test_mark_read_twice_keeps_first_read_at() {
    let app = helpers::TestApp::new();
    let alert_id = org_alert(&app, "Quarterly survey").await;
    let token = app.member_token(Uuid::new_v4(), "pat@example.com");
    let path = format!("/api/alerts/{alert_id}/read");

    let first = app
        .request("PUT", &path, Some(json!({ "read": true })), Some(&token))
        .await;
    let second = app
        .request("PUT", &path, Some(json!({ "read": true })), Some(&token))
        .await;
    assert_eq!(first.body["data"]["read_at"], second.body["data"]["read_at"]);

    let unread = app
        .request("PUT", &path, Some(json!({ "read": false })), Some(&token))
        .await;
    assert_eq!(unread.body["data"]["read"], false);
    assert_eq!(unread.body["data"]["read_at"], Value::Null);
}

#[tokio::test]
async fn test_snooze_defaults_to_end_of_day() {
    let app = helpers::TestApp::new();
    let alert_id = org_alert(&app, "Expense reports").await;
    let token = app.member_token(Uuid::new_v4(), "pat@example.com");
    let before = Utc::now();

    let response = app
        .request(
            "PUT",
            &format!("/api/alerts/{alert_id}/snooze"),
            Some(json!({})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let until = timestamp(&response.body["data"]["snoozed_until"]).expect("snoozed_until");
    assert!(until > before);
    assert!(until <= before + chrono::Duration::days(1));
    assert_eq!(response.body["data"]["read"], false);

    let inbox = app.request("GET", "/api/inbox", None, Some(&token)).await;
    assert_eq!(inbox.body["data"][0]["snoozed_now"], true);
    assert_eq!(inbox.body["data"][0]["next_reminder_due"], Value::Null);
}

#[tokio::test]
async fn test_snooze_does_not_touch_read_state() {
    let app = helpers::TestApp::new();
    let alert_id = org_alert(&app, "Parking lot repaving").await;
    let token = app.member_token(Uuid::new_v4(), "pat@example.com");

    app.request(
        "PUT",
        &format!("/api/alerts/{alert_id}/read"),
        Some(json!({ "read": true })),
        Some(&token),
    )
    .await;
    let response = app
        .request(
            "PUT",
            &format!("/api/alerts/{alert_id}/snooze"),
            Some(json!({ "until": "2099-01-01T00:00:00Z" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["read"], true);
    assert_eq!(
        timestamp(&response.body["data"]["snoozed_until"]),
        "2099-01-01T00:00:00Z".parse().ok()
    );
}

#[tokio::test]
async fn test_snooze_rejects_out_of_range_offset() {
    let app = helpers::TestApp::new();
    let alert_id = org_alert(&app, "Fire drill").await;
    let token = app.member_token(Uuid::new_v4(), "pat@example.com");

    let response = app
        .request(
            "PUT",
            &format!("/api/alerts/{alert_id}/snooze"),
            Some(json!({ "utc_offset_minutes": 2000 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["details"]["field"], "utc_offset_minutes");
}

#[tokio::test]
async fn test_delivery_state_requires_sign_in_and_existing_alert() {
    let app = helpers::TestApp::new();
    let alert_id = org_alert(&app, "Holiday schedule").await;

    let anonymous = app
        .request(
            "PUT",
            &format!("/api/alerts/{alert_id}/read"),
            Some(json!({ "read": true })),
            None,
        )
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let token = app.member_token(Uuid::new_v4(), "pat@example.com");
    let missing = app
        .request(
            "PUT",
            &format!("/api/alerts/{}/read", Uuid::new_v4()),
            Some(json!({ "read": true })),
            Some(&token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_records_are_per_user() {
    let app = helpers::TestApp::new();
    let alert_id = org_alert(&app, "VPN maintenance").await;
    let alice = app.member_token(Uuid::new_v4(), "alice@example.com");
    let bob = app.member_token(Uuid::new_v4(), "bob@example.com");

    app.request(
        "PUT",
        &format!("/api/alerts/{alert_id}/read"),
        Some(json!({ "read": true })),
        Some(&alice),
    )
    .await;

    let bobs = app.request("GET", "/api/deliveries", None, Some(&bob)).await;
    assert_eq!(bobs.body["data"], json!([]));

    let bobs_record = app
        .request(
            "GET",
            &format!("/api/alerts/{alert_id}/delivery"),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(bobs_record.status, StatusCode::OK);
    assert_eq!(bobs_record.body["data"], Value::Null);

    let bob_inbox = app.request("GET", "/api/inbox", None, Some(&bob)).await;
    assert_eq!(bob_inbox.body["data"][0]["read"], false);
    assert!(timestamp(&bob_inbox.body["data"][0]["next_reminder_due"]).is_some());
}

#[tokio::test]
async fn test_deleting_alert_removes_delivery_records() {
    let app = helpers::TestApp::new();
    let alert_id = org_alert(&app, "Temporary notice").await;
    let token = app.member_token(Uuid::new_v4(), "pat@example.com");
    app.request(
        "PUT",
        &format!("/api/alerts/{alert_id}/read"),
        Some(json!({ "read": true })),
        Some(&token),
    )
    .await;

    let admin = app.admin_token();
    let deleted = app
        .request(
            "DELETE",
            &format!("/api/admin/alerts/{alert_id}"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let records = app.request("GET", "/api/deliveries", None, Some(&token)).await;
    assert_eq!(records.body["data"], json!([]));
}

#[tokio::test]
async fn test_inbox_filters_by_severity() {
    let app = helpers::TestApp::new();
    org_alert(&app, "Critical one").await;
    app.create_alert(json!({
        "title": "Informational",
        "message": "FYI",
        "severity": "info",
        "visibility_scope": "org",
    }))
    .await;
    let token = app.member_token(Uuid::new_v4(), "pat@example.com");

    let response = app
        .request("GET", "/api/inbox?severity=info", None, Some(&token))
        .await;
    assert_eq!(response.titles(), vec!["Informational"]);

    let bad = app
        .request("GET", "/api/inbox?severity=urgent", None, Some(&token))
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
}
