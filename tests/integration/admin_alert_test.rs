//! Integration tests for admin alert management.

mod helpers;

use http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

fn team_alert() -> Value {
    json!({
        "title": "Release train",
        "message": "Cutoff at 16:00",
        "severity": "warning",
        "visibility_scope": "teams",
        "team_ids": ["eng"],
    })
}

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new();
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");

    let detailed = app.request("GET", "/api/health/detailed", None, None).await;
    assert_eq!(detailed.body["data"]["backend"], "memory");
    assert_eq!(detailed.body["data"]["store"], "connected");
}

#[tokio::test]
async fn test_admin_routes_require_admin_role() {
    let app = helpers::TestApp::new();

    let anonymous = app.request("GET", "/api/admin/alerts", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let member = app.member_token(Uuid::new_v4(), "pat@example.com");
    let response = app
        .request("POST", "/api/admin/alerts", Some(team_alert()), Some(&member))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let admin = app.admin_token();
    let response = app
        .request("GET", "/api/admin/alerts", None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_applies_defaults() {
    let app = helpers::TestApp::new();
    let admin = app.admin_token();

    let response = app
        .request("POST", "/api/admin/alerts", Some(team_alert()), Some(&admin))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = &response.body["data"];
    assert_eq!(data["reminder_frequency_hours"], 2);
    assert_eq!(data["active"], true);
    assert_eq!(data["team_ids"], json!(["eng"]));
    assert_eq!(data["user_emails"], Value::Null);
}

#[tokio::test]
async fn test_create_rejects_invalid_input() {
    let app = helpers::TestApp::new();
    let admin = app.admin_token();

    let mut missing_teams = team_alert();
    missing_teams["team_ids"] = Value::Null;
    let response = app
        .request("POST", "/api/admin/alerts", Some(missing_teams), Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["details"]["field"], "team_ids");

    let mut mixed = team_alert();
    mixed["user_emails"] = json!(["pat@example.com"]);
    let response = app
        .request("POST", "/api/admin/alerts", Some(mixed), Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["details"]["field"], "user_emails");

    let mut bad_severity = team_alert();
    bad_severity["severity"] = json!("urgent");
    let response = app
        .request("POST", "/api/admin/alerts", Some(bad_severity), Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["details"]["field"], "severity");

    let mut blank_title = team_alert();
    blank_title["title"] = json!("");
    let response = app
        .request("POST", "/api/admin/alerts", Some(blank_title), Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["details"]["field"], "title");

    let mut zero_reminder = team_alert();
    zero_reminder["reminder_frequency_hours"] = json!(0);
    let response = app
        .request("POST", "/api/admin/alerts", Some(zero_reminder), Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_patch_updates_only_given_fields() {
    let app = helpers::TestApp::new();
    let admin = app.admin_token();
    let id = app.create_alert(team_alert()).await;
    let path = format!("/api/admin/alerts/{id}");

    let response = app
        .request(
            "PATCH",
            &path,
            Some(json!({ "title": "Release train delayed" })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["title"], "Release train delayed");
    assert_eq!(response.body["data"]["team_ids"], json!(["eng"]));

    let widened = app
        .request(
            "PATCH",
            &path,
            Some(json!({ "visibility_scope": "org", "team_ids": null })),
            Some(&admin),
        )
        .await;
    assert_eq!(widened.status, StatusCode::OK);
    assert_eq!(widened.body["data"]["visibility_scope"], "org");
    assert_eq!(widened.body["data"]["team_ids"], Value::Null);

    let unchanged = app.request("PATCH", &path, Some(json!({})), Some(&admin)).await;
    assert_eq!(unchanged.status, StatusCode::OK);
    assert_eq!(unchanged.body["data"], widened.body["data"]);
}

#[tokio::test]
async fn test_patch_into_invalid_scope_rejected() {
    let app = helpers::TestApp::new();
    let admin = app.admin_token();
    let id = app.create_alert(team_alert()).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/admin/alerts/{id}"),
            Some(json!({ "visibility_scope": "users" })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let stored = app
        .request("GET", &format!("/api/admin/alerts/{id}"), None, Some(&admin))
        .await;
    assert_eq!(stored.body["data"]["visibility_scope"], "teams");
}

#[tokio::test]
async fn test_deactivate_hides_alert() {
    let app = helpers::TestApp::new();
    let admin = app.admin_token();
    let id = app
        .create_alert(json!({
            "title": "Cafeteria closed",
            "message": "Kitchen renovation",
            "severity": "info",
            "visibility_scope": "org",
        }))
        .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/alerts/{id}/active"),
            Some(json!({ "active": false })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["active"], false);

    let visible = app.request("GET", "/api/alerts/visible", None, None).await;
    assert!(visible.titles().is_empty());

    let inactive = app
        .request("GET", "/api/admin/alerts?active=false", None, Some(&admin))
        .await;
    assert_eq!(inactive.titles(), vec!["Cafeteria closed"]);
}

#[tokio::test]
async fn test_list_is_newest_first_and_filters() {
    let app = helpers::TestApp::new();
    let admin = app.admin_token();
    app.create_alert(team_alert()).await;
    app.create_alert(json!({
        "title": "Outage",
        "message": "Email is down",
        "severity": "critical",
        "visibility_scope": "org",
    }))
    .await;

    let all = app
        .request("GET", "/api/admin/alerts", None, Some(&admin))
        .await;
    assert_eq!(all.titles(), vec!["Outage", "Release train"]);

    let critical = app
        .request("GET", "/api/admin/alerts?severity=critical", None, Some(&admin))
        .await;
    assert_eq!(critical.titles(), vec!["Outage"]);
}

#[tokio::test]
async fn test_delete_then_missing() {
    let app = helpers::TestApp::new();
    let admin = app.admin_token();
    let id = app.create_alert(team_alert()).await;
    let path = format!("/api/admin/alerts/{id}");

    let deleted = app.request("DELETE", &path, None, Some(&admin)).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["data"]["deleted"], true);

    let again = app.request("DELETE", &path, None, Some(&admin)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);

    let get = app.request("GET", &path, None, Some(&admin)).await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);
    assert_eq!(get.body["error"], "NOT_FOUND");
}
