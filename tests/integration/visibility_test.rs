//! Integration tests for the visibility query.

mod helpers;

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

fn org_alert(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "message": "Applies to everyone",
        "severity": "info",
        "visibility_scope": "org",
    })
}

#[tokio::test]
async fn test_org_alert_visible_to_anonymous() {
    let app = helpers::TestApp::new();
    app.create_alert(org_alert("Office closed Friday")).await;

    let response = app.request("GET", "/api/alerts/visible", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.titles(), vec!["Office closed Friday"]);
}

#[tokio::test]
async fn test_team_alert_only_for_matching_team() {
    let app = helpers::TestApp::new();
    app.create_alert(json!({
        "title": "Eng standup moved",
        "message": "10:30 today",
        "severity": "warning",
        "visibility_scope": "teams",
        "team_ids": ["eng", "sre"],
    }))
    .await;

    let eng = app
        .request("GET", "/api/alerts/visible?team=sre", None, None)
        .await;
    assert_eq!(eng.titles(), vec!["Eng standup moved"]);

    let sales = app
        .request("GET", "/api/alerts/visible?team=sales", None, None)
        .await;
    assert!(sales.titles().is_empty());

    let nobody = app.request("GET", "/api/alerts/visible", None, None).await;
    assert!(nobody.titles().is_empty());
}

#[tokio::test]
async fn test_user_alert_matches_email_case_insensitively() {
    let app = helpers::TestApp::new();
    app.create_alert(json!({
        "title": "Laptop replacement ready",
        "message": "Pick it up at the front desk",
        "severity": "info",
        "visibility_scope": "users",
        "user_emails": ["Dana@Example.com"],
    }))
    .await;

    let dana = app.member_token(Uuid::new_v4(), "dana@example.COM");
    let response = app
        .request("GET", "/api/alerts/visible", None, Some(&dana))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.titles(), vec!["Laptop replacement ready"]);

    let lee = app.member_token(Uuid::new_v4(), "lee@example.com");
    let response = app
        .request("GET", "/api/alerts/visible", None, Some(&lee))
        .await;
    assert!(response.titles().is_empty());
}

#[tokio::test]
async fn test_user_alert_matches_user_id() {
    let app = helpers::TestApp::new();
    let target = Uuid::new_v4();
    app.create_alert(json!({
        "title": "Badge expiring",
        "message": "Renew before the end of the month",
        "severity": "warning",
        "visibility_scope": "users",
        "user_ids": [target],
    }))
    .await;

    let token = app.member_token(target, "someone@example.com");
    let response = app
        .request("GET", "/api/alerts/visible", None, Some(&token))
        .await;
    assert_eq!(response.titles(), vec!["Badge expiring"]);
}

#[tokio::test]
async fn test_inactive_and_expired_alerts_hidden() {
    let app = helpers::TestApp::new();
    app.create_alert(org_alert("Still relevant")).await;
    let mut inactive = org_alert("Paused");
    inactive["active"] = json!(false);
    app.create_alert(inactive).await;
    let mut expired = org_alert("Last week");
    expired["expires_at"] = json!("2020-01-01T00:00:00Z");
    app.create_alert(expired).await;

    let response = app.request("GET", "/api/alerts/visible", None, None).await;
    assert_eq!(response.titles(), vec!["Still relevant"]);
}

#[tokio::test]
async fn test_results_keep_creation_order() {
    let app = helpers::TestApp::new();
    for title in ["first", "second", "third"] {
        app.create_alert(org_alert(title)).await;
    }

    let response = app.request("GET", "/api/alerts/visible", None, None).await;
    assert_eq!(response.titles(), vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_anonymous_email_query_requires_trust() {
    let app = helpers::TestApp::new();
    let response = app
        .request("GET", "/api/alerts/visible?email=a@example.com", None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let trusting = helpers::TestApp::with_config(|c| c.alerts.trust_query_identity = true);
    trusting
        .create_alert(json!({
            "title": "Direct note",
            "message": "Hi",
            "severity": "info",
            "visibility_scope": "users",
            "user_emails": ["a@example.com"],
        }))
        .await;
    let response = trusting
        .request("GET", "/api/alerts/visible?email=A@example.com", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.titles(), vec!["Direct note"]);
}

#[tokio::test]
async fn test_signed_in_caller_cannot_query_as_someone_else() {
    let app = helpers::TestApp::new();
    let token = app.member_token(Uuid::new_v4(), "me@example.com");

    let response = app
        .request(
            "GET",
            "/api/alerts/visible?email=boss@example.com",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let app = helpers::TestApp::new();
    let response = app
        .request("GET", "/api/alerts/visible", None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_blank_uid_treated_as_absent() {
    let app = helpers::TestApp::new();
    app.create_alert(org_alert("All hands")).await;

    let response = app
        .request("GET", "/api/alerts/visible?team=eng&uid=", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.titles(), vec!["All hands"]);

    let malformed = app
        .request("GET", "/api/alerts/visible?uid=abc", None, None)
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.body["details"]["field"], "uid");
}
