//! Integration tests for request recording and the audit listing.

mod helpers;

use axum::http::StatusCode;
use axum::http::header::CONTENT_DISPOSITION;
use chrono::{Days, Utc};

use chedreg_entity::audit::{ActivityKind, HttpMethod, Outcome};

#[tokio::test]
async fn test_anonymous_request_is_not_recorded() {
    let app = helpers::TestApp::new().await;

    let response = app.request("POST", "/events", None).await;
    assert_eq!(response.status, StatusCode::CREATED);

    let response = app.request("GET", "/api/health", None).await;
    assert_eq!(response.status, StatusCode::OK);

    assert!(app.records().await.is_empty());
}

#[tokio::test]
async fn test_invalid_token_is_anonymous() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/me", Some("not-a-token")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(app.records().await.is_empty());
}

#[tokio::test]
async fn test_liaison_approval_is_recorded() {
    let app = helpers::TestApp::new().await;
    let (principal, token) = app.liaison().await;

    let response = app
        .request("POST", "/programmes/42/approve", Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let records = app.records().await;
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.user_id, Some(principal.id));
    assert_eq!(record.route_name.as_deref(), Some("programmes.approve"));
    assert_eq!(record.path, "/programmes/42/approve");
    assert_eq!(record.method, HttpMethod::Post);
    assert_eq!(record.activity, ActivityKind::Approve);
    assert_eq!(record.status, Outcome::Success);
    assert_eq!(record.description, "Approve Programmes / Approve.");
    assert_eq!(record.ip_address.as_deref(), Some("203.0.113.7"));
    assert_eq!(record.user_agent.as_deref(), Some("integration-test"));
}

#[tokio::test]
async fn test_failed_login_is_recorded_as_failed() {
    let app = helpers::TestApp::new().await;
    let (_, token) = app.participant("registrar@hei.edu.ph").await;

    let response = app.request("POST", "/login", Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);

    let records = app.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].activity, ActivityKind::Login);
    assert_eq!(records[0].status, Outcome::Failed);
}

#[tokio::test]
async fn test_listing_view_is_not_recorded() {
    let app = helpers::TestApp::new().await;
    let (_, token) = app.liaison().await;

    app.listing_ids(&token, "").await;
    app.listing_ids(&token, "?status=failed").await;

    assert!(app.records().await.is_empty());
}

#[tokio::test]
async fn test_listing_excludes_views() {
    let app = helpers::TestApp::new().await;
    let (_, token) = app.liaison().await;

    app.request("GET", "/events", Some(&token)).await;
    app.request("POST", "/events", Some(&token)).await;

    let records = app.records().await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].activity, ActivityKind::View);
    assert_eq!(records[0].status, Outcome::Info);

    let ids = app.listing_ids(&token, "").await;
    assert_eq!(ids, vec![records[1].id]);
}

#[tokio::test]
async fn test_pagination_is_stable() {
    let app = helpers::TestApp::new().await;
    let (_, admin) = app.liaison().await;
    let (_, user) = app.participant("registrar@hei.edu.ph").await;

    for _ in 0..12 {
        app.request("POST", "/events", Some(&user)).await;
    }

    let mut expected: Vec<i64> = app.records().await.iter().map(|r| r.id).collect();
    expected.reverse();

    let mut pages = Vec::new();
    for page in 1..=3 {
        let ids = app
            .listing_ids(&admin, &format!("?per_page=5&page={page}"))
            .await;
        pages.extend(ids);
    }
    assert_eq!(pages, expected);

    let response = app
        .request("GET", "/api/admin/audit-logs?per_page=5&page=3", Some(&admin))
        .await;
    let logs = &response.body["data"]["logs"];
    assert_eq!(logs["total_items"], 12);
    assert_eq!(logs["total_pages"], 3);
    assert_eq!(logs["has_next"], false);
    assert_eq!(response.body["data"]["filters"]["per_page"], 5);
}

#[tokio::test]
async fn test_search_by_email_returns_only_that_principal() {
    let app = helpers::TestApp::new().await;
    let (_, admin) = app.liaison().await;
    let (alice, alice_token) = app.participant("alice@hei.edu.ph").await;
    let (_, bob_token) = app.participant("bob@college.edu.ph").await;

    app.request("POST", "/events", Some(&alice_token)).await;
    app.request("POST", "/events", Some(&bob_token)).await;
    app.request("POST", "/programmes/1/approve", Some(&alice_token))
        .await;

    let response = app
        .request(
            "GET",
            "/api/admin/audit-logs?search=ALICE@hei.edu.ph",
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let items = response.body["data"]["logs"]["items"]
        .as_array()
        .expect("items");
    assert_eq!(items.len(), 2);
    let alice_ids: Vec<i64> = app
        .records()
        .await
        .iter()
        .filter(|r| r.user_id == Some(alice.id))
        .map(|r| r.id)
        .collect();
    for item in items {
        assert!(alice_ids.contains(&item["id"].as_i64().expect("id")));
        assert_eq!(item["user"]["name"], "HEI Registrar");
        assert_eq!(item["user"]["role"], "hei");
    }
    assert_eq!(
        response.body["data"]["filters"]["search"],
        "ALICE@hei.edu.ph"
    );
}

#[tokio::test]
async fn test_listing_projection() {
    let app = helpers::TestApp::new().await;
    let (_, token) = app.liaison().await;

    app.request("POST", "/programmes/9/approve", Some(&token))
        .await;

    let response = app
        .request("GET", "/api/admin/audit-logs?status=success", Some(&token))
        .await;
    assert_eq!(response.body["success"], true);

    let item = &response.body["data"]["logs"]["items"][0];
    assert_eq!(item["activity"], "approve");
    assert_eq!(item["status"], "success");
    assert_eq!(item["page"], "Programmes / Approve");
    assert_eq!(item["link"], "/programmes/9/approve");
    assert_eq!(item["description"], "Approve Programmes / Approve.");
    assert_eq!(item["user"]["name"], "Liaison Officer");
    assert_eq!(item["user"]["role"], "ched lo");
    assert_eq!(response.body["data"]["filters"]["status"], "success");
}

#[tokio::test]
async fn test_forbidden_export_is_recorded_as_failed() {
    let app = helpers::TestApp::new().await;
    let (principal, token) = app.participant("registrar@hei.edu.ph").await;

    let response = app
        .request("GET", "/api/admin/audit-logs/export", Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["message"], "Forbidden");

    let records = app.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].user_id, Some(principal.id));
    assert_eq!(records[0].route_name.as_deref(), Some("audit-logs.export"));
    assert_eq!(records[0].activity, ActivityKind::Export);
    assert_eq!(records[0].status, Outcome::Failed);
}

#[tokio::test]
async fn test_export_returns_attachment() {
    let app = helpers::TestApp::new().await;
    let (_, token) = app.liaison().await;

    for _ in 0..3 {
        app.request("POST", "/events", Some(&token)).await;
    }

    let response = app
        .request("GET", "/api/admin/audit-logs/export", Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let disposition = response
        .headers
        .get(CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .expect("content-disposition");
    assert!(disposition.starts_with("attachment;"));
    assert_eq!(response.body["total"], 3);

    // The export itself is audited.
    let records = app.records().await;
    assert_eq!(records.len(), 4);
    assert_eq!(records[3].activity, ActivityKind::Export);
    assert_eq!(records[3].status, Outcome::Success);
}

#[tokio::test]
async fn test_me_reports_categories() {
    let app = helpers::TestApp::new().await;
    let (principal, token) = app.liaison().await;

    let response = app.request("GET", "/api/me", Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], principal.email.as_str());
    assert_eq!(
        response.body["data"]["categories"],
        serde_json::json!(["ched_lo", "ched_admin"])
    );

    let records = app.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].route_name.as_deref(), Some("me.show"));
    assert_eq!(records[0].description, "View Me / Show.");
}

#[tokio::test]
async fn test_listing_date_range_is_inclusive() {
    let app = helpers::TestApp::new().await;
    let (_, token) = app.liaison().await;

    app.request("POST", "/events", Some(&token)).await;
    app.request("POST", "/programmes/3/approve", Some(&token))
        .await;

    let today = Utc::now().date_naive();
    let yesterday = today.checked_sub_days(Days::new(1)).expect("yesterday");
    let tomorrow = today.checked_add_days(Days::new(1)).expect("tomorrow");

    let ids = app
        .listing_ids(&token, &format!("?from={today}&to={today}"))
        .await;
    assert_eq!(ids.len(), 2);

    let ids = app
        .listing_ids(&token, &format!("?from={yesterday}&to={yesterday}"))
        .await;
    assert!(ids.is_empty());

    let ids = app.listing_ids(&token, &format!("?to={yesterday}")).await;
    assert!(ids.is_empty());

    let ids = app.listing_ids(&token, &format!("?from={tomorrow}")).await;
    assert!(ids.is_empty());

    let response = app
        .request(
            "GET",
            &format!("/api/admin/audit-logs?from={today}&to=not-a-date"),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["filters"]["from"], today.to_string());
    assert_eq!(response.body["data"]["filters"]["to"], serde_json::Value::Null);
}
