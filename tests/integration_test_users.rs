mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::Duration;
use common::{test_now, TestApp};
use serde_json::Value;
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        panic!("Response body is empty. Status: {}", status);
    }
    match serde_json::from_slice(&bytes) {
        Ok(v) => v,
        Err(e) => panic!("Failed to parse JSON: {:?}. Status: {}. Body: {:?}", e, status, String::from_utf8_lossy(&bytes))
    }
}

#[tokio::test]
async fn test_user_list_carries_engagement_and_risk() {
    let app = TestApp::new().await;

    // 3 logins + 2 video views + 1 search inside the 7-day window -> score 42
    let engaged = app.seed_user("engaged@example.com", test_now() + Duration::days(10)).await;
    app.seed_events(&engaged.id, "login", 3, test_now() - Duration::days(1)).await;
    app.seed_events(&engaged.id, "video_view", 2, test_now() - Duration::days(2)).await;
    app.seed_events(&engaged.id, "search", 1, test_now() - Duration::days(3)).await;

    // One video view only -> score 5 -> high risk
    let idle = app.seed_user("idle@example.com", test_now() + Duration::days(10)).await;
    app.seed_events(&idle.id, "video_view", 1, test_now() - Duration::days(1)).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/admin/users")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let users = parse_body(res).await;
    let arr = users.as_array().unwrap();
    assert_eq!(arr.len(), 2);

    let engaged_row = arr.iter().find(|u| u["id"] == engaged.id.as_str()).unwrap();
    assert_eq!(engaged_row["engagement_score"], 42);
    assert_eq!(engaged_row["churn_risk"], "low");

    let idle_row = arr.iter().find(|u| u["id"] == idle.id.as_str()).unwrap();
    assert_eq!(idle_row["engagement_score"], 5);
    assert_eq!(idle_row["churn_risk"], "high");
}

#[tokio::test]
async fn test_events_outside_the_7_day_window_do_not_count() {
    let app = TestApp::new().await;
    let user = app.seed_user("stale@example.com", test_now() + Duration::days(5)).await;
    // Heavy activity, but all of it 8 days old
    app.seed_events(&user.id, "login", 10, test_now() - Duration::days(8)).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/admin/users")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let users = parse_body(res).await;
    let row = &users.as_array().unwrap()[0];
    assert_eq!(row["engagement_score"], 0);
    assert_eq!(row["churn_risk"], "high");
}

#[tokio::test]
async fn test_risk_filter_drives_the_high_risk_view() {
    let app = TestApp::new().await;

    let at_risk = app.seed_user("quiet@example.com", test_now() + Duration::days(5)).await;
    let healthy = app.seed_user("busy@example.com", test_now() + Duration::days(5)).await;
    app.seed_events(&healthy.id, "login", 5, test_now() - Duration::days(1)).await;

    // Super users carry no risk tier and must never match a risk filter
    app.seed_super_user("staff@example.com").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/admin/users?risk=high")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let users = parse_body(res).await;
    let arr = users.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["id"], at_risk.id.as_str());

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/admin/users?risk=low")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let users = parse_body(res).await;
    assert_eq!(users.as_array().unwrap()[0]["id"], healthy.id.as_str());
}

#[tokio::test]
async fn test_super_users_have_no_score_or_risk() {
    let app = TestApp::new().await;
    let staff = app.seed_super_user("staff@example.com").await;
    app.seed_events(&staff.id, "login", 20, test_now() - Duration::days(1)).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/admin/users")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let users = parse_body(res).await;
    let row = &users.as_array().unwrap()[0];
    assert!(row["engagement_score"].is_null());
    assert!(row["churn_risk"].is_null());
}

#[tokio::test]
async fn test_plan_filter_narrows_the_list() {
    let app = TestApp::new().await;
    app.seed_user("trial@example.com", test_now() + Duration::days(10)).await;
    let paid = app.seed_paid_user("paid@example.com").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/admin/users?plan=paid")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let users = parse_body(res).await;
    let arr = users.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["id"], paid.id.as_str());
    assert_eq!(arr[0]["subscription_type"], "monthly");
}

#[tokio::test]
async fn test_unknown_risk_tier_is_a_400() {
    let app = TestApp::new().await;
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/admin/users?risk=extreme")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
