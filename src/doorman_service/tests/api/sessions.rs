use axum::http::StatusCode;

use crate::helpers::{TestApp, body_json, cookie_value};

#[tokio::test]
async fn listing_marks_the_calling_session_as_current() {
    let app = TestApp::spawn();
    app.register("user@example.com", "a-strong-password").await;
    let login = app.login("user@example.com", "a-strong-password").await;
    let access = cookie_value(&login, "accessToken").unwrap();

    let response = app
        .get_with_cookies("/sessions", &format!("accessToken={access}"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let sessions = body_json(response).await;
    let sessions = sessions.as_array().unwrap();
    assert_eq!(sessions.len(), 2);

    let current: Vec<bool> = sessions
        .iter()
        .map(|s| s["isCurrent"].as_bool().unwrap_or(false))
        .collect();
    assert_eq!(current.iter().filter(|c| **c).count(), 1);
    // Newest first, and the login session is the newest.
    assert!(current[0]);
}

#[tokio::test]
async fn a_session_can_be_revoked_from_another_device() {
    let app = TestApp::spawn();
    app.register("user@example.com", "a-strong-password").await;
    let login = app.login("user@example.com", "a-strong-password").await;
    let access = cookie_value(&login, "accessToken").unwrap();
    let cookies = format!("accessToken={access}");

    let listed = app.get_with_cookies("/sessions", &cookies).await;
    let sessions = body_json(listed).await;
    let other_id = sessions
        .as_array()
        .unwrap()
        .iter()
        .find(|s| !s["isCurrent"].as_bool().unwrap_or(false))
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .delete_with_cookies(&format!("/sessions/{other_id}"), &cookies)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let listed = app.get_with_cookies("/sessions", &cookies).await;
    assert_eq!(body_json(listed).await.as_array().unwrap().len(), 1);

    // Gone means a second delete has nothing to match.
    let again = app
        .delete_with_cookies(&format!("/sessions/{other_id}"), &cookies)
        .await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn session_endpoints_require_authentication() {
    let app = TestApp::spawn();

    let response = app.get("/sessions").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["errorCode"], "InvalidAccessToken");
}
