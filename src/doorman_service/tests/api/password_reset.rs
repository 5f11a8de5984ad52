use axum::http::StatusCode;

use crate::helpers::{TestApp, body_json, code_from_reset_link, cookie_value};

#[tokio::test]
async fn reset_flow_changes_the_password_and_revokes_sessions() {
    let app = TestApp::spawn();
    let registered = app.register("user@example.com", "the-old-password").await;
    let old_refresh = cookie_value(&registered, "refreshToken").unwrap();

    let response = app
        .post_json(
            "/auth/password/forgot",
            serde_json::json!({ "email": "user@example.com" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let code = code_from_reset_link(&app.emails.last_message());
    let response = app
        .post_json(
            "/auth/password/reset",
            serde_json::json!({
                "password": "the-new-password",
                "verificationCode": code,
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Old credential dead, new one live.
    let old = app.login("user@example.com", "the-old-password").await;
    assert_eq!(old.status(), StatusCode::UNAUTHORIZED);
    let new = app.login("user@example.com", "the-new-password").await;
    assert_eq!(new.status(), StatusCode::OK);

    // Every pre-reset session was revoked.
    let refreshed = app
        .get_with_cookies("/auth/refresh", &format!("refreshToken={old_refresh}"))
        .await;
    assert_eq!(refreshed.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn reset_code_is_single_use() {
    let app = TestApp::spawn();
    app.register("user@example.com", "the-old-password").await;
    app.post_json(
        "/auth/password/forgot",
        serde_json::json!({ "email": "user@example.com" }),
    )
    .await;
    let code = code_from_reset_link(&app.emails.last_message());

    let first = app
        .post_json(
            "/auth/password/reset",
            serde_json::json!({ "password": "the-new-password", "verificationCode": code }),
        )
        .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .post_json(
            "/auth/password/reset",
            serde_json::json!({ "password": "yet-another-password", "verificationCode": code }),
        )
        .await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn forgot_password_does_not_reveal_unknown_accounts() {
    let app = TestApp::spawn();

    let response = app
        .post_json(
            "/auth/password/forgot",
            serde_json::json!({ "email": "nobody@example.com" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn repeated_forgot_password_requests_hit_the_rate_limit() {
    let app = TestApp::spawn();
    app.register("user@example.com", "a-strong-password").await;
    let body = serde_json::json!({ "email": "user@example.com" });

    // The policy allows one prior code inside the window.
    assert_eq!(
        app.post_json("/auth/password/forgot", body.clone())
            .await
            .status(),
        StatusCode::OK
    );
    assert_eq!(
        app.post_json("/auth/password/forgot", body.clone())
            .await
            .status(),
        StatusCode::OK
    );

    let third = app.post_json("/auth/password/forgot", body).await;
    assert_eq!(third.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        body_json(third).await["message"],
        "Too many requests, please try again later"
    );
}
