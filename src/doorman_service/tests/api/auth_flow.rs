use axum::http::StatusCode;

use crate::helpers::{TestApp, body_json, code_from_verify_link, cookie_value};

#[tokio::test]
async fn register_returns_the_user_and_sets_both_cookies() {
    let app = TestApp::spawn();

    let response = app.register("new@example.com", "a-strong-password").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let access = cookie_value(&response, "accessToken").expect("no access cookie");
    assert_eq!(access.split('.').count(), 3);
    cookie_value(&response, "refreshToken").expect("no refresh cookie");

    let body = body_json(response).await;
    assert_eq!(body["email"], "new@example.com");
    assert_eq!(body["verified"], false);
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict() {
    let app = TestApp::spawn();
    app.register("taken@example.com", "a-strong-password").await;

    let response = app.register("taken@example.com", "another-password").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["message"], "Email already in use");
}

#[tokio::test]
async fn mismatched_password_confirmation_is_rejected() {
    let app = TestApp::spawn();

    let response = app
        .post_json(
            "/auth/register",
            serde_json::json!({
                "email": "new@example.com",
                "password": "a-strong-password",
                "confirmPassword": "a-different-password",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_rejects_bad_credentials_with_one_message() {
    let app = TestApp::spawn();
    app.register("user@example.com", "a-strong-password").await;

    let ok = app.login("user@example.com", "a-strong-password").await;
    assert_eq!(ok.status(), StatusCode::OK);

    let wrong_password = app.login("user@example.com", "not-the-password").await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let first = body_json(wrong_password).await["message"].clone();

    let unknown_email = app.login("nobody@example.com", "a-strong-password").await;
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(unknown_email).await["message"], first);
}

#[tokio::test]
async fn get_user_requires_a_valid_access_token() {
    let app = TestApp::spawn();
    let registered = app.register("user@example.com", "a-strong-password").await;
    let access = cookie_value(&registered, "accessToken").unwrap();

    let response = app
        .get_with_cookies("/user", &format!("accessToken={access}"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["email"], "user@example.com");

    let missing = app.get("/user").await;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(missing).await;
    assert_eq!(body["errorCode"], "InvalidAccessToken");

    let garbage = app.get_with_cookies("/user", "accessToken=garbage").await;
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(garbage).await["message"], "Invalid token");
}

#[tokio::test]
async fn refresh_issues_a_new_access_token() {
    let app = TestApp::spawn();
    let registered = app.register("user@example.com", "a-strong-password").await;
    let refresh = cookie_value(&registered, "refreshToken").unwrap();

    let response = app
        .get_with_cookies("/auth/refresh", &format!("refreshToken={refresh}"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let access = cookie_value(&response, "accessToken").expect("no new access cookie");

    // The fresh token must work against a guarded endpoint.
    let me = app
        .get_with_cookies("/user", &format!("accessToken={access}"))
        .await;
    assert_eq!(me.status(), StatusCode::OK);
}

#[tokio::test]
async fn refresh_without_a_cookie_is_unauthorized() {
    let app = TestApp::spawn();

    let response = app.get("/auth/refresh").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "Missing refresh token");
}

#[tokio::test]
async fn logout_kills_the_session() {
    let app = TestApp::spawn();
    let registered = app.register("user@example.com", "a-strong-password").await;
    let access = cookie_value(&registered, "accessToken").unwrap();
    let refresh = cookie_value(&registered, "refreshToken").unwrap();

    let response = app
        .get_with_cookies("/auth/logout", &format!("accessToken={access}"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    // Cleared cookies come back empty.
    assert!(cookie_value(&response, "accessToken").is_none());
    assert!(cookie_value(&response, "refreshToken").is_none());

    // The session is gone, so the refresh token is useless now.
    let refreshed = app
        .get_with_cookies("/auth/refresh", &format!("refreshToken={refresh}"))
        .await;
    assert_eq!(refreshed.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(refreshed).await["message"], "Session expired");
}

#[tokio::test]
async fn logout_without_a_token_still_succeeds() {
    let app = TestApp::spawn();

    let response = app.get("/auth/logout").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn emailed_code_verifies_the_account_exactly_once() {
    let app = TestApp::spawn();
    let registered = app.register("user@example.com", "a-strong-password").await;
    let access = cookie_value(&registered, "accessToken").unwrap();
    let code = code_from_verify_link(&app.emails.last_message());

    let response = app.get(&format!("/auth/email/verify/{code}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let me = app
        .get_with_cookies("/user", &format!("accessToken={access}"))
        .await;
    assert_eq!(body_json(me).await["verified"], true);

    // Consumed on use.
    let again = app.get(&format!("/auth/email/verify/{code}")).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_verification_code_reads_as_not_found() {
    let app = TestApp::spawn();

    let response = app.get("/auth/email/verify/not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["message"],
        "Invalid or expired verification code"
    );
}

#[tokio::test]
async fn health_probe_reports_healthy() {
    let app = TestApp::spawn();

    let response = app.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "healthy");
}
