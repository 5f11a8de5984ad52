use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use doorman_adapters::{
    HashMapSessionStore, HashMapUserStore, HashMapVerificationCodeStore, JwtTokenCodec,
    TokenConfig,
};
use doorman_axum::AppState;
use doorman_core::{AuthPolicy, EmailClient, EmailClientError, EmailId, EmailMessage, SystemClock};
use doorman_service::AuthService;
use secrecy::Secret;
use tower::util::ServiceExt;

/// Keeps every outbound message so tests can pull verification and
/// reset codes out of the emailed links.
#[derive(Default, Clone)]
pub struct CapturingEmailClient {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
}

impl CapturingEmailClient {
    pub fn last_message(&self) -> EmailMessage {
        self.sent
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no email was sent")
    }
}

#[async_trait::async_trait]
impl EmailClient for CapturingEmailClient {
    async fn send(&self, message: EmailMessage) -> Result<EmailId, EmailClientError> {
        self.sent.lock().unwrap().push(message);
        Ok(EmailId("test-message-id".to_string()))
    }
}

/// The full router over in-memory stores and a real JWT codec.
pub struct TestApp {
    router: Router,
    pub emails: CapturingEmailClient,
}

impl TestApp {
    pub fn spawn() -> Self {
        let emails = CapturingEmailClient::default();
        let state = AppState {
            user_store: Arc::new(HashMapUserStore::new()),
            session_store: Arc::new(HashMapSessionStore::new()),
            code_store: Arc::new(HashMapVerificationCodeStore::new()),
            email_client: Arc::new(emails.clone()),
            token_codec: Arc::new(JwtTokenCodec::new(
                TokenConfig {
                    secret: Secret::from("access-test-secret".to_owned()),
                    ttl: chrono::Duration::minutes(15),
                },
                TokenConfig {
                    secret: Secret::from("refresh-test-secret".to_owned()),
                    ttl: chrono::Duration::days(30),
                },
            )),
            clock: Arc::new(SystemClock),
            policy: AuthPolicy::default(),
            access_token_ttl: chrono::Duration::minutes(15),
            app_origin: "http://localhost:5173".to_string(),
        };

        let router = AuthService::new(state).as_router(None);
        Self { router, emails }
    }

    pub async fn request(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed")
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.request(request).await
    }

    pub async fn get_with_cookies(&self, uri: &str, cookies: &str) -> Response<Body> {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .header(header::COOKIE, cookies)
            .body(Body::empty())
            .unwrap();
        self.request(request).await
    }

    pub async fn delete_with_cookies(&self, uri: &str, cookies: &str) -> Response<Body> {
        let request = Request::builder()
            .method("DELETE")
            .uri(uri)
            .header(header::COOKIE, cookies)
            .body(Body::empty())
            .unwrap();
        self.request(request).await
    }

    pub async fn register(&self, email: &str, password: &str) -> Response<Body> {
        self.post_json(
            "/auth/register",
            serde_json::json!({
                "email": email,
                "password": password,
                "confirmPassword": password,
            }),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Response<Body> {
        self.post_json(
            "/auth/login",
            serde_json::json!({ "email": email, "password": password }),
        )
        .await
    }
}

/// Value of a named cookie from the response's Set-Cookie headers, or
/// `None` if absent or cleared.
pub fn cookie_value(response: &Response<Body>, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|raw| {
            let pair = raw.split(';').next()?;
            let (cookie_name, value) = pair.split_once('=')?;
            (cookie_name == name && !value.is_empty()).then(|| value.to_string())
        })
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Code id from a `/email/verify/{code}` link.
pub fn code_from_verify_link(message: &EmailMessage) -> String {
    let (_, tail) = message
        .text
        .split_once("/email/verify/")
        .expect("no verify link in email");
    tail.split_whitespace().next().unwrap().to_string()
}

/// Code id from a `/password/reset?code={code}&exp=...` link.
pub fn code_from_reset_link(message: &EmailMessage) -> String {
    let (_, tail) = message
        .text
        .split_once("code=")
        .expect("no reset link in email");
    tail.split('&').next().unwrap().to_string()
}
