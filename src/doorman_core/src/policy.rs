use chrono::Duration;

/// Orchestration durations, passed explicitly into the use cases
/// instead of living as module-level constants.
#[derive(Debug, Clone, Copy)]
pub struct AuthPolicy {
    /// Lifetime of a session from creation or renewal.
    pub session_ttl: Duration,
    /// A refresh inside this window before expiry extends the session
    /// and rotates the refresh token; outside it, only a new access
    /// token is issued.
    pub session_renewal_window: Duration,
    /// Email verification codes are deliberately long-lived - nothing
    /// besides the verify click gates them.
    pub email_verification_ttl: Duration,
    pub password_reset_ttl: Duration,
    /// Window inspected by the reset-request rate limit.
    pub reset_request_window: Duration,
    /// Prior codes allowed inside the window before a request is
    /// rejected with TooManyRequests.
    pub max_recent_reset_requests: u64,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self {
            session_ttl: Duration::days(30),
            session_renewal_window: Duration::hours(24),
            email_verification_ttl: Duration::days(365),
            password_reset_ttl: Duration::hours(1),
            reset_request_window: Duration::minutes(5),
            max_recent_reset_requests: 1,
        }
    }
}
