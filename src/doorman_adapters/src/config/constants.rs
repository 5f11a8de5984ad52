pub mod env {
    /// Prefix for every environment override, e.g.
    /// `DOORMAN__DATABASE__URL`.
    pub const ENV_PREFIX: &str = "DOORMAN";
    pub const ENV_SEPARATOR: &str = "__";
}

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:4004";
    pub const APP_ORIGIN: &str = "http://localhost:5173";

    pub mod email_client {
        use std::time::Duration;

        pub const BASE_URL: &str = "https://api.resend.com";
        pub const SENDER: &str = "Doorman <no-reply@doorman.dev>";
        pub const TIMEOUT: Duration = Duration::from_secs(10);
    }

    pub mod tokens {
        pub const ACCESS_TTL_SECONDS: i64 = 15 * 60;
        pub const REFRESH_TTL_SECONDS: i64 = 30 * 24 * 60 * 60;
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";

    pub mod email_client {
        use std::time::Duration;

        pub const SENDER: &str = "test@email.com";
        pub const TIMEOUT: Duration = Duration::from_millis(200);
    }
}
