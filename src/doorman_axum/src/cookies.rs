use axum_extra::extract::cookie::{Cookie, SameSite};

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// The refresh cookie is scoped to this path so browsers only attach
/// the long-lived token to the one endpoint that needs it.
pub const REFRESH_PATH: &str = "/auth/refresh";

pub fn access_token_cookie(token: String, ttl: chrono::Duration) -> Cookie<'static> {
    build_cookie(ACCESS_TOKEN_COOKIE, token, "/", ttl)
}

pub fn refresh_token_cookie(token: String, ttl: chrono::Duration) -> Cookie<'static> {
    build_cookie(REFRESH_TOKEN_COOKIE, token, REFRESH_PATH, ttl)
}

/// Removal cookies must carry the same path as the originals or the
/// browser keeps the stale copy.
pub fn access_removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((ACCESS_TOKEN_COOKIE, "")).path("/").build();
    cookie.make_removal();
    cookie
}

pub fn refresh_removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((REFRESH_TOKEN_COOKIE, ""))
        .path(REFRESH_PATH)
        .build();
    cookie.make_removal();
    cookie
}

fn build_cookie(
    name: &'static str,
    value: String,
    path: &'static str,
    ttl: chrono::Duration,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .path(path)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(ttl.num_seconds()))
        .build()
}
