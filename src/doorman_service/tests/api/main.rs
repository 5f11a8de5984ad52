mod helpers;

mod auth_flow;
mod password_reset;
mod sessions;
