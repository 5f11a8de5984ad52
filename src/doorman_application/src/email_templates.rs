//! Rendered bodies for the two outbound emails.

use doorman_core::{Email, EmailMessage};

pub fn verify_email_message(to: Email, url: &str) -> EmailMessage {
    EmailMessage {
        to,
        subject: "Please verify your email".to_string(),
        text: format!("Click on the link to verify your email address: {url}"),
        html: format!(
            "<p>Click on the link below to verify your email address.</p>\
             <p><a href=\"{url}\">Verify email</a></p>"
        ),
    }
}

pub fn password_reset_message(to: Email, url: &str) -> EmailMessage {
    EmailMessage {
        to,
        subject: "Password reset request".to_string(),
        text: format!("Click on the link to reset your password: {url}"),
        html: format!(
            "<p>Click on the link below to reset your password. The link \
             expires in one hour.</p>\
             <p><a href=\"{url}\">Reset password</a></p>"
        ),
    }
}
