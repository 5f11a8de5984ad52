pub mod mock_email_client;
pub mod resend_email_client;
