use secrecy::{ExposeSecret, Secret};

use super::DomainError;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 255;

/// A validated raw password.
///
/// Only ever held in memory on its way into the credential store, which
/// hashes it before persisting. Wrapped in [`Secret`] so it cannot leak
/// through debug or log output.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl TryFrom<Secret<String>> for Password {
    type Error = DomainError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        let len = value.expose_secret().chars().count();
        if (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&len) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidPassword)
        }
    }
}

impl TryFrom<String> for Password {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(Secret::from(value))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
