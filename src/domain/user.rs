use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::id::OfferId;

/// Session state of the current user.
///
/// `Unknown` is the state before the session check settles; gated UI must
/// not render while it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorizationStatus {
    Authenticated,
    Unauthenticated,
    #[default]
    Unknown,
}

impl AuthorizationStatus {
    pub fn is_authenticated(self) -> bool {
        self == Self::Authenticated
    }

    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

/// Profile returned by the session endpoints.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub email: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_pro: bool,
    /// Session token; only present on login responses.
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
    /// Some backends embed the user's favorite ids in the profile.
    #[serde(default)]
    pub favorites: Option<Vec<OfferId>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsError {
    #[error("Email address is not valid")]
    Email,

    #[error("Password must contain at least one letter and one digit")]
    Password,
}

/// Login form payload.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self, CredentialsError> {
        let credentials = Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        };
        credentials.validate()?;
        Ok(credentials)
    }

    pub fn validate(&self) -> Result<(), CredentialsError> {
        let valid_email = match self.email.split_once('@') {
            Some((local, domain)) => !local.is_empty() && domain.contains('.'),
            None => false,
        };
        if !valid_email {
            return Err(CredentialsError::Email);
        }
        let has_letter = self.password.chars().any(char::is_alphabetic);
        let has_digit = self.password.chars().any(|c| c.is_ascii_digit());
        if !has_letter || !has_digit || self.password.chars().any(char::is_whitespace) {
            return Err(CredentialsError::Password);
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
