use std::fmt;

use crate::domain::{Credentials, CredentialsError};
use crate::mvi::UiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

#[derive(Clone, PartialEq, Default)]
pub struct LoginFormState {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    pub error: Option<String>,
    /// Waiting for the sign-in request to settle.
    pub submitting: bool,
}

impl UiState for LoginFormState {}

impl LoginFormState {
    pub fn credentials(&self) -> Result<Credentials, CredentialsError> {
        Credentials::new(self.email.trim(), self.password.clone())
    }

    /// Password rendered as bullets.
    pub fn masked_password(&self) -> String {
        "•".repeat(self.password.chars().count())
    }
}

impl fmt::Debug for LoginFormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginFormState")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("focus", &self.focus)
            .field("error", &self.error)
            .field("submitting", &self.submitting)
            .finish()
    }
}
