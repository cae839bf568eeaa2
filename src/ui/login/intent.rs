use crate::mvi::Intent;

#[derive(Debug, Clone)]
pub enum LoginIntent {
    Reset,
    Type(char),
    Backspace,
    /// Tab: email -> password -> email.
    NextField,
    /// Local validation failed; stay on the form.
    Rejected(String),
    /// Credentials were handed to the coordinator.
    Submitted,
    /// The sign-in request failed.
    Failed(String),
}

impl Intent for LoginIntent {}
