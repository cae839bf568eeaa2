use crate::mvi::Intent;

#[derive(Debug, Clone)]
pub enum ReviewFormIntent {
    Open,
    Close,
    /// 1..=5 stars.
    Rate(u8),
    Type(char),
    Backspace,
    Rejected(String),
    Submitted,
    Posted,
    Failed(String),
}

impl Intent for ReviewFormIntent {}
