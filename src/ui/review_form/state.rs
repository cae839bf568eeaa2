use crate::domain::{ReviewDraft, ReviewDraftError};
use crate::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ReviewFormState {
    #[default]
    Hidden,
    Editing {
        rating: u8,
        comment: String,
        error: Option<String>,
    },
    /// Form is locked until the post settles.
    Submitting { rating: u8, comment: String },
}

impl UiState for ReviewFormState {}

impl ReviewFormState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting { .. })
    }

    pub fn draft(&self) -> Option<Result<ReviewDraft, ReviewDraftError>> {
        match self {
            Self::Editing { rating, comment, .. } => Some(ReviewDraft::new(comment.trim(), *rating)),
            _ => None,
        }
    }
}
