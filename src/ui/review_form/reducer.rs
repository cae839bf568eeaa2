use crate::mvi::Reducer;

use super::intent::ReviewFormIntent;
use super::state::ReviewFormState;

pub struct ReviewFormReducer;

impl Reducer for ReviewFormReducer {
    type State = ReviewFormState;
    type Intent = ReviewFormIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match (state, intent) {
            (ReviewFormState::Hidden, ReviewFormIntent::Open) => ReviewFormState::Editing {
                rating: 0,
                comment: String::new(),
                error: None,
            },
            (state @ ReviewFormState::Submitting { .. }, ReviewFormIntent::Close) => state,
            (_, ReviewFormIntent::Close) => ReviewFormState::Hidden,

            (ReviewFormState::Editing { comment, .. }, ReviewFormIntent::Rate(rating)) => {
                ReviewFormState::Editing {
                    rating: rating.min(5),
                    comment,
                    error: None,
                }
            }
            (ReviewFormState::Editing { rating, mut comment, .. }, ReviewFormIntent::Type(ch)) => {
                comment.push(ch);
                ReviewFormState::Editing {
                    rating,
                    comment,
                    error: None,
                }
            }
            (ReviewFormState::Editing { rating, mut comment, .. }, ReviewFormIntent::Backspace) => {
                comment.pop();
                ReviewFormState::Editing {
                    rating,
                    comment,
                    error: None,
                }
            }
            (ReviewFormState::Editing { rating, comment, .. }, ReviewFormIntent::Rejected(message)) => {
                ReviewFormState::Editing {
                    rating,
                    comment,
                    error: Some(message),
                }
            }
            (ReviewFormState::Editing { rating, comment, .. }, ReviewFormIntent::Submitted) => {
                ReviewFormState::Submitting { rating, comment }
            }

            (ReviewFormState::Submitting { .. }, ReviewFormIntent::Posted) => ReviewFormState::Hidden,
            (ReviewFormState::Submitting { rating, comment }, ReviewFormIntent::Failed(message)) => {
                ReviewFormState::Editing {
                    rating,
                    comment,
                    error: Some(message),
                }
            }

            (state, _) => state,
        }
    }
}
