use crate::mvi::Reducer;

use super::intent::LoginIntent;
use super::state::{LoginField, LoginFormState};

pub struct LoginReducer;

impl Reducer for LoginReducer {
    type State = LoginFormState;
    type Intent = LoginIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            LoginIntent::Reset => LoginFormState::default(),
            // Input is ignored while a request is outstanding.
            LoginIntent::Type(_) | LoginIntent::Backspace | LoginIntent::NextField
                if state.submitting =>
            {
                state
            }
            LoginIntent::Type(ch) => {
                field_mut(&mut state).push(ch);
                state.error = None;
                state
            }
            LoginIntent::Backspace => {
                field_mut(&mut state).pop();
                state.error = None;
                state
            }
            LoginIntent::NextField => {
                state.focus = match state.focus {
                    LoginField::Email => LoginField::Password,
                    LoginField::Password => LoginField::Email,
                };
                state
            }
            LoginIntent::Rejected(message) => {
                state.error = Some(message);
                state
            }
            LoginIntent::Submitted => {
                state.submitting = true;
                state.error = None;
                state
            }
            LoginIntent::Failed(message) => {
                state.submitting = false;
                state.password.clear();
                state.focus = LoginField::Password;
                state.error = Some(message);
                state
            }
        }
    }
}

fn field_mut(state: &mut LoginFormState) -> &mut String {
    match state.focus {
        LoginField::Email => &mut state.email,
        LoginField::Password => &mut state.password,
    }
}
