mod intent;
mod reducer;
mod state;

pub use intent::ReviewFormIntent;
pub use reducer::ReviewFormReducer;
pub use state::ReviewFormState;
