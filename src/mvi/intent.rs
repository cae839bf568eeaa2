/// Marker trait for intents.
///
/// Intents are either user actions (key presses, form edits) or system
/// events (a fetch settling). Reducers turn them into new states.
pub trait Intent: Send + 'static {}
