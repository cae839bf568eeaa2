/// Marker trait for state snapshots.
///
/// `PartialEq` lets the event loop skip redraws when a transition changed
/// nothing; `Default` lets owners `mem::take` the state into a reducer.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
