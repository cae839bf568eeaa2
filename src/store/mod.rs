//! Entity store: normalized slices of server data with request status.
//!
//! The store is a passive sink. It changes only when an intent is
//! dispatched, and it is passed by reference to whoever needs it; there is
//! no global instance.

mod intent;
mod reducer;
mod slice;
mod state;

pub use intent::{Payload, StoreIntent};
pub use reducer::StoreReducer;
pub use slice::{FetchError, Generation, RequestStatus, Resource, Slice};
pub use state::EntityState;

use crate::mvi::Reducer;

/// Owner of the current `EntityState`.
#[derive(Debug, Default)]
pub struct Store {
    state: EntityState,
    revision: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: EntityState) -> Self {
        Self { state, revision: 0 }
    }

    pub fn state(&self) -> &EntityState {
        &self.state
    }

    /// Bumped on every dispatch that actually changed the state.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Applies one intent. Returns whether the state changed.
    ///
    /// Slices hold their data behind `Arc`, so the snapshot is shallow and
    /// the comparison is by pointer. Rewriting a slice with equal data still
    /// counts as a change.
    pub fn dispatch(&mut self, intent: StoreIntent) -> bool {
        let before = self.state.clone();
        self.state = StoreReducer::reduce(std::mem::take(&mut self.state), intent);
        let changed = !self.state.same_as(&before);
        if changed {
            self.revision += 1;
        }
        changed
    }
}
