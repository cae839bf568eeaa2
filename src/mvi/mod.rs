//! Model-View-Intent primitives shared by the entity store and the screens.
//!
//! # Data flow
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────── coordinator ◄────────┘
//! ```
//!
//! - **State**: immutable snapshot; cloning is cheap because payloads are `Arc`ed
//! - **Intent**: a user action or a settled fetch
//! - **Reducer**: pure `(State, Intent) -> State` transition

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
