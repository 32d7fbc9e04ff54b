//! Model-View-Intent (MVI) primitives.
//!
//! All analysis state flows in one direction:
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: immutable snapshot handed to subscribers
//! - **Intent**: user actions, simulator ticks and request outcomes
//! - **Reducer**: pure function that turns one state into the next

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
