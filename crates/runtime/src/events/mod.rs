//! Topic-based event bus for session events.
//!
//! Workers publish what happened to their session; hosts and tests subscribe
//! to the topics they care about.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{ActionEvent, LifecycleEvent};
