//! Runtime module - driving the state machine from a host event loop
//!
//! - `timers` - deterministic timer queue over the host clock
//! - `lifecycle` - activation, binding, listener management and rebinding

pub mod lifecycle;
pub mod timers;

pub use lifecycle::{Controller, LifecycleState, REINIT_DEBOUNCE_MS};
pub use timers::TimerQueue;
