//! Hoverdock - hover-triggered, auto-collapsing side panels
//!
//! This crate provides the hover/pin state machine that decides when the two
//! edge-anchored panels of a host layout expand, collapse or stay pinned,
//! together with the event routing and lifecycle management around it.
//! The host supplies panels, events and a clock through the `Host`,
//! `Presentation` and `SettingsStore` traits.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod geometry;
pub mod host;
pub mod hover;
pub mod listeners;
pub mod messages;
pub mod panel;
pub mod presentation;
pub mod replay;
pub mod router;
pub mod runtime;
pub mod settings;
pub mod sim;
pub mod tracing;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::HoverConfig;
pub use host::Host;
pub use messages::{HostEvent, Intent};
pub use panel::Side;
pub use runtime::Controller;
