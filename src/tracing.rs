//! Tracing infrastructure for transition diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=hover=debug` - only state machine transitions
//! - `RUST_LOG=hoverdock::runtime=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/hoverdock/logs/hoverdock.log` with daily
//! rotation, always at debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::hover::{HoverMachine, Phase};
use crate::panel::{BoundPanels, Side, SideMap};

/// Initialize tracing subscriber with console and file logging
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "hoverdock.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    // A host may already have installed a subscriber
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of one side for diffing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideInfo {
    /// None when the panel is unbound or its state could not be read
    pub phase: Option<Phase>,
    pub is_pinned: bool,
}

/// Snapshot of both sides taken around each processed intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverSnapshot {
    pub sides: SideMap<SideInfo>,
}

impl HoverSnapshot {
    pub fn capture(machine: &HoverMachine, panels: &BoundPanels) -> Self {
        let info = |side: Side| {
            let state = machine.side(side);
            let phase = panels
                .panel(side)
                .and_then(|p| p.is_collapsed())
                .ok()
                .map(|collapsed| state.phase(collapsed));
            SideInfo {
                phase,
                is_pinned: state.is_pinned,
            }
        };
        Self {
            sides: SideMap::new(info(Side::Left), info(Side::Right)),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &HoverSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        for side in Side::ALL {
            let (before, after) = (self.sides.get(side), other.sides.get(side));
            if before.phase != after.phase {
                changes.push(format!("{}: {:?} → {:?}", side, before.phase, after.phase));
            }
            if before.is_pinned != after.is_pinned {
                let status = if after.is_pinned { "pinned" } else { "unpinned" };
                changes.push(format!("{}: {}", side, status));
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
