//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::rc::Rc;

use hoverdock::config::SettingsRecord;
use hoverdock::sim::{MemorySettingsStore, RecordingPresentation, SimHost, SimPanel};
use hoverdock::{Controller, HostEvent, Side};
use serde_json::json;

/// Controller over a simulated host plus handles to observe it
pub struct Harness {
    pub controller: Controller<SimHost>,
    pub presentation: RecordingPresentation,
    pub store: MemorySettingsStore,
    /// Virtual clock in milliseconds
    pub now: u64,
}

impl Harness {
    /// Activated controller over a ready host
    pub fn new(settings: &[(&str, serde_json::Value)]) -> Self {
        Self::with_host(SimHost::new(), settings)
    }

    /// Activated controller over the given host
    pub fn with_host(host: SimHost, settings: &[(&str, serde_json::Value)]) -> Self {
        let mut harness = Self::inactive(host, settings);
        harness.controller.activate();
        harness
    }

    /// Controller that has not been activated yet
    pub fn inactive(host: SimHost, settings: &[(&str, serde_json::Value)]) -> Self {
        let store = MemorySettingsStore::with_record(record(settings));
        let presentation = RecordingPresentation::new();
        let controller = Controller::new(host, presentation.clone(), store.clone());
        Self {
            controller,
            presentation,
            store,
            now: 0,
        }
    }

    /// Deliver an event at the current clock, firing due timers first
    pub fn send(&mut self, event: HostEvent) {
        self.controller.advance(self.now);
        self.controller.handle_event(event, self.now);
    }

    /// Move the clock forward and fire every timer that came due
    pub fn wait(&mut self, ms: u64) {
        self.now += ms;
        self.controller.advance(self.now);
    }

    pub fn pointer(&mut self, x: f64) {
        self.send(HostEvent::PointerMove { x, y: 300.0 });
    }

    pub fn panel(&self, side: Side) -> Rc<SimPanel> {
        self.controller
            .host()
            .sim_panel(side)
            .expect("sim host has both panels")
    }

    pub fn is_collapsed(&self, side: Side) -> bool {
        self.panel(side).is_collapsed_now()
    }

    pub fn is_pinned(&self, side: Side) -> bool {
        self.controller.hover_state(side).is_pinned
    }
}

pub fn record(settings: &[(&str, serde_json::Value)]) -> SettingsRecord {
    settings
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// Settings that make pinning available
pub fn pin_settings() -> Vec<(&'static str, serde_json::Value)> {
    vec![("doubleClickPin", json!(true))]
}

/// A point inside the expanded left panel
pub const LEFT_INSIDE_X: f64 = 150.0;
/// A point inside the expanded right panel
pub const RIGHT_INSIDE_X: f64 = 1000.0;
/// A point outside both panels even when both are expanded
pub const OUTSIDE_X: f64 = 600.0;
