//! Scenario replay against the simulated host
//!
//! A scenario is a YAML document of timed host events:
//!
//! ```yaml
//! settings:
//!   doubleClickPin: true
//! steps:
//!   - { at: 0, event: pointer_move, x: 15, y: 300 }
//!   - { at: 40, event: click, target: 7, x: 100, y: 100 }
//! until: 500
//! ```
//!
//! Timers due before a step fire before that step is delivered.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::config::SettingsRecord;
use crate::messages::HostEvent;
use crate::panel::{Side, SideMap};
use crate::presentation::NoPresentation;
use crate::runtime::Controller;
use crate::sim::{MemorySettingsStore, SimHost};

/// How long after the last step to keep firing timers by default
const DEFAULT_TAIL_MS: u64 = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    /// Host clock in milliseconds
    pub at: u64,
    #[serde(flatten)]
    pub event: HostEvent,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub settings: SettingsRecord,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub steps: Vec<Step>,
    /// Final clock value; defaults to one second after the last step
    #[serde(default)]
    pub until: Option<u64>,
}

impl Scenario {
    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse scenario")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::from_yaml(&content)
    }

    fn end_ms(&self) -> u64 {
        let last = self.steps.iter().map(|s| s.at).max().unwrap_or(0);
        self.until
            .unwrap_or(last.saturating_add(DEFAULT_TAIL_MS))
            .max(last)
    }
}

/// Panel state observed after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelReport {
    pub collapsed: bool,
    pub hovering: bool,
    pub pinned: bool,
    pub expand_calls: usize,
    pub collapse_calls: usize,
}

impl std::fmt::Display for PanelReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{} (expand x{}, collapse x{})",
            if self.collapsed { "collapsed" } else { "expanded" },
            if self.hovering { " hovering" } else { "" },
            if self.pinned { " pinned" } else { "" },
            self.expand_calls,
            self.collapse_calls
        )
    }
}

#[derive(Debug, Clone)]
pub struct StepReport {
    pub at: u64,
    pub event: &'static str,
    pub panels: SideMap<Option<PanelReport>>,
}

#[derive(Debug, Clone)]
pub struct ReplayReport {
    pub steps: Vec<StepReport>,
    pub end_ms: u64,
    pub final_panels: SideMap<Option<PanelReport>>,
    pub reinitializations: usize,
}

/// Run a scenario to completion
pub fn run(scenario: &Scenario) -> ReplayReport {
    let mut host = SimHost::new();
    if let Some(width) = scenario.width {
        host.set_width(width);
    }
    let store = MemorySettingsStore::with_record(scenario.settings.clone());
    let mut controller = Controller::new(host, NoPresentation, store);
    controller.activate();

    let mut steps = Vec::with_capacity(scenario.steps.len());
    let mut ordered: Vec<&Step> = scenario.steps.iter().collect();
    ordered.sort_by_key(|s| s.at);

    for step in ordered {
        controller.advance(step.at);
        controller.handle_event(step.event.clone(), step.at);
        steps.push(StepReport {
            at: step.at,
            event: step.event.name(),
            panels: observe(&controller),
        });
    }

    let end_ms = scenario.end_ms();
    controller.advance(end_ms);

    ReplayReport {
        steps,
        end_ms,
        final_panels: observe(&controller),
        reinitializations: controller.reinitialize_count(),
    }
}

fn observe(controller: &Controller<SimHost>) -> SideMap<Option<PanelReport>> {
    let report = |side: Side| {
        controller.host().sim_panel(side).map(|panel| {
            let state = controller.hover_state(side);
            PanelReport {
                collapsed: panel.is_collapsed_now(),
                hovering: state.is_hovering,
                pinned: state.is_pinned,
                expand_calls: panel.expand_calls(),
                collapse_calls: panel.collapse_calls(),
            }
        })
    };
    SideMap::new(report(Side::Left), report(Side::Right))
}
