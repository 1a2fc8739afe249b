//! Message types
//!
//! Host input arrives as `HostEvent`, the router turns it into `Intent`s for
//! the state machine, and delayed actions come back as `TimerMsg`.

use serde::{Deserialize, Serialize};

use crate::panel::Side;

/// Opaque identity of a host element, used only for double-click detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

/// Where the pointer went when it left a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveDestination {
    /// Anywhere that is not floating host UI
    #[default]
    Outside,
    /// Inside a tab-header container
    TabHeader,
    /// Inside an open menu overlay
    Menu,
}

impl LeaveDestination {
    /// Floating host UI renders outside the panel but still belongs to it
    pub fn counts_as_inside(&self) -> bool {
        matches!(self, LeaveDestination::TabHeader | LeaveDestination::Menu)
    }
}

/// Raw events delivered by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    /// Host layout is ready (fires once)
    LayoutReady,
    /// Host layout changed; panel references may be stale
    LayoutChange,
    /// Pointer moved anywhere on the application surface
    PointerMove { x: f64, y: f64 },
    /// Click anywhere on the application surface
    Click { target: ElementId, x: f64, y: f64 },
    /// Pointer entered a panel's region
    PanelEnter { side: Side },
    /// Pointer left a panel's region
    PanelLeave {
        side: Side,
        #[serde(default)]
        destination: LeaveDestination,
    },
    /// Pointer moved inside a panel's region
    PanelMove { side: Side },
    /// Pointer entered the ribbon
    RibbonEnter,
}

impl HostEvent {
    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::LayoutReady => "LayoutReady",
            HostEvent::LayoutChange => "LayoutChange",
            HostEvent::PointerMove { .. } => "PointerMove",
            HostEvent::Click { .. } => "Click",
            HostEvent::PanelEnter { .. } => "PanelEnter",
            HostEvent::PanelLeave { .. } => "PanelLeave",
            HostEvent::PanelMove { .. } => "PanelMove",
            HostEvent::RibbonEnter => "RibbonEnter",
        }
    }
}

/// Router output: what the pointer activity means for one side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Pointer reached the edge band or the ribbon
    EnterTriggerZone(Side),
    /// Pointer left the edge band before the pending expand fired
    LeaveTriggerZone(Side),
    /// Pointer entered the panel region
    EnterPanel(Side),
    /// Pointer left the panel region for somewhere that is not floating host UI
    LeavePanel(Side),
    /// Pointer is moving inside the panel region
    HoverPanel(Side),
    /// Single click outside both panel regions
    ClickOutside,
    /// Double click inside this side's panel region
    TogglePin(Side),
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::EnterTriggerZone(_) => "EnterTriggerZone",
            Intent::LeaveTriggerZone(_) => "LeaveTriggerZone",
            Intent::EnterPanel(_) => "EnterPanel",
            Intent::LeavePanel(_) => "LeavePanel",
            Intent::HoverPanel(_) => "HoverPanel",
            Intent::ClickOutside => "ClickOutside",
            Intent::TogglePin(_) => "TogglePin",
        }
    }

    /// Purely visual intents, skipped by transition logging
    pub fn is_noisy(&self) -> bool {
        matches!(self, Intent::HoverPanel(_))
    }
}

/// Delayed actions; each one re-validates live state when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerMsg {
    ExpandDue(Side),
    CollapseDue(Side),
    /// Debounced forced reinitialize after layout changes
    Reinitialize,
}
