//! Event router: raw host events to state machine intents
//!
//! Pointer moves are classified against the edge bands (and the ribbon),
//! clicks are split into single and double clicks, and panel enter/leave
//! events are filtered for floating host UI before they become intents.

use crate::config::HoverConfig;
use crate::geometry::Point;
use crate::hover::HoverMachine;
use crate::messages::{ElementId, HostEvent, Intent};
use crate::panel::{BoundPanels, PanelError, Side};

/// Two clicks on the same element closer than this are a double click
pub const DOUBLE_CLICK_MS: u64 = 300;

/// Click tracking state for double click detection
#[derive(Debug, Default, Clone)]
pub struct ClickTracker {
    last_click_ms: Option<u64>,
    last_target: Option<ElementId>,
}

impl ClickTracker {
    /// Record a click and report whether it completes a double click.
    /// Every click overwrites the tracked time and target.
    pub fn track(&mut self, target: ElementId, now_ms: u64) -> bool {
        let is_rapid = self
            .last_click_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < DOUBLE_CLICK_MS);
        let is_same_target = self.last_target == Some(target);

        self.last_click_ms = Some(now_ms);
        self.last_target = Some(target);

        is_rapid && is_same_target
    }
}

/// Read-only view of everything the router needs to classify an event
pub struct RouteContext<'a> {
    pub config: &'a HoverConfig,
    pub machine: &'a HoverMachine,
    pub panels: &'a BoundPanels,
    pub surface_width: f64,
}

#[derive(Debug, Default)]
pub struct EventRouter {
    clicks: ClickTracker,
}

impl EventRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate one host event into intents, in the order they must be applied
    pub fn route(
        &mut self,
        event: &HostEvent,
        now_ms: u64,
        ctx: &RouteContext<'_>,
    ) -> Result<Vec<Intent>, PanelError> {
        match event {
            HostEvent::PointerMove { x, y } => pointer_move(Point::new(*x, *y), ctx),

            HostEvent::Click { target, x, y } => {
                let is_double = self.clicks.track(*target, now_ms);
                let pt = Point::new(*x, *y);

                if is_double && ctx.config.double_click_pin {
                    // The second click of a double click is not also a single click
                    let mut intents = Vec::new();
                    for side in Side::ALL {
                        if let Ok(panel) = ctx.panels.panel(side) {
                            if panel.contains(pt)? {
                                intents.push(Intent::TogglePin(side));
                            }
                        }
                    }
                    return Ok(intents);
                }

                let (Ok(left), Ok(right)) = (
                    ctx.panels.panel(Side::Left),
                    ctx.panels.panel(Side::Right),
                ) else {
                    return Ok(Vec::new());
                };
                if !left.contains(pt)? && !right.contains(pt)? {
                    Ok(vec![Intent::ClickOutside])
                } else {
                    Ok(Vec::new())
                }
            }

            HostEvent::PanelEnter { side } => Ok(vec![Intent::EnterPanel(*side)]),

            HostEvent::PanelLeave { side, destination } => {
                if destination.counts_as_inside() {
                    tracing::trace!(%side, ?destination, "leave suppressed");
                    Ok(Vec::new())
                } else {
                    Ok(vec![Intent::LeavePanel(*side)])
                }
            }

            HostEvent::PanelMove { side } => Ok(vec![Intent::HoverPanel(*side)]),

            HostEvent::RibbonEnter => Ok(vec![Intent::EnterTriggerZone(Side::Left)]),

            // Lifecycle events never reach the state machine
            HostEvent::LayoutReady | HostEvent::LayoutChange => Ok(Vec::new()),
        }
    }
}

/// Right side first, then left
fn pointer_move(pt: Point, ctx: &RouteContext<'_>) -> Result<Vec<Intent>, PanelError> {
    let mut intents = Vec::new();
    for side in [Side::Right, Side::Left] {
        if !ctx.config.side_enabled(side) {
            continue;
        }
        let Ok(panel) = ctx.panels.panel(side) else {
            continue;
        };
        let state = ctx.machine.side(side);
        if state.is_pinned || !panel.is_collapsed()? {
            continue;
        }

        let in_zone = in_trigger_zone(side, pt, ctx);
        if in_zone && !state.is_hovering {
            intents.push(Intent::EnterTriggerZone(side));
        } else if !in_zone && state.is_hovering {
            intents.push(Intent::LeaveTriggerZone(side));
        }
    }
    Ok(intents)
}

fn in_trigger_zone(side: Side, pt: Point, ctx: &RouteContext<'_>) -> bool {
    let px = ctx.config.trigger_px(side) as f64;
    match side {
        Side::Left => pt.x <= px || ctx.panels.ribbon_contains(pt),
        Side::Right => pt.x >= ctx.surface_width - px,
    }
}
