//! Hover/pin state machine
//!
//! Per side we track two booleans: `is_hovering` (the side is active and not
//! yet resolved collapsed) and `is_pinned` (double-click lock that suppresses
//! every collapse). Together with the panel's own collapsed flag they give the
//! phases `CollapsedIdle`, `HoveringPendingExpand` and `Expanded`; pinning is
//! orthogonal.
//!
//! Delayed expand/collapse actions are never cancelled. When a timer fires it
//! re-reads the live hover flag, so a later intent always wins over an
//! earlier one regardless of how many timers are still in flight.

use crate::commands::Cmd;
use crate::config::HoverConfig;
use crate::messages::{Intent, TimerMsg};
use crate::panel::{BoundPanels, PanelError, PanelProxy, Side, SideMap};

/// Hover and pin flags for one side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideState {
    pub is_hovering: bool,
    pub is_pinned: bool,
}

/// Observable phase of one side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    CollapsedIdle,
    HoveringPendingExpand,
    Expanded,
}

impl SideState {
    /// Derive the phase from our flags and the host-reported collapsed state
    pub fn phase(&self, is_collapsed: bool) -> Phase {
        if !is_collapsed {
            Phase::Expanded
        } else if self.is_hovering {
            Phase::HoveringPendingExpand
        } else {
            Phase::CollapsedIdle
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct HoverMachine {
    sides: SideMap<SideState>,
}

impl HoverMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn side(&self, side: Side) -> SideState {
        *self.sides.get(side)
    }

    pub fn is_hovering(&self, side: Side) -> bool {
        self.sides.get(side).is_hovering
    }

    pub fn is_pinned(&self, side: Side) -> bool {
        self.sides.get(side).is_pinned
    }

    /// Back to `{false, false}` on both sides. Pins are not kept.
    pub fn reset(&mut self) {
        self.sides = SideMap::default();
    }

    /// Process one routed intent
    pub fn update(
        &mut self,
        intent: Intent,
        config: &HoverConfig,
        panels: &BoundPanels,
    ) -> Result<Cmd, PanelError> {
        match intent {
            Intent::EnterTriggerZone(side) => {
                let Some(panel) = bound(panels, side) else {
                    return Ok(Cmd::None);
                };
                let state = self.sides.get_mut(side);
                if !config.side_enabled(side)
                    || state.is_pinned
                    || state.is_hovering
                    || !panel.is_collapsed()?
                {
                    return Ok(Cmd::None);
                }
                state.is_hovering = true;
                tracing::debug!(target: "hover", %side, delay_ms = config.expand_delay_ms, "expand scheduled");
                Ok(Cmd::schedule(config.expand_delay_ms, TimerMsg::ExpandDue(side)))
            }

            Intent::LeaveTriggerZone(side) => {
                let Some(panel) = bound(panels, side) else {
                    return Ok(Cmd::None);
                };
                let state = self.sides.get_mut(side);
                if state.is_hovering && !state.is_pinned && panel.is_collapsed()? {
                    state.is_hovering = false;
                    tracing::debug!(target: "hover", %side, "left trigger zone before expand");
                }
                Ok(Cmd::None)
            }

            Intent::EnterPanel(side) => {
                if !config.side_enabled(side) {
                    return Ok(Cmd::None);
                }
                self.sides.get_mut(side).is_hovering = true;
                Ok(Cmd::SetHovered { side, on: true })
            }

            Intent::HoverPanel(side) => {
                if !config.side_enabled(side) {
                    return Ok(Cmd::None);
                }
                Ok(Cmd::SetHovered { side, on: true })
            }

            Intent::LeavePanel(side) => {
                let unhover = Cmd::SetHovered { side, on: false };
                let state = self.sides.get_mut(side);
                if !config.side_enabled(side) || state.is_pinned {
                    return Ok(unhover);
                }
                state.is_hovering = false;
                tracing::debug!(target: "hover", %side, delay_ms = config.collapse_delay_ms, "collapse scheduled");
                Ok(Cmd::batch(vec![
                    unhover,
                    Cmd::schedule(config.collapse_delay_ms, TimerMsg::CollapseDue(side)),
                ]))
            }

            Intent::ClickOutside => {
                for side in Side::ALL {
                    let Some(panel) = bound(panels, side) else {
                        continue;
                    };
                    if config.side_enabled(side) && !self.is_pinned(side) && !panel.is_collapsed()? {
                        tracing::debug!(target: "hover", %side, "click outside");
                        self.collapse_own(side, panels)?;
                    }
                }
                Ok(Cmd::None)
            }

            Intent::TogglePin(side) => {
                if config.double_click_pin {
                    let state = self.sides.get_mut(side);
                    state.is_pinned = !state.is_pinned;
                    tracing::debug!(target: "hover", %side, pinned = state.is_pinned, "pin toggled");
                }
                Ok(Cmd::None)
            }
        }
    }

    /// A delayed action fired; act only if the hover flag still agrees
    pub fn fire(
        &mut self,
        msg: TimerMsg,
        config: &HoverConfig,
        panels: &BoundPanels,
    ) -> Result<Cmd, PanelError> {
        match msg {
            TimerMsg::ExpandDue(side) => {
                if !self.is_hovering(side) || !config.side_enabled(side) {
                    tracing::debug!(target: "hover", %side, "stale expand timer ignored");
                    return Ok(Cmd::None);
                }
                self.expand_own(side, panels)?;
                if let Some(other) = mirror_target(side, config) {
                    mirror_expand(other, panels)?;
                }
                Ok(Cmd::None)
            }

            TimerMsg::CollapseDue(side) => {
                if self.is_hovering(side) || !config.side_enabled(side) {
                    tracing::debug!(target: "hover", %side, "stale collapse timer ignored");
                    return Ok(Cmd::None);
                }
                self.collapse_own(side, panels)?;
                if let Some(other) = mirror_target(side, config) {
                    if !self.is_pinned(other) {
                        mirror_collapse(other, panels)?;
                    }
                }
                Ok(Cmd::None)
            }

            // Owned by the lifecycle manager
            TimerMsg::Reinitialize => Ok(Cmd::None),
        }
    }

    /// Collapse both sides after a forced reinitialize. Only a pin exempts a
    /// side; the enabled settings do not.
    pub fn collapse_all(&mut self, panels: &BoundPanels) -> Result<(), PanelError> {
        for side in Side::ALL {
            self.collapse_own(side, panels)?;
        }
        Ok(())
    }

    fn expand_own(&mut self, side: Side, panels: &BoundPanels) -> Result<(), PanelError> {
        if let Some(panel) = bound(panels, side) {
            panel.expand()?;
            self.sides.get_mut(side).is_hovering = true;
            tracing::debug!(target: "hover", %side, "expanded");
        }
        Ok(())
    }

    fn collapse_own(&mut self, side: Side, panels: &BoundPanels) -> Result<(), PanelError> {
        if self.is_pinned(side) {
            return Ok(());
        }
        if let Some(panel) = bound(panels, side) {
            panel.collapse()?;
            self.sides.get_mut(side).is_hovering = false;
            tracing::debug!(target: "hover", %side, "collapsed");
        }
        Ok(())
    }
}

fn bound(panels: &BoundPanels, side: Side) -> Option<&PanelProxy> {
    panels.panel(side).ok()
}

/// The side that mirrors `side`'s action, if sync applies
fn mirror_target(side: Side, config: &HoverConfig) -> Option<Side> {
    let other = side.other();
    (config.sync_left_right && config.side_enabled(other)).then_some(other)
}

// Mirrored actions move the panel only; the mirrored side's own flags stay put.
fn mirror_expand(side: Side, panels: &BoundPanels) -> Result<(), PanelError> {
    if let Some(panel) = bound(panels, side) {
        panel.expand()?;
        tracing::debug!(target: "hover", %side, "expanded (sync)");
    }
    Ok(())
}

fn mirror_collapse(side: Side, panels: &BoundPanels) -> Result<(), PanelError> {
    if let Some(panel) = bound(panels, side) {
        panel.collapse()?;
        tracing::debug!(target: "hover", %side, "collapsed (sync)");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimPanel;
    use std::rc::Rc;

    fn panels(left: &Rc<SimPanel>, right: &Rc<SimPanel>) -> BoundPanels {
        BoundPanels::new(Some(left.clone()), Some(right.clone()), None)
    }

    #[test]
    fn test_phase_derivation() {
        let mut s = SideState::default();
        assert_eq!(s.phase(true), Phase::CollapsedIdle);
        s.is_hovering = true;
        assert_eq!(s.phase(true), Phase::HoveringPendingExpand);
        assert_eq!(s.phase(false), Phase::Expanded);
    }

    #[test]
    fn test_enter_schedules_expand_and_fire_expands() {
        let (l, r) = (Rc::new(SimPanel::left()), Rc::new(SimPanel::right()));
        let bp = panels(&l, &r);
        let cfg = HoverConfig::default();
        let mut m = HoverMachine::new();

        let cmd = m.update(Intent::EnterTriggerZone(Side::Left), &cfg, &bp).unwrap();
        assert_eq!(cmd, Cmd::schedule(10, TimerMsg::ExpandDue(Side::Left)));
        assert!(m.is_hovering(Side::Left));

        m.fire(TimerMsg::ExpandDue(Side::Left), &cfg, &bp).unwrap();
        assert!(!l.is_collapsed_now());
        assert_eq!(l.expand_calls(), 1);
        assert_eq!(r.expand_calls(), 0);
    }

    #[test]
    fn test_repeated_enter_while_pending_schedules_once() {
        let (l, r) = (Rc::new(SimPanel::left()), Rc::new(SimPanel::right()));
        let bp = panels(&l, &r);
        let cfg = HoverConfig::default();
        let mut m = HoverMachine::new();

        m.update(Intent::EnterTriggerZone(Side::Left), &cfg, &bp).unwrap();
        let second = m.update(Intent::EnterTriggerZone(Side::Left), &cfg, &bp).unwrap();
        assert_eq!(second, Cmd::None);
    }

    #[test]
    fn test_stale_collapse_timer_is_noop() {
        let (l, r) = (Rc::new(SimPanel::left()), Rc::new(SimPanel::right()));
        l.set_collapsed(false);
        let bp = panels(&l, &r);
        let cfg = HoverConfig::default();
        let mut m = HoverMachine::new();

        m.update(Intent::LeavePanel(Side::Left), &cfg, &bp).unwrap();
        m.update(Intent::EnterPanel(Side::Left), &cfg, &bp).unwrap();
        m.fire(TimerMsg::CollapseDue(Side::Left), &cfg, &bp).unwrap();
        assert_eq!(l.collapse_calls(), 0);
    }

    #[test]
    fn test_pinned_side_ignores_leave() {
        let (l, r) = (Rc::new(SimPanel::left()), Rc::new(SimPanel::right()));
        l.set_collapsed(false);
        let bp = panels(&l, &r);
        let cfg = HoverConfig {
            double_click_pin: true,
            ..HoverConfig::default()
        };
        let mut m = HoverMachine::new();

        m.update(Intent::TogglePin(Side::Left), &cfg, &bp).unwrap();
        let cmd = m.update(Intent::LeavePanel(Side::Left), &cfg, &bp).unwrap();
        assert_eq!(
            cmd,
            Cmd::SetHovered {
                side: Side::Left,
                on: false
            }
        );
        m.fire(TimerMsg::CollapseDue(Side::Left), &cfg, &bp).unwrap();
        assert_eq!(l.collapse_calls(), 0);
    }

    #[test]
    fn test_toggle_pin_requires_setting() {
        let (l, r) = (Rc::new(SimPanel::left()), Rc::new(SimPanel::right()));
        let bp = panels(&l, &r);
        let mut m = HoverMachine::new();
        m.update(Intent::TogglePin(Side::Right), &HoverConfig::default(), &bp)
            .unwrap();
        assert!(!m.is_pinned(Side::Right));
    }

    #[test]
    fn test_stale_panel_error_surfaces() {
        let (l, r) = (Rc::new(SimPanel::left()), Rc::new(SimPanel::right()));
        l.detach();
        let bp = panels(&l, &r);
        let mut m = HoverMachine::new();
        let err = m
            .update(Intent::EnterTriggerZone(Side::Left), &HoverConfig::default(), &bp)
            .unwrap_err();
        assert_eq!(err, PanelError::Stale(Side::Left));
    }
}
