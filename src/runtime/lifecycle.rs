//! Lifecycle manager
//!
//! `Controller` owns everything that lives between activation and
//! deactivation: configuration, the bound panel handles, the state machine,
//! the router, the listener registry and the timer queue. The host drives it
//! with `handle_event()` for input and `advance()` for time.

use crate::commands::Cmd;
use crate::config::{HoverConfig, SettingsStore};
use crate::host::Host;
use crate::hover::{HoverMachine, SideState};
use crate::listeners::{EventKind, ListenerRegistry, ListenerTarget, Scope};
use crate::messages::{HostEvent, Intent, TimerMsg};
use crate::panel::{BoundPanels, PanelError, Side};
use crate::presentation::{BodyClass, Presentation, StyleVars};
use crate::router::{EventRouter, RouteContext};
use crate::settings::{self, NumericEdit, NumericKey, SettingEffect, ToggleKey};
use crate::tracing::HoverSnapshot;

use super::timers::TimerQueue;

/// Layout-change notifications are coalesced over this window
pub const REINIT_DEBOUNCE_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Inactive,
    /// Activated, host layout still loading
    WaitingForLayout,
    Active,
}

pub struct Controller<H: Host> {
    host: H,
    presentation: Box<dyn Presentation>,
    store: Box<dyn SettingsStore>,
    config: HoverConfig,
    state: LifecycleState,
    panels: BoundPanels,
    machine: HoverMachine,
    router: EventRouter,
    listeners: ListenerRegistry,
    timers: TimerQueue<TimerMsg>,
    reinit_count: usize,
}

impl<H: Host> Controller<H> {
    pub fn new(
        host: H,
        presentation: impl Presentation + 'static,
        store: impl SettingsStore + 'static,
    ) -> Self {
        Self {
            host,
            presentation: Box::new(presentation),
            store: Box::new(store),
            config: HoverConfig::default(),
            state: LifecycleState::Inactive,
            panels: BoundPanels::default(),
            machine: HoverMachine::new(),
            router: EventRouter::new(),
            listeners: ListenerRegistry::new(),
            timers: TimerQueue::new(),
            reinit_count: 0,
        }
    }

    // ------------------------------------------------------------------
    // Activation / deactivation
    // ------------------------------------------------------------------

    /// Load settings, install presentation markers and bind as soon as the
    /// host layout is ready
    pub fn activate(&mut self) {
        if self.state != LifecycleState::Inactive {
            tracing::warn!("activate called while {:?}", self.state);
            return;
        }

        self.config = HoverConfig::load(self.store.as_mut());
        if self.config.overlay_mode {
            self.presentation.set_body_class(BodyClass::OverlayMode, true);
        }
        self.presentation.set_body_class(BodyClass::Active, true);
        self.presentation
            .apply_style(&StyleVars::from_config(&self.config));

        if self.host.is_layout_ready() {
            self.on_layout_ready();
        } else {
            tracing::info!("Activated, waiting for host layout");
            self.state = LifecycleState::WaitingForLayout;
        }
    }

    /// Bind panels and attach every listener, exactly once per activation
    fn on_layout_ready(&mut self) {
        self.bind();
        let host: &mut dyn Host = &mut self.host;
        self.listeners.attach(
            host,
            Scope::Global,
            ListenerTarget::Document,
            EventKind::PointerMove,
        );
        self.listeners
            .attach(host, Scope::Global, ListenerTarget::Document, EventKind::Click);
        self.listeners.attach(
            host,
            Scope::Global,
            ListenerTarget::Workspace,
            EventKind::LayoutChange,
        );
        self.attach_panel_listeners();
        self.state = LifecycleState::Active;
        tracing::info!("Active: {:?}, {} listeners", self.panels, self.listeners.len());
    }

    /// Persist settings and tear down every listener, timer and marker
    pub fn deactivate(&mut self) {
        if self.state == LifecycleState::Inactive {
            return;
        }

        self.persist();
        self.presentation.set_body_class(BodyClass::OverlayMode, false);
        self.presentation.set_body_class(BodyClass::Active, false);
        self.clear_hovered();

        let detached = self.listeners.detach_all(&mut self.host);
        let dropped = self.timers.len();
        self.timers.clear();
        self.machine.reset();
        self.panels = BoundPanels::default();
        self.state = LifecycleState::Inactive;

        tracing::info!(
            "Deactivated: {} listeners detached, {} timers dropped",
            detached,
            dropped
        );
    }

    // ------------------------------------------------------------------
    // Input and time
    // ------------------------------------------------------------------

    /// Process one host event received at `now_ms`
    pub fn handle_event(&mut self, event: HostEvent, now_ms: u64) {
        if event == HostEvent::LayoutReady {
            if self.state == LifecycleState::WaitingForLayout {
                self.on_layout_ready();
            }
            return;
        }
        if self.state != LifecycleState::Active {
            return;
        }
        if let Some((target, kind)) = event.listener_key() {
            if !self.listeners.is_attached(target, kind) {
                tracing::trace!(?target, ?kind, "event without listener dropped");
                return;
            }
        }

        if event == HostEvent::LayoutChange {
            self.schedule_reinitialize(now_ms);
            return;
        }

        if let Err(e) = self.route_and_apply(&event, now_ms) {
            self.recover(e, now_ms);
        }
    }

    fn route_and_apply(&mut self, event: &HostEvent, now_ms: u64) -> Result<(), PanelError> {
        let ctx = RouteContext {
            config: &self.config,
            machine: &self.machine,
            panels: &self.panels,
            surface_width: self.host.surface_width(),
        };
        let intents = self.router.route(event, now_ms, &ctx)?;
        for intent in intents {
            self.apply_intent(intent, now_ms)?;
        }
        Ok(())
    }

    fn apply_intent(&mut self, intent: Intent, now_ms: u64) -> Result<(), PanelError> {
        let traced = !intent.is_noisy()
            && tracing::enabled!(target: "hover", tracing::Level::DEBUG);
        let before = traced.then(|| HoverSnapshot::capture(&self.machine, &self.panels));

        let cmd = self.machine.update(intent, &self.config, &self.panels)?;
        self.run(cmd, now_ms);

        if let Some(before) = before {
            let after = HoverSnapshot::capture(&self.machine, &self.panels);
            match before.diff(&after) {
                Some(diff) => tracing::debug!(target: "hover", intent = intent.name(), %diff, "state changed"),
                None => tracing::debug!(target: "hover", intent = intent.name(), "processed"),
            }
        }
        Ok(())
    }

    fn run(&mut self, cmd: Cmd, now_ms: u64) {
        for cmd in cmd.into_vec() {
            match cmd {
                Cmd::Schedule { delay_ms, msg } => self.timers.schedule(now_ms, delay_ms, msg),
                Cmd::SetHovered { side, on } => self.presentation.set_hovered(side, on),
                Cmd::None | Cmd::Batch(_) => {}
            }
        }
    }

    /// Fire every timer due at or before `now_ms`, in deadline order
    pub fn advance(&mut self, now_ms: u64) {
        while let Some((due_ms, msg)) = self.timers.pop_due(now_ms) {
            match msg {
                TimerMsg::Reinitialize => self.force_reinitialize(due_ms),
                msg => {
                    let result = self.machine.fire(msg, &self.config, &self.panels);
                    match result {
                        Ok(cmd) => self.run(cmd, due_ms),
                        Err(e) => self.recover(e, due_ms),
                    }
                }
            }
        }
    }

    /// When the host should call `advance()` next
    pub fn next_deadline(&mut self) -> Option<u64> {
        self.timers.next_deadline()
    }

    // ------------------------------------------------------------------
    // Rebinding
    // ------------------------------------------------------------------

    fn schedule_reinitialize(&mut self, now_ms: u64) {
        let replaced = self
            .timers
            .debounce(now_ms, REINIT_DEBOUNCE_MS, TimerMsg::Reinitialize);
        tracing::debug!(replaced, "reinitialize scheduled");
    }

    /// Stale references are an unannounced layout change
    fn recover(&mut self, err: PanelError, now_ms: u64) {
        match err {
            PanelError::Unbound(side) => {
                tracing::debug!("ignoring event for unbound {} panel", side);
            }
            // Stale handles fail on every event until the rebind runs, so
            // they must not keep pushing a pending reinitialize back
            err if self.timers.is_pending(&TimerMsg::Reinitialize) => {
                tracing::debug!(side = %err.side(), "{}; reinitialize already pending", err);
            }
            err => {
                tracing::warn!(side = %err.side(), "{}; forcing reinitialize", err);
                self.schedule_reinitialize(now_ms);
            }
        }
    }

    /// Reset hover state, rebind, re-attach panel listeners, collapse both
    fn force_reinitialize(&mut self, now_ms: u64) {
        if self.state != LifecycleState::Active {
            return;
        }

        self.machine.reset();
        self.clear_hovered();
        self.listeners.detach_scope(&mut self.host, Scope::Panels);
        self.bind();
        self.attach_panel_listeners();
        self.reinit_count += 1;
        tracing::info!("Reinitialized ({}): {:?}", self.reinit_count, self.panels);

        if let Err(e) = self.machine.collapse_all(&self.panels) {
            self.recover(e, now_ms);
        }
    }

    fn bind(&mut self) {
        self.panels = BoundPanels::new(
            self.host.panel(Side::Left),
            self.host.panel(Side::Right),
            self.host.ribbon(),
        );
    }

    fn attach_panel_listeners(&mut self) {
        let host: &mut dyn Host = &mut self.host;
        for side in Side::ALL {
            if !self.panels.is_bound(side) {
                continue;
            }
            for event in [EventKind::MouseEnter, EventKind::MouseLeave, EventKind::MouseMove] {
                self.listeners
                    .attach(host, Scope::Panels, ListenerTarget::Panel(side), event);
            }
        }
        if self.panels.has_ribbon() {
            self.listeners.attach(
                host,
                Scope::Panels,
                ListenerTarget::Ribbon,
                EventKind::MouseEnter,
            );
        }
    }

    fn clear_hovered(&mut self) {
        for side in Side::ALL {
            self.presentation.set_hovered(side, false);
        }
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    /// Apply a typed value from the settings editor and persist it
    pub fn edit_setting(&mut self, key: NumericKey, raw: &str) -> NumericEdit {
        let edit = settings::apply_text(&mut self.config, key, raw);
        self.apply_effect(edit.effect);
        self.persist();
        edit
    }

    /// Apply a toggle from the settings editor and persist it
    pub fn toggle_setting(&mut self, key: ToggleKey, value: bool) {
        let effect = settings::apply_toggle(&mut self.config, key, value);
        self.apply_effect(effect);
        self.persist();
    }

    fn apply_effect(&mut self, effect: SettingEffect) {
        if self.state == LifecycleState::Inactive {
            return;
        }
        if effect.restyle {
            self.presentation
                .apply_style(&StyleVars::from_config(&self.config));
        }
        if let Some(on) = effect.overlay {
            self.presentation.set_body_class(BodyClass::OverlayMode, on);
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.config.to_record()) {
            tracing::warn!("Failed to save settings: {:#}", e);
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn config(&self) -> &HoverConfig {
        &self.config
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == LifecycleState::Active
    }

    pub fn hover_state(&self, side: Side) -> SideState {
        self.machine.side(side)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Number of forced reinitialize cycles executed so far
    pub fn reinitialize_count(&self) -> usize {
        self.reinit_count
    }
}
